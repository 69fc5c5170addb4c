//! # Comparison Sweep
//!
//! Evaluates every metal × composite grade pairing of an assignment with
//! each requested method. Pairings are independent, so the sweep is a plain
//! map; with the `parallel` feature it runs on the rayon thread pool.
//!
//! A pairing that fails (missing grade, zero denominator, ...) is logged and
//! recorded as a [`PairingFailure`]; the rest of the sweep carries on. Only
//! errors for which [`CalcError::aborts_run`] holds stop the sweep.
//!
//! ## Example
//!
//! ```rust
//! use spar_core::comparison::compare;
//! use spar_core::study::Study;
//!
//! let study = Study::template("Student", "402");
//! let request = study.comparison_request(7, "402").unwrap();
//! let report = compare(&request).unwrap();
//!
//! // 3 metals x 4 composites x 3 methods
//! assert_eq!(report.results.len(), 36);
//! ```

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::calculations::{AnalysisInput, AnalysisResult, AnalysisSettings, SafetyAnalysis};
use crate::elements::{ElementFactory, ElementRole, StructuralElement};
use crate::errors::{CalcError, CalcResult};
use crate::loads::{GeometryParams, StrengthFactors};
use crate::materials::{Grade, MaterialCatalog, MaterialCategory};

/// Which element is the flange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Orientation {
    /// Metal flange on a composite skin
    #[default]
    MetalShelf,
    /// Composite flange on a metal skin
    CompositeShelf,
}

impl Orientation {
    /// `(metal role, composite role)`
    pub fn roles(&self) -> (ElementRole, ElementRole) {
        match self {
            Orientation::MetalShelf => (ElementRole::Shelf, ElementRole::Panel),
            Orientation::CompositeShelf => (ElementRole::Panel, ElementRole::Shelf),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Orientation::MetalShelf => "metal shelf / composite panel",
            Orientation::CompositeShelf => "composite shelf / metal panel",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Orientation {
    type Err = CalcError;

    fn from_str(s: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().replace(['_', ' '], "-").as_str() {
            "metal-shelf" | "metal" => Ok(Orientation::MetalShelf),
            "composite-shelf" | "composite" => Ok(Orientation::CompositeShelf),
            _ => Err(CalcError::invalid_input(
                "orientation",
                s,
                "Expected metal-shelf or composite-shelf",
            )),
        }
    }
}

/// Everything a sweep needs.
#[derive(Debug, Clone)]
pub struct ComparisonRequest<'a> {
    pub catalog: &'a MaterialCatalog,
    pub metal_grades: Vec<Grade>,
    pub composite_grades: Vec<Grade>,
    pub factors: StrengthFactors,
    pub orientation: Orientation,
    pub methods: Vec<SafetyAnalysis>,
    /// Dimensions of the elements built for each pairing
    pub geometry: GeometryParams,
    pub analysis: AnalysisSettings,
    pub required_safety_factor: f64,
}

/// One successful evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairingResult {
    pub metal_grade: Grade,
    pub composite_grade: Grade,
    pub result: AnalysisResult,
    /// Both safety factors reach the required value
    pub passes: bool,
}

/// One skipped evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairingFailure {
    pub metal_grade: Grade,
    pub composite_grade: Grade,
    /// `None` when the elements could not be built at all
    pub method: Option<SafetyAnalysis>,
    pub error: CalcError,
}

/// Partial result set of a sweep.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub required_safety_factor: f64,
    pub results: Vec<PairingResult>,
    pub failures: Vec<PairingFailure>,
}

impl ComparisonReport {
    /// Results that meet the required safety factor
    pub fn passing(&self) -> impl Iterator<Item = &PairingResult> {
        self.results.iter().filter(|r| r.passes)
    }

    /// Passing pairing with the largest minimum safety factor for `method`
    pub fn best(&self, method: SafetyAnalysis) -> Option<&PairingResult> {
        self.passing()
            .filter(|r| r.result.method == method)
            .max_by(|a, b| {
                a.result
                    .min_safety_factor()
                    .total_cmp(&b.result.min_safety_factor())
            })
    }

    /// Results of one method, in sweep order
    pub fn for_method(&self, method: SafetyAnalysis) -> impl Iterator<Item = &PairingResult> {
        self.results.iter().filter(move |r| r.result.method == method)
    }
}

type Outcome = Result<PairingResult, PairingFailure>;

/// Run the sweep.
///
/// Pairings are ordered metal-major, then by method, matching the order of
/// the grade lists.
///
/// # Errors
///
/// Returns the first error that [aborts the run](CalcError::aborts_run);
/// every other failure ends up in [`ComparisonReport::failures`].
pub fn compare(request: &ComparisonRequest<'_>) -> CalcResult<ComparisonReport> {
    let pairs: Vec<(&Grade, &Grade)> = request
        .metal_grades
        .iter()
        .flat_map(|m| request.composite_grades.iter().map(move |c| (m, c)))
        .collect();

    if request.catalog.is_empty() {
        log::warn!("Material catalog is empty; every pairing will be skipped");
    }
    log::info!(
        "Comparing {} pairings ({}) with {} method(s)",
        pairs.len(),
        request.orientation,
        request.methods.len()
    );

    #[cfg(not(feature = "parallel"))]
    let iterator = pairs.iter();

    #[cfg(feature = "parallel")]
    let iterator = pairs.par_iter();

    let outcomes: Vec<Vec<Outcome>> = iterator
        .map(|(metal, composite)| evaluate_pair(request, metal, composite))
        .collect();

    let mut report = ComparisonReport {
        required_safety_factor: request.required_safety_factor,
        ..ComparisonReport::default()
    };
    for outcome in outcomes.into_iter().flatten() {
        match outcome {
            Ok(result) => report.results.push(result),
            Err(failure) => {
                if failure.error.aborts_run() {
                    return Err(failure.error);
                }
                log::warn!(
                    "Skipping metal {} + composite {}{}: {}",
                    failure.metal_grade,
                    failure.composite_grade,
                    failure
                        .method
                        .map(|m| format!(" ({})", m))
                        .unwrap_or_default(),
                    failure.error
                );
                report.failures.push(failure);
            }
        }
    }

    log::info!(
        "{} result(s), {} passing, {} skipped",
        report.results.len(),
        report.passing().count(),
        report.failures.len()
    );
    Ok(report)
}

fn evaluate_pair(request: &ComparisonRequest<'_>, metal: &Grade, composite: &Grade) -> Vec<Outcome> {
    let failure = |method: Option<SafetyAnalysis>, error: CalcError| PairingFailure {
        metal_grade: metal.clone(),
        composite_grade: composite.clone(),
        method,
        error,
    };

    let input = match build_input(request, metal, composite) {
        Ok(input) => input,
        Err(error) => return vec![Err(failure(None, error))],
    };

    request
        .methods
        .iter()
        .map(|method| match method.calculate(&input) {
            Ok(result) => Ok(PairingResult {
                metal_grade: metal.clone(),
                composite_grade: composite.clone(),
                passes: result.passes(request.required_safety_factor),
                result,
            }),
            Err(error) => Err(failure(Some(*method), error)),
        })
        .collect()
}

fn build_input(request: &ComparisonRequest<'_>, metal: &Grade, composite: &Grade) -> CalcResult<AnalysisInput> {
    let (metal_role, composite_role) = request.orientation.roles();
    let metal_element = element(request, MaterialCategory::Metal, metal_role, metal)?;
    let composite_element = element(request, MaterialCategory::Composite, composite_role, composite)?;

    Ok(AnalysisInput::new(metal_element, composite_element, request.factors).with_settings(request.analysis))
}

fn element(
    request: &ComparisonRequest<'_>,
    category: MaterialCategory,
    role: ElementRole,
    grade: &Grade,
) -> CalcResult<StructuralElement> {
    ElementFactory::new(request.catalog, category)
        .with_geometry(request.geometry)
        .create(role, grade)
}
