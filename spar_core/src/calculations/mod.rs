//! # Strength Analysis
//!
//! Three engineering methods for sharing the load of a hybrid spar belt
//! between its metal and composite elements. Each method follows the
//! pattern:
//!
//! - [`AnalysisInput`] - metal element, composite element, load case and
//!   settings (JSON-serializable). Widths and thicknesses come from the
//!   elements themselves.
//! - [`AnalysisResult`] - per-element thickness, internal load, stress and
//!   safety factor (JSON-serializable)
//! - `calculate(input) -> CalcResult<AnalysisResult>` - pure function
//!
//! [`SafetyAnalysis`] selects a method by tag.
//!
//! ## Available Methods
//!
//! - [`effort_distribution`] - split by axial stiffness `E * h`
//! - [`joint_deformation`] - equal strain at the bond line
//! - [`reduction_coefficient`] - composite reduced to an equivalent section
//!
//! ## Example
//!
//! ```rust
//! use spar_core::calculations::{AnalysisInput, SafetyAnalysis};
//! use spar_core::elements::StructuralElement;
//! use spar_core::loads::StrengthFactors;
//! use spar_core::materials::MaterialRecord;
//!
//! let input = AnalysisInput::new(
//!     StructuralElement::shelf(MaterialRecord::new(1, 70_000.0, 390.0, 8.0), 100.0),
//!     StructuralElement::panel(MaterialRecord::new(1, 120_000.0, 900.0, 0.8), 100.0, 2.0),
//!     StrengthFactors::new(180.0, 220.0),
//! );
//!
//! let result = SafetyAnalysis::EffortDistribution.calculate(&input).unwrap();
//! assert_eq!(result.linear_load, 8612.44);
//! let (metal_sf, composite_sf) = result.safety_factors();
//! assert!(metal_sf > 1.0 && composite_sf > 1.0);
//! ```

pub mod basis;
pub mod effort_distribution;
pub mod joint_deformation;
pub mod numeric;
pub mod reduction_coefficient;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use basis::{resolve_thicknesses, LoadBasis};

use crate::elements::{ElementRole, StructuralElement};
use crate::errors::{CalcError, CalcResult};
use crate::loads::StrengthFactors;
use crate::materials::{Grade, MaterialCategory};
use numeric::ratio;

/// Converts M_bend from kN·m to the N·mm scale
pub const DEFAULT_LOAD_FACTOR: f64 = 1.0e6;

/// Effective lever arm of the belt forces as a fraction of H
pub const DEFAULT_LEVER_ARM_RATIO: f64 = 0.95;

/// Decimal places every intermediate value is rounded to
pub const DEFAULT_PRECISION: u32 = 2;

/// Largest precision accepted; beyond this `f64` rounding is meaningless
pub const MAX_PRECISION: u32 = 15;

/// Numeric conventions of an analysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSettings {
    /// Multiplier applied to M_bend
    pub load_factor: f64,
    /// Lever arm of the belt forces as a fraction of H
    pub lever_arm_ratio: f64,
    /// Decimal places for the cumulative rounding
    pub precision: u32,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        AnalysisSettings {
            load_factor: DEFAULT_LOAD_FACTOR,
            lever_arm_ratio: DEFAULT_LEVER_ARM_RATIO,
            precision: DEFAULT_PRECISION,
        }
    }
}

/// Load-distribution method, selected by tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SafetyAnalysis {
    /// Load split in proportion to axial stiffness
    EffortDistribution,
    /// Equal strain in both elements
    JointDeformation,
    /// Composite reduced to an equivalent thickness
    ReductionCoefficient,
}

impl SafetyAnalysis {
    /// All methods, in report order
    pub const ALL: [SafetyAnalysis; 3] = [
        SafetyAnalysis::EffortDistribution,
        SafetyAnalysis::JointDeformation,
        SafetyAnalysis::ReductionCoefficient,
    ];

    /// Run this method on `input`.
    pub fn calculate(&self, input: &AnalysisInput) -> CalcResult<AnalysisResult> {
        let result = match self {
            SafetyAnalysis::EffortDistribution => effort_distribution::calculate(input),
            SafetyAnalysis::JointDeformation => joint_deformation::calculate(input),
            SafetyAnalysis::ReductionCoefficient => reduction_coefficient::calculate(input),
        }?;
        log::debug!(
            "{}: metal {} / composite {} -> n = ({}, {})",
            self.display_name(),
            input.metal.material.grade,
            input.composite.material.grade,
            result.metal.safety_factor,
            result.composite.safety_factor,
        );
        Ok(result)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SafetyAnalysis::EffortDistribution => "Effort distribution",
            SafetyAnalysis::JointDeformation => "Joint deformation",
            SafetyAnalysis::ReductionCoefficient => "Reduction coefficient",
        }
    }

    /// Short code used on the command line and in CSV output
    pub fn code(&self) -> &'static str {
        match self {
            SafetyAnalysis::EffortDistribution => "effort",
            SafetyAnalysis::JointDeformation => "joint",
            SafetyAnalysis::ReductionCoefficient => "reduction",
        }
    }
}

impl fmt::Display for SafetyAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for SafetyAnalysis {
    type Err = CalcError;

    fn from_str(s: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "effort" | "effortdistribution" => Ok(SafetyAnalysis::EffortDistribution),
            "joint" | "jointdeformation" => Ok(SafetyAnalysis::JointDeformation),
            "reduction" | "reductioncoefficient" => Ok(SafetyAnalysis::ReductionCoefficient),
            _ => Err(CalcError::invalid_input(
                "method",
                s,
                "Expected one of: effort, joint, reduction",
            )),
        }
    }
}

/// Everything one analysis consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisInput {
    /// Metal element (Shelf or Panel)
    pub metal: StructuralElement,
    /// Composite element (the other role)
    pub composite: StructuralElement,
    /// Load case
    pub factors: StrengthFactors,
    #[serde(default)]
    pub settings: AnalysisSettings,
}

impl AnalysisInput {
    /// Input with default settings
    pub fn new(metal: StructuralElement, composite: StructuralElement, factors: StrengthFactors) -> Self {
        AnalysisInput {
            metal,
            composite,
            factors,
            settings: AnalysisSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: AnalysisSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Validate the pairing, both elements, the load case and the settings.
    pub fn validate(&self) -> CalcResult<()> {
        basis::check_pairing(&self.metal, &self.composite)?;
        self.metal.validate()?;
        self.composite.validate()?;
        self.factors.validate()?;
        if self.settings.precision > MAX_PRECISION {
            return Err(CalcError::invalid_input(
                "precision",
                self.settings.precision.to_string(),
                format!("Precision must not exceed {} decimal places", MAX_PRECISION),
            ));
        }
        if !self.settings.load_factor.is_finite() || !self.settings.lever_arm_ratio.is_finite() {
            return Err(CalcError::invalid_input(
                "settings",
                format!("{:?}", self.settings),
                "Load factor and lever arm ratio must be finite",
            ));
        }
        Ok(())
    }

    /// The element in the Shelf role. Its width is the flange width.
    pub fn shelf(&self) -> &StructuralElement {
        if self.metal.is_shelf() {
            &self.metal
        } else {
            &self.composite
        }
    }
}

/// Result row for one element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementResult {
    pub role: ElementRole,
    pub category: MaterialCategory,
    pub grade: Grade,
    /// Display designation of the material
    pub name: String,
    /// Elastic modulus (MPa)
    pub e_mpa: f64,
    /// Ultimate strength (MPa)
    pub sigma_b_mpa: f64,
    /// Operative thickness (mm)
    pub thickness_mm: f64,
    /// Internal load carried by the element (N/mm)
    pub internal_load: f64,
    /// Operating stress (MPa)
    pub stress_mpa: f64,
    /// sigma_b / stress; below 1 means overstressed
    pub safety_factor: f64,
    /// Elongation at failure (%)
    pub epsilon_pct: f64,
}

impl ElementResult {
    fn build(
        element: &StructuralElement,
        category: MaterialCategory,
        share: ElementShare,
        precision: u32,
    ) -> CalcResult<Self> {
        let safety_factor = ratio(
            element.sigma_b_mpa(),
            share.stress_mpa,
            &format!("{} safety factor ({} stress)", category, element.role),
            precision,
        )?;
        Ok(ElementResult {
            role: element.role,
            category,
            grade: element.material.grade.clone(),
            name: element.material.display_name(),
            e_mpa: element.e_mpa(),
            sigma_b_mpa: element.sigma_b_mpa(),
            thickness_mm: share.thickness_mm,
            internal_load: share.internal_load,
            stress_mpa: share.stress_mpa,
            safety_factor,
            epsilon_pct: element.material.epsilon_pct,
        })
    }
}

/// Thickness, load and stress a method assigns to one element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ElementShare {
    pub thickness_mm: f64,
    pub internal_load: f64,
    pub stress_mpa: f64,
}

/// Method-specific intermediate values, kept for reports.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method")]
pub enum MethodTerms {
    EffortDistribution {
        /// Axial stiffness E1*h1 of the metal element
        k1: f64,
        /// Axial stiffness E2*h2 of the composite element
        k2: f64,
    },
    JointDeformation {
        h_sum: f64,
        h1_fraction: f64,
        h2_fraction: f64,
        /// Thickness-weighted modulus
        e_x: f64,
        sigma_x: f64,
    },
    ReductionCoefficient {
        phi1: f64,
        phi2: f64,
        h_red: f64,
        sigma_red: f64,
    },
}

/// Outcome of one analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub method: SafetyAnalysis,
    /// Force P (N)
    pub strength: f64,
    /// Linear load N (N/mm)
    pub linear_load: f64,
    /// Metal thickness needed to carry N alone (mm)
    pub original_belt_thickness: f64,
    pub metal: ElementResult,
    pub composite: ElementResult,
    pub terms: MethodTerms,
}

impl AnalysisResult {
    pub(crate) fn assemble(
        method: SafetyAnalysis,
        input: &AnalysisInput,
        basis: LoadBasis,
        metal: ElementShare,
        composite: ElementShare,
        terms: MethodTerms,
    ) -> CalcResult<Self> {
        let p = input.settings.precision;
        Ok(AnalysisResult {
            method,
            strength: basis.strength,
            linear_load: basis.linear_load,
            original_belt_thickness: basis.original_belt_thickness,
            metal: ElementResult::build(&input.metal, MaterialCategory::Metal, metal, p)?,
            composite: ElementResult::build(&input.composite, MaterialCategory::Composite, composite, p)?,
            terms,
        })
    }

    /// `(metal, composite)` safety factors
    pub fn safety_factors(&self) -> (f64, f64) {
        (self.metal.safety_factor, self.composite.safety_factor)
    }

    /// The smaller of the two safety factors
    pub fn min_safety_factor(&self) -> f64 {
        self.metal.safety_factor.min(self.composite.safety_factor)
    }

    /// Both elements meet `required` safety factor
    pub fn passes(&self, required: f64) -> bool {
        self.min_safety_factor() >= required
    }

    /// `N1 + N2`
    pub fn total_internal_load(&self) -> f64 {
        self.metal.internal_load + self.composite.internal_load
    }

    /// Rows in report order: Shelf first, then Panel
    pub fn rows(&self) -> [&ElementResult; 2] {
        if self.metal.role == ElementRole::Shelf {
            [&self.metal, &self.composite]
        } else {
            [&self.composite, &self.metal]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::MaterialRecord;

    fn reference_input() -> AnalysisInput {
        AnalysisInput::new(
            StructuralElement::shelf(MaterialRecord::new(1, 70_000.0, 390.0, 8.0), 100.0),
            StructuralElement::panel(MaterialRecord::new(2, 120_000.0, 900.0, 0.8), 100.0, 2.0),
            StrengthFactors::new(180.0, 220.0),
        )
    }

    #[test]
    fn test_negative_load_case_rejected_by_every_method() {
        for factors in [StrengthFactors::new(-180.0, 220.0), StrengthFactors::new(1.0, -220.0)] {
            let mut input = reference_input();
            input.factors = factors;
            for method in SafetyAnalysis::ALL {
                assert!(matches!(
                    method.calculate(&input),
                    Err(CalcError::InvalidInput { .. })
                ));
            }
        }
    }

    #[test]
    fn test_negative_element_dimensions_rejected() {
        let mut narrow = reference_input();
        narrow.metal.width_mm = -100.0;
        let mut thin = reference_input();
        thin.composite.thickness_mm = Some(-2.0);

        for method in SafetyAnalysis::ALL {
            assert!(matches!(
                method.calculate(&narrow),
                Err(CalcError::InvalidInput { ref field, .. }) if field == "width_mm"
            ));
            assert!(matches!(
                method.calculate(&thin),
                Err(CalcError::InvalidInput { ref field, .. }) if field == "thickness_mm"
            ));
        }
    }

    #[test]
    fn test_precision_is_bounded() {
        let settings = AnalysisSettings {
            precision: 400,
            ..AnalysisSettings::default()
        };
        let input = reference_input().with_settings(settings);
        assert!(matches!(
            input.validate(),
            Err(CalcError::InvalidInput { ref field, .. }) if field == "precision"
        ));

        let settings = AnalysisSettings {
            precision: MAX_PRECISION,
            ..AnalysisSettings::default()
        };
        assert!(reference_input().with_settings(settings).validate().is_ok());
    }

    #[test]
    fn test_shelf_lookup() {
        let input = reference_input();
        assert_eq!(input.shelf().material.grade, Grade::Number(1));

        let swapped = AnalysisInput::new(
            StructuralElement::panel(MaterialRecord::new(1, 70_000.0, 390.0, 8.0), 100.0, 2.0),
            StructuralElement::shelf(MaterialRecord::new(2, 120_000.0, 900.0, 0.8), 60.0),
            StrengthFactors::new(180.0, 220.0),
        );
        assert_eq!(swapped.shelf().width_mm, 60.0);
    }

    #[test]
    fn test_method_parsing() {
        assert_eq!("effort".parse::<SafetyAnalysis>().unwrap(), SafetyAnalysis::EffortDistribution);
        assert_eq!(
            "Joint-Deformation".parse::<SafetyAnalysis>().unwrap(),
            SafetyAnalysis::JointDeformation
        );
        assert_eq!(
            "reduction_coefficient".parse::<SafetyAnalysis>().unwrap(),
            SafetyAnalysis::ReductionCoefficient
        );
        assert!("fem".parse::<SafetyAnalysis>().is_err());
    }

    #[test]
    fn test_rows_follow_roles() {
        let result = SafetyAnalysis::EffortDistribution
            .calculate(&reference_input())
            .unwrap();
        let [first, second] = result.rows();
        assert_eq!(first.role, ElementRole::Shelf);
        assert_eq!(first.category, MaterialCategory::Metal);
        assert_eq!(second.role, ElementRole::Panel);
    }

    #[test]
    fn test_passes_uses_smaller_factor() {
        let result = SafetyAnalysis::EffortDistribution
            .calculate(&reference_input())
            .unwrap();
        assert_eq!(result.min_safety_factor(), result.metal.safety_factor);
        assert!(result.passes(1.0));
        assert!(!result.passes(1.5));
    }

    #[test]
    fn test_input_serialization() {
        let input = reference_input();
        let json = serde_json::to_string(&input).unwrap();
        let roundtrip: AnalysisInput = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, input);
    }

    #[test]
    fn test_result_terms_are_tagged() {
        let result = SafetyAnalysis::JointDeformation
            .calculate(&reference_input())
            .unwrap();
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"method\":\"JointDeformation\""));
        assert!(json.contains("\"e_x\""));
    }
}
