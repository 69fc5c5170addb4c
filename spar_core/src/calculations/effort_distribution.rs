//! # Effort Distribution Method
//!
//! Shares the linear load between the elements in proportion to their axial
//! stiffness:
//!
//! ```text
//! k_i     = E_i * h_i
//! N_i     = N * k_i / (k1 + k2)
//! sigma_i = N_i / h_i
//! n_i     = sigma_b_i / sigma_i
//! ```

use super::basis::{resolve_thicknesses, LoadBasis};
use super::numeric::{ratio, rounded};
use super::{AnalysisInput, AnalysisResult, ElementShare, MethodTerms, SafetyAnalysis};
use crate::errors::{CalcError, CalcResult};

/// Run the effort distribution method.
///
/// # Errors
///
/// * `IncompatibleElementPairing` - the elements are not one Shelf and one Panel
/// * `DivisionByZero` - zero H, flange width, strength, combined stiffness or stress
pub fn calculate(input: &AnalysisInput) -> CalcResult<AnalysisResult> {
    input.validate()?;
    let p = input.settings.precision;

    let basis = LoadBasis::compute(input)?;
    let n = basis.linear_load;
    let (h1, h2) = resolve_thicknesses(&input.metal, &input.composite, n, p)?;

    let k1 = rounded(input.metal.e_mpa() * h1, "metal stiffness E1*h1", p)?;
    let k2 = rounded(input.composite.e_mpa() * h2, "composite stiffness E2*h2", p)?;
    let k_sum = rounded(k1 + k2, "combined stiffness", p)?;
    if k_sum == 0.0 {
        return Err(CalcError::division_by_zero("combined stiffness E1*h1 + E2*h2"));
    }

    let n1 = ratio(n * k1, k_sum, "metal internal load N1", p)?;
    let n2 = ratio(n * k2, k_sum, "composite internal load N2", p)?;

    let sigma1 = ratio(n1, h1, "metal stress (h1)", p)?;
    let sigma2 = ratio(n2, h2, "composite stress (h2)", p)?;

    AnalysisResult::assemble(
        SafetyAnalysis::EffortDistribution,
        input,
        basis,
        ElementShare {
            thickness_mm: h1,
            internal_load: n1,
            stress_mpa: sigma1,
        },
        ElementShare {
            thickness_mm: h2,
            internal_load: n2,
            stress_mpa: sigma2,
        },
        MethodTerms::EffortDistribution { k1, k2 },
    )
}
