//! # Joint Deformation Method
//!
//! Both elements strain together at the bond line, so the stress in each is
//! proportional to its modulus relative to the thickness-weighted modulus of
//! the pair:
//!
//! ```text
//! h_sum   = h1 + h2,          f_i = h_i / h_sum
//! E_x     = E1*f1 + E2*f2
//! sigma_x = N / h_sum
//! sigma_i = sigma_x * E_i / E_x
//! N_i     = N * E_i * f_i / E_x
//! ```

use super::basis::{resolve_thicknesses, LoadBasis};
use super::numeric::{ratio, rounded};
use super::{AnalysisInput, AnalysisResult, ElementShare, MethodTerms, SafetyAnalysis};
use crate::errors::CalcResult;

/// Run the joint deformation method.
///
/// # Errors
///
/// * `IncompatibleElementPairing` - the elements are not one Shelf and one Panel
/// * `DivisionByZero` - zero H, flange width, strength, total thickness,
///   weighted modulus or stress
pub fn calculate(input: &AnalysisInput) -> CalcResult<AnalysisResult> {
    input.validate()?;
    let p = input.settings.precision;

    let basis = LoadBasis::compute(input)?;
    let n = basis.linear_load;
    let (h1, h2) = resolve_thicknesses(&input.metal, &input.composite, n, p)?;
    let (e1, e2) = (input.metal.e_mpa(), input.composite.e_mpa());

    let h_sum = rounded(h1 + h2, "total thickness h1 + h2", p)?;
    let f1 = ratio(h1, h_sum, "metal thickness fraction (h_sum)", p)?;
    let f2 = ratio(h2, h_sum, "composite thickness fraction (h_sum)", p)?;

    let e_x = rounded(e1 * f1 + e2 * f2, "weighted modulus E_x", p)?;
    let sigma_x = ratio(n, h_sum, "mean stress sigma_x (h_sum)", p)?;

    let sigma1 = ratio(sigma_x * e1, e_x, "metal stress (E_x)", p)?;
    let sigma2 = ratio(sigma_x * e2, e_x, "composite stress (E_x)", p)?;

    let n1 = ratio(n * e1 * f1, e_x, "metal internal load N1 (E_x)", p)?;
    let n2 = ratio(n * e2 * f2, e_x, "composite internal load N2 (E_x)", p)?;

    AnalysisResult::assemble(
        SafetyAnalysis::JointDeformation,
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
        MethodTerms::JointDeformation {
            h_sum,
            h1_fraction: f1,
            h2_fraction: f2,
            e_x,
            sigma_x,
        },
    )
}
