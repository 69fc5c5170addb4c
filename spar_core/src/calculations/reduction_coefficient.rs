//! # Reduction Coefficient Method
//!
//! Converts the pair into a single section of the composite material. Each
//! element's thickness is scaled by its reduction factor `phi_i = E_i / E2`,
//! so the composite element is the reference with `phi2 = 1`:
//!
//! ```text
//! phi1      = E1 / E2,   phi2 = E2 / E2 = 1
//! h_red     = h1*phi1 + h2*phi2
//! sigma_red = N / h_red
//! sigma_i   = sigma_red * phi_i
//! N_i       = sigma_i * h_i
//! ```

use super::basis::{resolve_thicknesses, LoadBasis};
use super::numeric::{ratio, rounded};
use super::{AnalysisInput, AnalysisResult, ElementShare, MethodTerms, SafetyAnalysis};
use crate::errors::CalcResult;

/// Run the reduction coefficient method.
///
/// # Errors
///
/// * `IncompatibleElementPairing` - the elements are not one Shelf and one Panel
/// * `DivisionByZero` - zero H, flange width, strength, composite modulus,
///   reduced thickness or stress
pub fn calculate(input: &AnalysisInput) -> CalcResult<AnalysisResult> {
    input.validate()?;
    let p = input.settings.precision;

    let basis = LoadBasis::compute(input)?;
    let n = basis.linear_load;
    let (h1, h2) = resolve_thicknesses(&input.metal, &input.composite, n, p)?;
    let (e1, e2) = (input.metal.e_mpa(), input.composite.e_mpa());

    let phi1 = ratio(e1, e2, "reduction factor phi1 (E2)", p)?;
    let phi2 = ratio(e2, e2, "reduction factor phi2 (E2)", p)?;

    let h_red = rounded(h1 * phi1 + h2 * phi2, "reduced thickness h_red", p)?;
    let sigma_red = ratio(n, h_red, "reduced stress (h_red)", p)?;

    let sigma1 = rounded(sigma_red * phi1, "metal stress", p)?;
    let sigma2 = rounded(sigma_red * phi2, "composite stress", p)?;
    let n1 = rounded(sigma1 * h1, "metal internal load N1", p)?;
    let n2 = rounded(sigma2 * h2, "composite internal load N2", p)?;

    AnalysisResult::assemble(
        SafetyAnalysis::ReductionCoefficient,
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
        MethodTerms::ReductionCoefficient {
            phi1,
            phi2,
            h_red,
            sigma_red,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::StructuralElement;
    use crate::errors::CalcError;
    use crate::loads::StrengthFactors;
    use crate::materials::MaterialRecord;

    fn metal() -> MaterialRecord {
        MaterialRecord::new(1, 70_000.0, 390.0, 8.0)
    }

    fn composite() -> MaterialRecord {
        MaterialRecord::new(1, 120_000.0, 900.0, 0.8)
    }

    fn reference_input() -> AnalysisInput {
        AnalysisInput::new(
            StructuralElement::shelf(metal(), 100.0),
            StructuralElement::panel(composite(), 100.0, 2.0),
            StrengthFactors::new(180.0, 220.0),
        )
    }

    #[test]
    fn test_composite_is_reference_material() {
        let result = calculate(&reference_input()).unwrap();
        match result.terms {
            MethodTerms::ReductionCoefficient {
                phi1,
                phi2,
                h_red,
                sigma_red,
            } => {
                assert_eq!(phi1, 0.58);
                assert_eq!(phi2, 1.0);
                assert_eq!(h_red, 14.81);
                assert!((sigma_red - 581.53).abs() <= 0.011);
                // The reference element carries the reduced stress unchanged
                assert_eq!(result.composite.stress_mpa, sigma_red);
            }
            other => panic!("unexpected terms {:?}", other),
        }
        assert!((result.metal.stress_mpa - 337.29).abs() <= 0.011);
        assert!((result.metal.internal_load - 7447.36).abs() <= 0.011);
    }

    #[test]
    fn test_zero_composite_modulus() {
        let mut input = reference_input();
        input.composite.material.e_mpa = 0.0;
        assert!(matches!(
            calculate(&input),
            Err(CalcError::DivisionByZero { ref quantity }) if quantity.contains("phi1")
        ));
    }

    #[test]
    fn test_coarser_precision_changes_rounding() {
        let mut input = reference_input();
        input.settings.precision = 1;
        let result = calculate(&input).unwrap();
        match result.terms {
            MethodTerms::ReductionCoefficient { phi1, .. } => assert_eq!(phi1, 0.6),
            other => panic!("unexpected terms {:?}", other),
        }
    }

    #[test]
    fn test_zero_reduced_thickness() {
        let input = AnalysisInput::new(
            StructuralElement::shelf(MaterialRecord::new(1, 0.0, 390.0, 8.0), 100.0),
            StructuralElement::panel(composite(), 100.0, 0.0),
            StrengthFactors::new(180.0, 220.0),
        );
        assert!(matches!(
            calculate(&input),
            Err(CalcError::DivisionByZero { ref quantity }) if quantity.contains("h_red")
        ));
    }
}
