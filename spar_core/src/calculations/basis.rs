//! Quantities shared by every load-distribution method.
//!
//! The applied force, the linear load along the flange and the nominal belt
//! thickness depend only on the load case, the flange width (the Shelf's
//! width) and the metal grade. The operative thickness of each element depends on which of the
//! two is the Shelf.

use serde::{Deserialize, Serialize};

use super::numeric::ratio;
use super::AnalysisInput;
use crate::elements::{ElementRole, StructuralElement};
use crate::errors::{CalcError, CalcResult};

/// Shared derived quantities of one analysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadBasis {
    /// Force P carried by the belt (N)
    pub strength: f64,
    /// Linear load N along the flange (N/mm)
    pub linear_load: f64,
    /// Metal thickness needed to carry N alone (mm)
    pub original_belt_thickness: f64,
}

impl LoadBasis {
    /// Compute the basis for `input`.
    ///
    /// ```text
    /// P     = load_factor * M_bend / (lever_arm_ratio * H)
    /// N     = P / shelf.width
    /// h_ref = N / sigma_b(metal)
    /// ```
    ///
    /// # Errors
    ///
    /// * `DivisionByZero` - `H`, the Shelf width or the metal strength is zero
    pub fn compute(input: &AnalysisInput) -> CalcResult<Self> {
        let settings = &input.settings;
        let p = settings.precision;

        let strength = ratio(
            settings.load_factor * input.factors.m_bend,
            settings.lever_arm_ratio * input.factors.h,
            "strength (lever_arm_ratio * H)",
            p,
        )?;
        let linear_load = ratio(
            strength,
            input.shelf().width_mm,
            "linear load (flange width)",
            p,
        )?;
        let original_belt_thickness = ratio(
            linear_load,
            input.metal.sigma_b_mpa(),
            "original belt thickness (metal sigma_b)",
            p,
        )?;

        Ok(LoadBasis {
            strength,
            linear_load,
            original_belt_thickness,
        })
    }
}

/// Operative thicknesses `(h1, h2)` of the metal and the composite element.
///
/// The Shelf is sized to carry the whole linear load at its own ultimate
/// strength, `round(N / sigma_b_shelf)`; the Panel keeps its fixed thickness.
///
/// # Errors
///
/// * `IncompatibleElementPairing` - the elements are not one Shelf and one Panel
/// * `InvalidInput` - the Panel has no thickness
/// * `DivisionByZero` - the Shelf material has zero ultimate strength
pub fn resolve_thicknesses(
    metal: &StructuralElement,
    composite: &StructuralElement,
    linear_load: f64,
    precision: u32,
) -> CalcResult<(f64, f64)> {
    check_pairing(metal, composite)?;

    let shelf_thickness = |shelf: &StructuralElement| {
        ratio(
            linear_load,
            shelf.sigma_b_mpa(),
            "shelf thickness (shelf sigma_b)",
            precision,
        )
    };

    match (metal.role, composite.role) {
        (ElementRole::Shelf, ElementRole::Panel) => {
            Ok((shelf_thickness(metal)?, panel_thickness(composite)?))
        }
        (ElementRole::Panel, ElementRole::Shelf) => {
            Ok((panel_thickness(metal)?, shelf_thickness(composite)?))
        }
        _ => Err(pairing_error(metal, composite)),
    }
}

/// Exactly one Shelf and one Panel.
pub fn check_pairing(metal: &StructuralElement, composite: &StructuralElement) -> CalcResult<()> {
    if metal.role == composite.role.opposite() {
        Ok(())
    } else {
        Err(pairing_error(metal, composite))
    }
}

fn pairing_error(metal: &StructuralElement, composite: &StructuralElement) -> CalcError {
    CalcError::incompatible_pairing(metal.role.display_name(), composite.role.display_name())
}

fn panel_thickness(panel: &StructuralElement) -> CalcResult<f64> {
    panel.thickness_mm.ok_or_else(|| {
        CalcError::invalid_input(
            "thickness_mm",
            "none",
            format!("Panel of grade {} has no thickness", panel.material.grade),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loads::StrengthFactors;
    use crate::materials::MaterialRecord;

    fn metal() -> MaterialRecord {
        MaterialRecord::new(1, 70_000.0, 390.0, 8.0)
    }

    fn composite() -> MaterialRecord {
        MaterialRecord::new(1, 120_000.0, 900.0, 0.8)
    }

    #[test]
    fn test_load_basis_reference_values() {
        let input = AnalysisInput::new(
            StructuralElement::shelf(metal(), 100.0),
            StructuralElement::panel(composite(), 100.0, 2.0),
            StrengthFactors::new(180.0, 220.0),
        );
        let basis = LoadBasis::compute(&input).unwrap();
        assert_eq!(basis.strength, 861_244.02);
        assert_eq!(basis.linear_load, 8612.44);
        assert_eq!(basis.original_belt_thickness, 22.08);
    }

    #[test]
    fn test_linear_load_uses_shelf_width() {
        let input = AnalysisInput::new(
            StructuralElement::panel(metal(), 100.0, 2.0),
            StructuralElement::shelf(composite(), 50.0),
            StrengthFactors::new(180.0, 220.0),
        );
        let basis = LoadBasis::compute(&input).unwrap();
        assert_eq!(basis.strength, 861_244.02);
        assert_eq!(basis.linear_load, 17_224.88);
    }

    #[test]
    fn test_zero_width_is_division_by_zero() {
        let input = AnalysisInput::new(
            StructuralElement::shelf(metal(), 0.0),
            StructuralElement::panel(composite(), 100.0, 2.0),
            StrengthFactors::new(180.0, 220.0),
        );
        assert_eq!(
            LoadBasis::compute(&input),
            Err(CalcError::division_by_zero("linear load (flange width)"))
        );
    }

    #[test]
    fn test_zero_height_is_division_by_zero() {
        let input = AnalysisInput::new(
            StructuralElement::shelf(metal(), 100.0),
            StructuralElement::panel(composite(), 100.0, 2.0),
            StrengthFactors::new(180.0, 0.0),
        );
        assert!(matches!(
            LoadBasis::compute(&input),
            Err(CalcError::DivisionByZero { .. })
        ));
    }

    #[test]
    fn test_thicknesses_metal_shelf() {
        let (h1, h2) = resolve_thicknesses(
            &StructuralElement::shelf(metal(), 100.0),
            &StructuralElement::panel(composite(), 100.0, 2.0),
            8612.44,
            2,
        )
        .unwrap();
        assert_eq!(h1, 22.08);
        assert_eq!(h2, 2.0);
    }

    #[test]
    fn test_thicknesses_composite_shelf() {
        let (h1, h2) = resolve_thicknesses(
            &StructuralElement::panel(metal(), 100.0, 2.0),
            &StructuralElement::shelf(composite(), 100.0),
            8612.44,
            2,
        )
        .unwrap();
        assert_eq!(h1, 2.0);
        assert_eq!(h2, 9.57);
    }

    #[test]
    fn test_same_roles_rejected() {
        let err = resolve_thicknesses(
            &StructuralElement::shelf(metal(), 100.0),
            &StructuralElement::shelf(composite(), 100.0),
            8612.44,
            2,
        )
        .unwrap_err();
        assert_eq!(err, CalcError::incompatible_pairing("Shelf", "Shelf"));
    }

    #[test]
    fn test_panel_without_thickness() {
        let mut panel = StructuralElement::panel(composite(), 100.0, 2.0);
        panel.thickness_mm = None;
        let err = resolve_thicknesses(&StructuralElement::shelf(metal(), 100.0), &panel, 8612.44, 2)
            .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }
}
