//! # Structural Elements
//!
//! A spar belt is built from two cooperating elements: the **Shelf**
//! (flange) and the **Panel** (skin). Each wraps one material record and
//! carries the geometry the analysis needs.
//!
//! The Panel's thickness is a fixed input. The Shelf's thickness is derived
//! by the analysis from the load it must carry, so a Shelf is built without
//! one.
//!
//! ## Example
//!
//! ```rust
//! use spar_core::elements::{ElementFactory, ElementRole};
//! use spar_core::materials::{standard_catalog, Grade, MaterialCategory};
//!
//! let metals = ElementFactory::new(standard_catalog(), MaterialCategory::Metal);
//! let shelf = metals.create(ElementRole::Shelf, &Grade::Number(1)).unwrap();
//! assert_eq!(shelf.width_mm, 100.0);
//! assert!(shelf.thickness_mm.is_none());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::loads::GeometryParams;
use crate::materials::{Grade, MaterialCatalog, MaterialCategory, MaterialRecord};

/// Role of an element in the spar belt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementRole {
    /// Load-carrying flange strip
    Shelf,
    /// Skin bonded to the flange
    Panel,
}

impl ElementRole {
    pub fn display_name(&self) -> &'static str {
        match self {
            ElementRole::Shelf => "Shelf",
            ElementRole::Panel => "Panel",
        }
    }

    /// The other role of the pair
    pub fn opposite(&self) -> Self {
        match self {
            ElementRole::Shelf => ElementRole::Panel,
            ElementRole::Panel => ElementRole::Shelf,
        }
    }
}

impl fmt::Display for ElementRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for ElementRole {
    type Err = CalcError;

    /// Accepts `shelf`/`flange` and `panel`/`skin`, any case.
    fn from_str(s: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "shelf" | "flange" => Ok(ElementRole::Shelf),
            "panel" | "skin" => Ok(ElementRole::Panel),
            _ => Err(CalcError::unsupported_element_kind(s)),
        }
    }
}

/// A material record with its role and geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuralElement {
    pub role: ElementRole,

    /// Material the element is made of
    pub material: MaterialRecord,

    /// Element width in mm. The Shelf's width is the flange width the
    /// linear load is spread over.
    pub width_mm: f64,

    /// Fixed thickness in mm, used as-is by the analysis; `None` for a
    /// Shelf, whose thickness is derived
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thickness_mm: Option<f64>,
}

impl StructuralElement {
    /// Shelf with the given width and no fixed thickness
    pub fn shelf(material: MaterialRecord, width_mm: f64) -> Self {
        StructuralElement {
            role: ElementRole::Shelf,
            material,
            width_mm,
            thickness_mm: None,
        }
    }

    /// Panel with the given width and thickness
    pub fn panel(material: MaterialRecord, width_mm: f64, thickness_mm: f64) -> Self {
        StructuralElement {
            role: ElementRole::Panel,
            material,
            width_mm,
            thickness_mm: Some(thickness_mm),
        }
    }

    pub fn is_shelf(&self) -> bool {
        self.role == ElementRole::Shelf
    }

    /// Width and any fixed thickness must be finite and not negative.
    /// Zero dimensions pass here and surface as `DivisionByZero`.
    pub fn validate(&self) -> CalcResult<()> {
        if !self.width_mm.is_finite() || self.width_mm < 0.0 {
            return Err(CalcError::invalid_input(
                "width_mm",
                self.width_mm.to_string(),
                format!("{} width must be a finite, non-negative number", self.role),
            ));
        }
        if let Some(thickness) = self.thickness_mm {
            if !thickness.is_finite() || thickness < 0.0 {
                return Err(CalcError::invalid_input(
                    "thickness_mm",
                    thickness.to_string(),
                    format!("{} thickness must be a finite, non-negative number", self.role),
                ));
            }
        }
        Ok(())
    }

    /// Elastic modulus of the element's material (MPa)
    pub fn e_mpa(&self) -> f64 {
        self.material.e_mpa
    }

    /// Ultimate strength of the element's material (MPa)
    pub fn sigma_b_mpa(&self) -> f64 {
        self.material.sigma_b_mpa
    }
}

/// Builds elements from one partition of a material catalog.
///
/// Geometry comes from [`GeometryParams`]; the defaults give a 100 mm wide
/// Shelf and a 2 mm thick Panel.
#[derive(Debug, Clone, Copy)]
pub struct ElementFactory<'a> {
    catalog: &'a MaterialCatalog,
    category: MaterialCategory,
    geometry: GeometryParams,
}

impl<'a> ElementFactory<'a> {
    pub fn new(catalog: &'a MaterialCatalog, category: MaterialCategory) -> Self {
        ElementFactory {
            catalog,
            category,
            geometry: GeometryParams::default(),
        }
    }

    /// Builder: use this geometry instead of the defaults
    pub fn with_geometry(mut self, geometry: GeometryParams) -> Self {
        self.geometry = geometry;
        self
    }

    /// Look up `grade` and wrap it as an element of `role`.
    ///
    /// # Errors
    ///
    /// * `MaterialNotFound` - no record in this partition matches `grade`
    pub fn create(&self, role: ElementRole, grade: &Grade) -> CalcResult<StructuralElement> {
        let material = self.catalog.find(self.category, grade)?.clone();
        let element = match role {
            ElementRole::Shelf => StructuralElement::shelf(material, self.geometry.flange_width_mm),
            ElementRole::Panel => StructuralElement::panel(
                material,
                self.geometry.flange_width_mm,
                self.geometry.panel_thickness_mm,
            ),
        };
        Ok(element)
    }

    /// Like [`create`](Self::create), for a role given as text.
    ///
    /// # Errors
    ///
    /// * `UnsupportedElementKind` - `tag` names neither role
    /// * `MaterialNotFound` - no record in this partition matches `grade`
    pub fn create_from_tag(&self, tag: &str, grade: &Grade) -> CalcResult<StructuralElement> {
        let role: ElementRole = tag.parse()?;
        self.create(role, grade)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> MaterialCatalog {
        MaterialCatalog::new(
            vec![MaterialRecord::new(1, 70_000.0, 390.0, 8.0)],
            vec![MaterialRecord::new(1, 120_000.0, 900.0, 0.8)],
        )
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("Shelf".parse::<ElementRole>().unwrap(), ElementRole::Shelf);
        assert_eq!(" skin ".parse::<ElementRole>().unwrap(), ElementRole::Panel);
        assert_eq!(
            "rib".parse::<ElementRole>(),
            Err(CalcError::unsupported_element_kind("rib"))
        );
    }

    #[test]
    fn test_factory_defaults() {
        let catalog = catalog();
        let factory = ElementFactory::new(&catalog, MaterialCategory::Composite);

        let panel = factory.create(ElementRole::Panel, &Grade::Number(1)).unwrap();
        assert_eq!(panel.thickness_mm, Some(2.0));
        assert_eq!(panel.e_mpa(), 120_000.0);

        let shelf = factory.create(ElementRole::Shelf, &Grade::Number(1)).unwrap();
        assert_eq!(shelf.width_mm, 100.0);
        assert_eq!(shelf.thickness_mm, None);
    }

    #[test]
    fn test_factory_uses_injected_geometry() {
        let catalog = catalog();
        let factory = ElementFactory::new(&catalog, MaterialCategory::Metal)
            .with_geometry(GeometryParams::new(80.0, 3.5));
        let panel = factory.create(ElementRole::Panel, &Grade::Number(1)).unwrap();
        assert_eq!(panel.width_mm, 80.0);
        assert_eq!(panel.thickness_mm, Some(3.5));
    }

    #[test]
    fn test_factory_failures() {
        let catalog = catalog();
        let factory = ElementFactory::new(&catalog, MaterialCategory::Metal);

        assert_eq!(
            factory.create(ElementRole::Shelf, &Grade::Number(9)),
            Err(CalcError::material_not_found("9", "metal"))
        );
        assert!(matches!(
            factory.create_from_tag("stringer", &Grade::Number(1)),
            Err(CalcError::UnsupportedElementKind { .. })
        ));
        assert!(factory.create_from_tag("flange", &Grade::Number(1)).unwrap().is_shelf());
    }

    #[test]
    fn test_element_validation() {
        let metal = MaterialRecord::new(1, 70_000.0, 390.0, 8.0);
        assert!(StructuralElement::shelf(metal.clone(), 100.0).validate().is_ok());
        assert!(StructuralElement::panel(metal.clone(), 100.0, 0.0).validate().is_ok());

        assert!(matches!(
            StructuralElement::shelf(metal.clone(), -100.0).validate(),
            Err(CalcError::InvalidInput { ref field, .. }) if field == "width_mm"
        ));
        assert!(matches!(
            StructuralElement::panel(metal, 100.0, -2.0).validate(),
            Err(CalcError::InvalidInput { ref field, .. }) if field == "thickness_mm"
        ));
    }
}
