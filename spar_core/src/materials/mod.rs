//! # Materials Catalog
//!
//! Material records for the two cooperating elements of a spar belt: the
//! metal grades and the composite (laminate) grades. The catalog is loaded
//! once and only ever read; elements keep their own copy of the record they
//! were built from.
//!
//! ## JSON Format
//!
//! Records use the short property names of the source material tables:
//!
//! ```json
//! {
//!   "metals": [
//!     { "grade": 1, "name": "D16T", "E": 72000, "sigma_b": 440, "epsilon": 11, "ro": 2800 }
//!   ],
//!   "composites": [
//!     { "grade": "KMU-4L", "E": 120000, "sigma_b": 900, "epsilon": 0.8 }
//!   ]
//! }
//! ```
//!
//! ## Example
//!
//! ```rust
//! use spar_core::materials::{standard_catalog, Grade, MaterialCategory};
//!
//! let catalog = standard_catalog();
//! let d16t = catalog.find(MaterialCategory::Metal, &Grade::Number(1)).unwrap();
//! assert_eq!(d16t.e_mpa, 72_000.0);
//! ```

pub mod standard;

pub use standard::standard_catalog;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Grade identifier of a catalog entry.
///
/// Source tables number their grades, but some use designations instead,
/// so both forms are accepted. Matching is by textual form: `Number(7)`
/// matches `Name("7")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Grade {
    Number(u32),
    Name(String),
}

impl Grade {
    /// Check whether two identifiers refer to the same grade
    pub fn matches(&self, other: &Grade) -> bool {
        match (self, other) {
            (Grade::Number(a), Grade::Number(b)) => a == b,
            (Grade::Name(a), Grade::Name(b)) => a.trim() == b.trim(),
            (Grade::Number(n), Grade::Name(s)) | (Grade::Name(s), Grade::Number(n)) => {
                s.trim() == n.to_string()
            }
        }
    }

    /// Parse user text, preferring the numeric form
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        match trimmed.parse::<u32>() {
            Ok(n) => Grade::Number(n),
            Err(_) => Grade::Name(trimmed.to_string()),
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Grade::Number(n) => write!(f, "{}", n),
            Grade::Name(s) => write!(f, "{}", s),
        }
    }
}

impl From<u32> for Grade {
    fn from(n: u32) -> Self {
        Grade::Number(n)
    }
}

impl From<&str> for Grade {
    fn from(s: &str) -> Self {
        Grade::parse(s)
    }
}

/// Catalog partition a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaterialCategory {
    Metal,
    Composite,
}

impl MaterialCategory {
    /// Lower-case label used in messages
    pub fn label(&self) -> &'static str {
        match self {
            MaterialCategory::Metal => "metal",
            MaterialCategory::Composite => "composite",
        }
    }
}

impl fmt::Display for MaterialCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Property record for one material grade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialRecord {
    /// Grade identifier used for lookups
    pub grade: Grade,

    /// Display designation (e.g., "D16T"); optional in source tables
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Elastic modulus E (MPa)
    #[serde(rename = "E")]
    pub e_mpa: f64,

    /// Ultimate tensile strength sigma_b (MPa)
    #[serde(rename = "sigma_b")]
    pub sigma_b_mpa: f64,

    /// Relative elongation at failure (%)
    #[serde(rename = "epsilon")]
    pub epsilon_pct: f64,

    /// Density (kg/m³). Carried for reports only.
    #[serde(rename = "ro", default, skip_serializing_if = "Option::is_none")]
    pub density_kg_m3: Option<f64>,
}

impl MaterialRecord {
    /// Create a record without a display name or density
    pub fn new(grade: impl Into<Grade>, e_mpa: f64, sigma_b_mpa: f64, epsilon_pct: f64) -> Self {
        MaterialRecord {
            grade: grade.into(),
            name: None,
            e_mpa,
            sigma_b_mpa,
            epsilon_pct,
            density_kg_m3: None,
        }
    }

    /// Builder: attach a display designation
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builder: attach a density
    pub fn with_density(mut self, density_kg_m3: f64) -> Self {
        self.density_kg_m3 = Some(density_kg_m3);
        self
    }

    /// Name for tables: the designation if present, else the grade
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => self.grade.to_string(),
        }
    }

    /// Reject negative or non-finite properties.
    ///
    /// Zero moduli and strengths are allowed here; the analysis reports
    /// them as `DivisionByZero` where they end up in a denominator.
    pub fn validate(&self) -> CalcResult<()> {
        let checks = [
            ("E", self.e_mpa),
            ("sigma_b", self.sigma_b_mpa),
            ("epsilon", self.epsilon_pct),
        ];
        for (field, value) in checks {
            if !value.is_finite() || value < 0.0 {
                return Err(CalcError::invalid_input(
                    format!("{}[{}]", field, self.grade),
                    value.to_string(),
                    "Material property must be a finite, non-negative number",
                ));
            }
        }
        if let Some(ro) = self.density_kg_m3 {
            if !ro.is_finite() || ro < 0.0 {
                return Err(CalcError::invalid_input(
                    format!("ro[{}]", self.grade),
                    ro.to_string(),
                    "Density must be a finite, non-negative number",
                ));
            }
        }
        Ok(())
    }
}

/// Metal and composite grades, queried separately.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaterialCatalog {
    #[serde(default)]
    pub metals: Vec<MaterialRecord>,
    #[serde(default)]
    pub composites: Vec<MaterialRecord>,
}

impl MaterialCatalog {
    pub fn new(metals: Vec<MaterialRecord>, composites: Vec<MaterialRecord>) -> Self {
        MaterialCatalog { metals, composites }
    }

    /// Records of one partition, in catalog order
    pub fn category(&self, category: MaterialCategory) -> &[MaterialRecord] {
        match category {
            MaterialCategory::Metal => &self.metals,
            MaterialCategory::Composite => &self.composites,
        }
    }

    /// First record of `category` whose grade matches.
    pub fn find(&self, category: MaterialCategory, grade: &Grade) -> CalcResult<&MaterialRecord> {
        self.category(category)
            .iter()
            .find(|record| record.grade.matches(grade))
            .ok_or_else(|| CalcError::material_not_found(grade.to_string(), category.label()))
    }

    /// Validate every record in both partitions
    pub fn validate(&self) -> CalcResult<()> {
        self.metals
            .iter()
            .chain(self.composites.iter())
            .try_for_each(MaterialRecord::validate)
    }

    pub fn is_empty(&self) -> bool {
        self.metals.is_empty() && self.composites.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_catalog() -> MaterialCatalog {
        MaterialCatalog::new(
            vec![
                MaterialRecord::new(1, 72_000.0, 440.0, 11.0).with_name("D16T"),
                MaterialRecord::new(2, 70_000.0, 390.0, 8.0),
            ],
            vec![MaterialRecord::new("KMU-4L", 120_000.0, 900.0, 0.8)],
        )
    }

    #[test]
    fn test_grade_matching() {
        assert!(Grade::Number(7).matches(&Grade::Name("7".to_string())));
        assert!(Grade::Name(" 7 ".to_string()).matches(&Grade::Number(7)));
        assert!(!Grade::Number(7).matches(&Grade::Number(8)));
        assert!(Grade::parse("KMU-4L").matches(&Grade::Name("KMU-4L".to_string())));
    }

    #[test]
    fn test_find_returns_first_match() {
        let mut catalog = small_catalog();
        catalog.metals.push(MaterialRecord::new(2, 1.0, 1.0, 1.0));
        let record = catalog.find(MaterialCategory::Metal, &Grade::Number(2)).unwrap();
        assert_eq!(record.e_mpa, 70_000.0);
    }

    #[test]
    fn test_empty_catalog() {
        assert!(MaterialCatalog::default().is_empty());
        assert!(!small_catalog().is_empty());
    }

    #[test]
    fn test_find_is_partitioned() {
        let catalog = small_catalog();
        let err = catalog
            .find(MaterialCategory::Composite, &Grade::Number(1))
            .unwrap_err();
        assert_eq!(err, CalcError::material_not_found("1", "composite"));
    }

    #[test]
    fn test_validate_rejects_negative_modulus() {
        let mut catalog = small_catalog();
        catalog.composites[0].e_mpa = -1.0;
        assert!(catalog.validate().is_err());
        assert!(small_catalog().validate().is_ok());
    }

    #[test]
    fn test_record_json_field_names() {
        let json = r#"{ "grade": 3, "E": 71000, "sigma_b": 420, "epsilon": 8, "ro": 2800 }"#;
        let record: MaterialRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.grade, Grade::Number(3));
        assert_eq!(record.sigma_b_mpa, 420.0);
        assert_eq!(record.density_kg_m3, Some(2800.0));
        assert_eq!(record.display_name(), "3");

        let out = serde_json::to_string(&record).unwrap();
        assert!(out.contains("\"sigma_b\":420.0"));
        assert!(!out.contains("name"));
    }
}
