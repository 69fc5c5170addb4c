//! Built-in Material Catalog
//!
//! Typical handbook properties for spar-belt metals and unidirectional
//! composites. Used when a study does not ship its own catalog.
//!
//! Metal grades are numbered 1..=6, composite grades 1..=6, so task
//! assignments such as `"1,3,5"` and `"2-4"` resolve against it directly.

use once_cell::sync::Lazy;

use super::{MaterialCatalog, MaterialRecord};

static STANDARD_CATALOG: Lazy<MaterialCatalog> = Lazy::new(|| {
    MaterialCatalog::new(
        vec![
            metal(1, "D16T", 72_000.0, 440.0, 11.0, 2800.0),
            metal(2, "V95T1", 72_000.0, 540.0, 8.0, 2850.0),
            metal(3, "AK4-1T1", 72_000.0, 420.0, 8.0, 2800.0),
            metal(4, "1163T", 72_000.0, 430.0, 13.0, 2780.0),
            metal(5, "VT6", 115_000.0, 1100.0, 10.0, 4430.0),
            metal(6, "30KhGSA", 210_000.0, 1100.0, 10.0, 7850.0),
        ],
        vec![
            // Unidirectional laminates, fibre direction along the spar
            composite(1, "KMU-4L", 120_000.0, 900.0, 0.8, 1500.0),
            composite(2, "CFRP T300/epoxy", 135_000.0, 1500.0, 1.1, 1600.0),
            composite(3, "CFRP HM/epoxy", 180_000.0, 1000.0, 0.5, 1600.0),
            composite(4, "GFRP E-glass/epoxy", 45_000.0, 1100.0, 2.4, 2000.0),
            composite(5, "Aramid/epoxy", 76_000.0, 1400.0, 1.8, 1380.0),
            composite(6, "Boron/epoxy", 207_000.0, 1300.0, 0.6, 2000.0),
        ],
    )
});

fn metal(grade: u32, name: &str, e_mpa: f64, sigma_b_mpa: f64, epsilon_pct: f64, ro: f64) -> MaterialRecord {
    MaterialRecord::new(grade, e_mpa, sigma_b_mpa, epsilon_pct)
        .with_name(name)
        .with_density(ro)
}

fn composite(grade: u32, name: &str, e_mpa: f64, sigma_b_mpa: f64, epsilon_pct: f64, ro: f64) -> MaterialRecord {
    MaterialRecord::new(grade, e_mpa, sigma_b_mpa, epsilon_pct)
        .with_name(name)
        .with_density(ro)
}

/// The built-in catalog, initialised on first use.
pub fn standard_catalog() -> &'static MaterialCatalog {
    &STANDARD_CATALOG
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::{Grade, MaterialCategory};

    #[test]
    fn test_standard_catalog_is_valid() {
        let catalog = standard_catalog();
        assert!(catalog.validate().is_ok());
        assert_eq!(catalog.metals.len(), 6);
        assert_eq!(catalog.composites.len(), 6);
    }

    #[test]
    fn test_grades_are_unique_per_partition() {
        let catalog = standard_catalog();
        for category in [MaterialCategory::Metal, MaterialCategory::Composite] {
            let records = catalog.category(category);
            for (i, a) in records.iter().enumerate() {
                for b in &records[i + 1..] {
                    assert!(!a.grade.matches(&b.grade), "duplicate grade {}", a.grade);
                }
            }
        }
    }

    #[test]
    fn test_lookup_by_number() {
        let record = standard_catalog()
            .find(MaterialCategory::Composite, &Grade::Number(4))
            .unwrap();
        assert_eq!(record.display_name(), "GFRP E-glass/epoxy");
    }
}
