//! # File I/O Module
//!
//! Loading and saving of study and catalog files. This is the only module
//! that touches the filesystem; the analysis itself never does.
//!
//! - **Atomic saves**: write to .tmp, sync, rename to prevent corruption
//! - **Version validation**: ensure schema compatibility
//! - **Record validation**: reject negative or non-finite material data
//!
//! ## File Format
//!
//! Studies are saved as `.spar` files containing JSON. Catalog files hold a
//! bare [`MaterialCatalog`] object.
//!
//! ## Example
//!
//! ```rust,no_run
//! use spar_core::file_io::{load_study, save_study};
//! use spar_core::study::Study;
//! use std::path::Path;
//!
//! let study = Study::template("Student", "402");
//! save_study(&study, Path::new("lab1.spar"))?;
//!
//! let loaded = load_study(Path::new("lab1.spar"))?;
//! assert_eq!(loaded.meta.group, "402");
//! # Ok::<(), spar_core::errors::CalcError>(())
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::errors::{CalcError, CalcResult};
use crate::materials::MaterialCatalog;
use crate::study::{Study, SCHEMA_VERSION};

/// Save a study with atomic write semantics.
///
/// The save process:
/// 1. Serialize study to JSON
/// 2. Write to a temporary file (.tmp)
/// 3. Sync to disk (fsync)
/// 4. Rename .tmp over the target (atomic on most filesystems)
pub fn save_study(study: &Study, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(study).map_err(|e| CalcError::SerializationError {
        reason: e.to_string(),
    })?;
    write_atomic(path, json.as_bytes())
}

/// Load a study from a file.
///
/// # Returns
///
/// * `Ok(Study)` - Successfully loaded and validated study
/// * `Err(CalcError::VersionMismatch)` - File version is incompatible
/// * `Err(CalcError::SerializationError)` - Invalid JSON
/// * `Err(CalcError::InvalidInput)` - Catalog or load data out of range
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_study(path: &Path) -> CalcResult<Study> {
    let study: Study = read_json(path)?;
    validate_version(&study.meta.version)?;
    study.validate()?;
    log::debug!(
        "Loaded study '{}' ({} metals, {} composites, {} load cases, {} tasks)",
        path.display(),
        study.catalog.metals.len(),
        study.catalog.composites.len(),
        study.load_cases.len(),
        study.tasks.len()
    );
    Ok(study)
}

/// Load a bare material catalog file.
pub fn load_catalog(path: &Path) -> CalcResult<MaterialCatalog> {
    let catalog: MaterialCatalog = read_json(path)?;
    catalog.validate()?;
    Ok(catalog)
}

/// Write bytes to `path` through a synced temporary file.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> CalcResult<()> {
    let tmp_path = path.with_extension(match path.extension() {
        Some(ext) => format!("{}.tmp", ext.to_string_lossy()),
        None => "tmp".to_string(),
    });

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(bytes).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        // Clean up temp file if rename fails
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> CalcResult<T> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file_parts: Vec<u32> = file_version
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();
    let current_parts: Vec<u32> = SCHEMA_VERSION
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();

    if file_parts.is_empty() || current_parts.is_empty() {
        return Err(mismatch());
    }

    // Major version must match
    if file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }

    // For 0.x versions the file may not be newer than we support
    if current_parts[0] == 0 && file_parts.len() > 1 && current_parts.len() > 1 && file_parts[1] > current_parts[1] {
        return Err(mismatch());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::MaterialRecord;

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roundtrip.spar");

        let study = Study::template("Test Student", "402");
        save_study(&study, &path).unwrap();

        let loaded = load_study(&path).unwrap();
        assert_eq!(loaded.meta.author, "Test Student");
        assert_eq!(loaded.tasks, study.tasks);
        assert_eq!(loaded.load_cases, study.load_cases);
    }

    #[test]
    fn test_atomic_save_creates_no_tmp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("atomic.spar");

        save_study(&Study::new("Test", "401"), &path).unwrap();

        assert!(!dir.path().join("atomic.spar.tmp").exists());
        assert!(path.exists());
    }

    #[test]
    fn test_load_rejects_invalid_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.spar");

        let mut study = Study::template("Test", "402");
        study.catalog.metals.push(MaterialRecord::new(99, -70_000.0, 390.0, 8.0));
        save_study(&study, &path).unwrap();

        assert!(matches!(load_study(&path), Err(CalcError::InvalidInput { .. })));
    }

    #[test]
    fn test_load_catalog_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("materials.json");
        fs::write(
            &path,
            r#"{ "metals": [ { "grade": 1, "E": 70000, "sigma_b": 390, "epsilon": 8 } ],
                 "composites": [ { "grade": "KMU-4L", "E": 120000, "sigma_b": 900, "epsilon": 0.8 } ] }"#,
        )
        .unwrap();

        let catalog = load_catalog(&path).unwrap();
        assert_eq!(catalog.metals.len(), 1);
        assert_eq!(catalog.composites[0].e_mpa, 120_000.0);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_catalog(&dir.path().join("nope.json")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.spar");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load_study(&path), Err(CalcError::SerializationError { .. })));
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.5").is_ok());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("garbage").is_err());
    }
}
