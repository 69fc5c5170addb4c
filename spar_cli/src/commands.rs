use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use spar_core::calculations::{AnalysisInput, SafetyAnalysis};
use spar_core::comparison::compare;
use spar_core::elements::ElementFactory;
use spar_core::file_io::{load_catalog, load_study, save_study};
use spar_core::loads::{GeometryParams, StrengthFactors};
use spar_core::materials::{standard_catalog, MaterialCatalog, MaterialCategory};
use spar_core::study::Study;

use crate::cli::{CatalogSource, CompareArgs, InitArgs, MaterialsArgs, OutputFormat, PairArgs};
use crate::error::{CliError, Result};
use crate::report;

fn resolve_catalog(source: &CatalogSource) -> Result<MaterialCatalog> {
    if let Some(path) = &source.study {
        log::info!("Using catalog from study '{}'", path.display());
        return Ok(load_study(path)?.catalog);
    }
    if let Some(path) = &source.catalog {
        log::info!("Using catalog file '{}'", path.display());
        return Ok(load_catalog(path)?);
    }
    log::debug!("Using built-in catalog");
    Ok(standard_catalog().clone())
}

fn methods_or_all(methods: &[SafetyAnalysis]) -> Vec<SafetyAnalysis> {
    if methods.is_empty() {
        SafetyAnalysis::ALL.to_vec()
    } else {
        methods.to_vec()
    }
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            log::info!("Writing report to '{}'", path.display());
            Ok(Box::new(BufWriter::new(File::create(path)?)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

pub fn materials(args: MaterialsArgs) -> Result<()> {
    let catalog = resolve_catalog(&args.source)?;
    let mut out = io::stdout().lock();
    match args.format {
        OutputFormat::Table => report::write_catalog_table(&mut out, &catalog)?,
        OutputFormat::Csv => report::write_catalog_csv(&mut out, &catalog)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &catalog)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

pub fn pair(args: PairArgs) -> Result<()> {
    if args.format == OutputFormat::Csv {
        return Err(CliError::Argument(
            "CSV output is only available for 'materials' and 'compare'".to_string(),
        ));
    }

    let catalog = resolve_catalog(&args.source)?;
    let defaults = GeometryParams::default();
    let geometry = GeometryParams {
        flange_width_mm: args.width.unwrap_or(defaults.flange_width_mm),
        panel_thickness_mm: args.panel_thickness.unwrap_or(defaults.panel_thickness_mm),
    };
    geometry.validate()?;

    let (metal_role, composite_role) = args.orientation.roles();
    let metal = ElementFactory::new(&catalog, MaterialCategory::Metal)
        .with_geometry(geometry)
        .create(metal_role, &args.metal)?;
    let composite = ElementFactory::new(&catalog, MaterialCategory::Composite)
        .with_geometry(geometry)
        .create(composite_role, &args.composite)?;
    let input = AnalysisInput::new(metal, composite, StrengthFactors::new(args.m_bend, args.h));

    log::info!(
        "Analysing metal {} + composite {} ({})",
        args.metal,
        args.composite,
        args.orientation
    );

    let results = methods_or_all(&args.methods)
        .iter()
        .map(|method| method.calculate(&input))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut out = io::stdout().lock();
    match args.format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &results)?;
            writeln!(out)?;
        }
        _ => {
            for result in &results {
                report::write_result_table(&mut out, result, args.required)?;
            }
        }
    }
    Ok(())
}

pub fn compare_task(args: CompareArgs) -> Result<()> {
    let study = load_study(&args.study)?;
    let mut request = study.comparison_request(args.task, &args.group)?;

    if let Some(orientation) = args.orientation {
        request.orientation = orientation;
    }
    if !args.methods.is_empty() {
        request.methods = args.methods.clone();
    }
    if let Some(required) = args.required {
        if !required.is_finite() || required <= 0.0 {
            return Err(CliError::Argument(format!(
                "required safety factor must be positive, got {}",
                required
            )));
        }
        request.required_safety_factor = required;
    }

    let comparison = compare(&request)?;

    let mut out = open_output(args.output.as_deref())?;
    match args.format {
        OutputFormat::Table => {
            let title = format!(
                "TASK {} / GROUP {}  (M = {}, H = {}, {})",
                args.task, args.group, request.factors.m_bend, request.factors.h, request.orientation
            );
            report::write_comparison_table(&mut out, &title, &comparison)?;
        }
        OutputFormat::Csv => report::write_comparison_csv(&mut out, &comparison)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &comparison)?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}

pub fn init(args: InitArgs) -> Result<()> {
    if args.path.exists() && !args.force {
        return Err(CliError::Argument(format!(
            "'{}' already exists (use --force to overwrite)",
            args.path.display()
        )));
    }

    let study = Study::template(args.author, args.group);
    save_study(&study, &args.path)?;
    log::info!("Wrote template study to '{}'", args.path.display());
    println!("Created {}", args.path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn init_args(path: PathBuf, force: bool) -> InitArgs {
        InitArgs {
            path,
            author: "Test".to_string(),
            group: "402".to_string(),
            force,
        }
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lab.spar");

        init(init_args(path.clone(), false)).unwrap();
        assert!(matches!(init(init_args(path.clone(), false)), Err(CliError::Argument(_))));
        init(init_args(path.clone(), true)).unwrap();

        assert_eq!(load_study(&path).unwrap().meta.group, "402");
    }

    #[test]
    fn test_compare_writes_csv_file() {
        let dir = tempfile::tempdir().unwrap();
        let study_path = dir.path().join("lab.spar");
        let csv_path = dir.path().join("report.csv");
        init(init_args(study_path.clone(), false)).unwrap();

        compare_task(CompareArgs {
            study: study_path,
            task: 7,
            group: "402".to_string(),
            orientation: None,
            methods: vec![SafetyAnalysis::JointDeformation],
            required: None,
            format: OutputFormat::Csv,
            output: Some(csv_path.clone()),
        })
        .unwrap();

        let text = std::fs::read_to_string(csv_path).unwrap();
        // header + 3 metals x 4 composites
        assert_eq!(text.lines().count(), 13);
        assert!(text.lines().skip(1).all(|l| l.contains(",joint,")));
    }

    #[test]
    fn test_compare_unknown_group() {
        let dir = tempfile::tempdir().unwrap();
        let study_path = dir.path().join("lab.spar");
        init(init_args(study_path.clone(), false)).unwrap();

        let err = compare_task(CompareArgs {
            study: study_path,
            task: 7,
            group: "999".to_string(),
            orientation: None,
            methods: Vec::new(),
            required: None,
            format: OutputFormat::Table,
            output: None,
        })
        .unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_methods_default_to_all() {
        assert_eq!(methods_or_all(&[]), SafetyAnalysis::ALL.to_vec());
        assert_eq!(
            methods_or_all(&[SafetyAnalysis::ReductionCoefficient]),
            vec![SafetyAnalysis::ReductionCoefficient]
        );
    }
}
