//! Text and CSV renderings of catalogs, single analyses and sweeps.

use std::io::Write;

use serde::Serialize;
use spar_core::calculations::{AnalysisResult, ElementResult, MethodTerms, SafetyAnalysis};
use spar_core::comparison::ComparisonReport;
use spar_core::materials::{MaterialCatalog, MaterialCategory};

use crate::error::Result;

const RULE: &str = "═══════════════════════════════════════════════════════════════════";

fn status(passes: bool) -> &'static str {
    if passes {
        "✓"
    } else {
        "✗"
    }
}

pub fn write_catalog_table<W: Write>(out: &mut W, catalog: &MaterialCatalog) -> Result<()> {
    for category in [MaterialCategory::Metal, MaterialCategory::Composite] {
        writeln!(out, "{}", RULE)?;
        writeln!(out, "  {}", category.label().to_uppercase())?;
        writeln!(out, "{}", RULE)?;
        writeln!(
            out,
            "  {:<8} {:<12} {:>10} {:>10} {:>8} {:>10}",
            "Grade", "Name", "E, MPa", "σb, MPa", "ε, %", "ρ, kg/m³"
        )?;
        for record in catalog.category(category) {
            writeln!(
                out,
                "  {:<8} {:<12} {:>10.0} {:>10.0} {:>8.2} {:>10}",
                record.grade.to_string(),
                record.name.as_deref().unwrap_or("-"),
                record.e_mpa,
                record.sigma_b_mpa,
                record.epsilon_pct,
                record
                    .density_kg_m3
                    .map(|d| format!("{:.0}", d))
                    .unwrap_or_else(|| "-".to_string())
            )?;
        }
        writeln!(out)?;
    }
    Ok(())
}

#[derive(Serialize)]
struct CatalogRow<'a> {
    category: &'static str,
    grade: String,
    name: &'a str,
    e_mpa: f64,
    sigma_b_mpa: f64,
    epsilon_pct: f64,
    density_kg_m3: Option<f64>,
}

pub fn write_catalog_csv<W: Write>(out: W, catalog: &MaterialCatalog) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for category in [MaterialCategory::Metal, MaterialCategory::Composite] {
        for record in catalog.category(category) {
            writer.serialize(CatalogRow {
                category: category.label(),
                grade: record.grade.to_string(),
                name: record.name.as_deref().unwrap_or(""),
                e_mpa: record.e_mpa,
                sigma_b_mpa: record.sigma_b_mpa,
                epsilon_pct: record.epsilon_pct,
                density_kg_m3: record.density_kg_m3,
            })?;
        }
    }
    writer.flush()?;
    Ok(())
}

fn write_element<W: Write>(out: &mut W, element: &ElementResult, required: f64) -> Result<()> {
    writeln!(
        out,
        "  {:<6} {:<9} {:<10} h = {:>7.2} mm  N = {:>10.2}  σ = {:>8.2} / {:>6.0} MPa  n = {:>5.2} {}",
        element.role.to_string(),
        element.category.label(),
        element.name,
        element.thickness_mm,
        element.internal_load,
        element.stress_mpa,
        element.sigma_b_mpa,
        element.safety_factor,
        status(element.safety_factor >= required)
    )?;
    Ok(())
}

fn write_terms<W: Write>(out: &mut W, terms: &MethodTerms) -> Result<()> {
    match terms {
        MethodTerms::EffortDistribution { k1, k2 } => {
            writeln!(out, "  k1 = E1·h1 = {:.2}   k2 = E2·h2 = {:.2}", k1, k2)?;
        }
        MethodTerms::JointDeformation {
            h_sum,
            h1_fraction,
            h2_fraction,
            e_x,
            sigma_x,
        } => {
            writeln!(
                out,
                "  Σh = {:.2} mm   f1 = {:.2}   f2 = {:.2}   Ex = {:.2} MPa   σx = {:.2} MPa",
                h_sum, h1_fraction, h2_fraction, e_x, sigma_x
            )?;
        }
        MethodTerms::ReductionCoefficient {
            phi1,
            phi2,
            h_red,
            sigma_red,
        } => {
            writeln!(
                out,
                "  φ1 = {:.2}   φ2 = {:.2}   h_red = {:.2} mm   σ_red = {:.2} MPa",
                phi1, phi2, h_red, sigma_red
            )?;
        }
    }
    Ok(())
}

pub fn write_result_table<W: Write>(out: &mut W, result: &AnalysisResult, required: f64) -> Result<()> {
    writeln!(out, "{}", RULE)?;
    writeln!(out, "  {}", result.method.display_name().to_uppercase())?;
    writeln!(out, "{}", RULE)?;
    writeln!(
        out,
        "  Strength = {:.2}   q = {:.2}   h0 = {:.2} mm",
        result.strength, result.linear_load, result.original_belt_thickness
    )?;
    write_terms(out, &result.terms)?;
    writeln!(out)?;
    for element in result.rows() {
        write_element(out, element, required)?;
    }
    writeln!(out)?;
    writeln!(
        out,
        "  RESULT: {} (n_min = {:.2}, required {:.2})",
        if result.passes(required) { "PASS" } else { "FAIL" },
        result.min_safety_factor(),
        required
    )?;
    writeln!(out)?;
    Ok(())
}

pub fn write_comparison_table<W: Write>(out: &mut W, title: &str, report: &ComparisonReport) -> Result<()> {
    writeln!(out, "{}", RULE)?;
    writeln!(out, "  {}", title)?;
    writeln!(out, "{}", RULE)?;
    writeln!(
        out,
        "  {:<8} {:<10} {:<10} {:>7} {:>7} {:>8} {:>8} {:>6} {:>6}",
        "Metal", "Composite", "Method", "h1", "h2", "σ1", "σ2", "n1", "n2"
    )?;
    for r in &report.results {
        let (n1, n2) = r.result.safety_factors();
        writeln!(
            out,
            "  {:<8} {:<10} {:<10} {:>7.2} {:>7.2} {:>8.2} {:>8.2} {:>6.2} {:>6.2} {}",
            r.metal_grade.to_string(),
            r.composite_grade.to_string(),
            r.result.method.code(),
            r.result.metal.thickness_mm,
            r.result.composite.thickness_mm,
            r.result.metal.stress_mpa,
            r.result.composite.stress_mpa,
            n1,
            n2,
            status(r.passes)
        )?;
    }

    if !report.failures.is_empty() {
        writeln!(out)?;
        writeln!(out, "  Skipped:")?;
        for f in &report.failures {
            writeln!(
                out,
                "    {} + {} ({}): {}",
                f.metal_grade,
                f.composite_grade,
                f.method.map(|m| m.code()).unwrap_or("all"),
                f.error
            )?;
        }
    }

    writeln!(out)?;
    writeln!(
        out,
        "  {} of {} pass n ≥ {:.2}",
        report.passing().count(),
        report.results.len(),
        report.required_safety_factor
    )?;
    for method in SafetyAnalysis::ALL {
        if let Some(best) = report.best(method) {
            writeln!(
                out,
                "  Best ({}): metal {} + composite {}, n_min = {:.2}",
                method.code(),
                best.metal_grade,
                best.composite_grade,
                best.result.min_safety_factor()
            )?;
        }
    }
    writeln!(out, "{}", RULE)?;
    Ok(())
}

#[derive(Serialize)]
struct ComparisonRow {
    metal_grade: String,
    composite_grade: String,
    method: &'static str,
    metal_role: String,
    strength: f64,
    linear_load: f64,
    h1_mm: f64,
    h2_mm: f64,
    n1_load: f64,
    n2_load: f64,
    sigma1_mpa: f64,
    sigma2_mpa: f64,
    n1: f64,
    n2: f64,
    passes: bool,
}

pub fn write_comparison_csv<W: Write>(out: W, report: &ComparisonReport) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for r in &report.results {
        let (metal, composite) = (&r.result.metal, &r.result.composite);
        writer.serialize(ComparisonRow {
            metal_grade: r.metal_grade.to_string(),
            composite_grade: r.composite_grade.to_string(),
            method: r.result.method.code(),
            metal_role: metal.role.to_string(),
            strength: r.result.strength,
            linear_load: r.result.linear_load,
            h1_mm: metal.thickness_mm,
            h2_mm: composite.thickness_mm,
            n1_load: metal.internal_load,
            n2_load: composite.internal_load,
            sigma1_mpa: metal.stress_mpa,
            sigma2_mpa: composite.stress_mpa,
            n1: metal.safety_factor,
            n2: composite.safety_factor,
            passes: r.passes,
        })?;
    }
    writer.flush()?;
    Ok(())
}
