use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use spar_core::calculations::SafetyAnalysis;
use spar_core::comparison::Orientation;
use spar_core::materials::Grade;

/// Strength analysis of hybrid metal/composite spar belts.
#[derive(Parser, Debug)]
#[command(name = "spar", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    /// RUST_LOG takes precedence when set.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the material catalog.
    Materials(MaterialsArgs),
    /// Analyse one metal/composite pairing.
    Pair(PairArgs),
    /// Sweep every pairing of a task variant from a study file.
    Compare(CompareArgs),
    /// Write a ready-to-run study file.
    Init(InitArgs),
}

/// Where materials come from. Without either flag the built-in catalog is used.
#[derive(Args, Debug, Clone, Default)]
#[group(required = false, multiple = false)]
pub struct CatalogSource {
    /// Bare catalog JSON file.
    #[arg(long, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Use the catalog embedded in a study file.
    #[arg(long, value_name = "PATH")]
    pub study: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Json,
}

#[derive(Args, Debug)]
pub struct MaterialsArgs {
    #[command(flatten)]
    pub source: CatalogSource,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Args, Debug)]
pub struct PairArgs {
    #[command(flatten)]
    pub source: CatalogSource,

    /// Metal grade (number or designation).
    #[arg(short, long, value_parser = parse_grade)]
    pub metal: Grade,

    /// Composite grade (number or designation).
    #[arg(short, long, value_parser = parse_grade)]
    pub composite: Grade,

    /// Bending moment M_bend (kN·m).
    #[arg(long = "moment", value_name = "M")]
    pub m_bend: f64,

    /// Section height H (mm).
    #[arg(long = "height", value_name = "H")]
    pub h: f64,

    /// Which material forms the flange.
    #[arg(short, long, default_value = "metal-shelf")]
    pub orientation: Orientation,

    /// Method to run. Repeat for several; all three when omitted.
    #[arg(long = "method", value_name = "METHOD")]
    pub methods: Vec<SafetyAnalysis>,

    /// Flange width (mm).
    #[arg(long, value_name = "MM")]
    pub width: Option<f64>,

    /// Panel thickness (mm).
    #[arg(long, value_name = "MM")]
    pub panel_thickness: Option<f64>,

    /// Safety factor both elements must reach.
    #[arg(long, default_value_t = 1.0)]
    pub required: f64,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Study file holding the catalog, load cases and task variants.
    #[arg(short, long, value_name = "PATH")]
    pub study: PathBuf,

    /// Task variant number.
    #[arg(short, long)]
    pub task: u32,

    /// Student group.
    #[arg(short, long)]
    pub group: String,

    /// Override the study's orientation.
    #[arg(short, long)]
    pub orientation: Option<Orientation>,

    /// Override the study's methods. Repeat for several.
    #[arg(long = "method", value_name = "METHOD")]
    pub methods: Vec<SafetyAnalysis>,

    /// Override the study's required safety factor.
    #[arg(long)]
    pub required: Option<f64>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Write the report here instead of stdout.
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Study file to create.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    #[arg(long, default_value = "")]
    pub author: String,

    /// Group the template task is assigned to.
    #[arg(long, default_value = "1")]
    pub group: String,

    /// Overwrite an existing file.
    #[arg(long)]
    pub force: bool,
}

fn parse_grade(s: &str) -> Result<Grade, String> {
    if s.trim().is_empty() {
        return Err("grade must not be empty".to_string());
    }
    Ok(Grade::parse(s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_pair_arguments() {
        let cli = Cli::parse_from([
            "spar", "pair", "-m", "1", "-c", "KMU-4L", "--moment", "180", "--height", "220",
            "--method", "joint", "-o", "composite-shelf",
        ]);
        let Commands::Pair(args) = cli.command else {
            panic!("expected pair");
        };
        assert_eq!(args.metal, Grade::Number(1));
        assert_eq!(args.composite, Grade::Name("KMU-4L".to_string()));
        assert_eq!(args.methods, vec![SafetyAnalysis::JointDeformation]);
        assert_eq!(args.orientation, Orientation::CompositeShelf);
        assert_eq!(args.required, 1.0);
    }

    #[test]
    fn test_unknown_method_is_rejected() {
        let parsed = Cli::try_parse_from([
            "spar", "pair", "-m", "1", "-c", "1", "--moment", "1", "--height", "1", "--method", "magic",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["spar", "-v", "-q", "materials"]).is_err());
        let cli = Cli::parse_from(["spar", "-vv", "materials", "--format", "csv"]);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_catalog_sources_are_exclusive() {
        assert!(Cli::try_parse_from(["spar", "materials", "--catalog", "a.json", "--study", "b.spar"]).is_err());
    }
}
