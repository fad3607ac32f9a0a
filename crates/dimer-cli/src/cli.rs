use crate::utils::parser;
use clap::{Args, Parser, Subcommand};
use dimergen::engine::config::Placement;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "DimerGen Contributors",
    version,
    about = "DimerGen CLI - Builds monomer + cluster dimer geometries and writes them as XYZ files.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads used by `--parallel` generation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate dimers for every monomer/cluster pair found in two directories.
    Generate(GenerateArgs),
    /// Combine a single monomer file with a single cluster file.
    Combine(CombineArgs),
}

/// Arguments for the `generate` subcommand.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    // --- Inputs and outputs ---
    /// Directory containing monomer `.xyz` files [default: ../molecules]
    #[arg(short, long, value_name = "DIR")]
    pub molecules: Option<PathBuf>,

    /// Directory containing cluster `.xyz` files [default: ../clusters]
    #[arg(short = 'k', long, value_name = "DIR")]
    pub clusters: Option<PathBuf>,

    /// Directory the dimer files are written to [default: .]
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Placement overrides ---
    /// Placement as 'distance:angle:x,y,z' (e.g., '4.0:90:0,0,1').
    /// Can be used multiple times; replaces the configured placements.
    #[arg(
        short,
        long = "placement",
        value_name = "D:A:X,Y,Z",
        value_parser = parser::parse_placement,
        allow_hyphen_values = true
    )]
    pub placements: Vec<Placement>,

    // --- Execution ---
    /// Process monomer/cluster combinations in parallel.
    #[arg(long)]
    pub parallel: bool,

    /// Write a CSV index of the generated files to this path.
    #[arg(long, value_name = "PATH")]
    pub manifest: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S output-dir=dimers
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `combine` subcommand.
#[derive(Args, Debug)]
pub struct CombineArgs {
    /// Path to the monomer `.xyz` file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub monomer: PathBuf,

    /// Path to the cluster `.xyz` file.
    #[arg(short = 'k', long, required = true, value_name = "PATH")]
    pub cluster: PathBuf,

    /// Separation of the centres of mass along z, in Angstroms [default: 4.0]
    #[arg(short, long, value_name = "FLOAT", allow_negative_numbers = true)]
    pub distance: Option<f64>,

    /// Rotation of the cluster, in degrees [default: 0.0]
    #[arg(short, long, value_name = "FLOAT", allow_negative_numbers = true)]
    pub angle: Option<f64>,

    /// Rotation axis as 'x,y,z' [default: 1,0,0]
    #[arg(long, value_name = "X,Y,Z", value_parser = parser::parse_axis, allow_hyphen_values = true)]
    pub axis: Option<[f64; 3]>,

    /// Directory the dimer file is written to.
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_accepts_repeated_placements() {
        let cli = Cli::parse_from([
            "dimergen",
            "generate",
            "-p",
            "4.0:0:1,0,0",
            "--placement",
            "5.5:-45:0,1,0",
        ]);
        let Commands::Generate(args) = cli.command else {
            panic!("Expected 'generate' subcommand");
        };
        assert_eq!(
            args.placements,
            vec![
                Placement::new(4.0, 0.0, [1.0, 0.0, 0.0]),
                Placement::new(5.5, -45.0, [0.0, 1.0, 0.0]),
            ]
        );
        assert!(args.molecules.is_none());
        assert!(!args.parallel);
    }

    #[test]
    fn generate_rejects_malformed_placement() {
        let result = Cli::try_parse_from(["dimergen", "generate", "-p", "4.0:90"]);
        assert!(result.is_err());
    }

    #[test]
    fn combine_parses_axis_and_negative_angle() {
        let cli = Cli::parse_from([
            "dimergen",
            "-vv",
            "combine",
            "-m",
            "water.xyz",
            "-k",
            "Ar2.xyz",
            "--angle",
            "-90",
            "--axis",
            "0,0,1",
        ]);
        assert_eq!(cli.verbose, 2);
        let Commands::Combine(args) = cli.command else {
            panic!("Expected 'combine' subcommand");
        };
        assert_eq!(args.angle, Some(-90.0));
        assert_eq!(args.axis, Some([0.0, 0.0, 1.0]));
        assert_eq!(args.distance, None);
        assert_eq!(args.output_dir, PathBuf::from("."));
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["dimergen", "-q", "-v", "generate"]);
        assert!(result.is_err());
    }
}
