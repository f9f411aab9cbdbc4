use clap::{Args, Parser, Subcommand};
use gridplace::core::energy::scoring::Aggregation;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "GridPlace CLI - Arrange connected points on a square grid so that diagrams stay readable.",
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

    /// Set the number of threads used to run optimization chains in parallel.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Place a point set on a grid and optimize the placement by hill climbing.
    Place(PlaceArgs),
    /// Evaluate the energy of a saved layout.
    Score(ScoreArgs),
}

/// Arguments for the `place` subcommand.
#[derive(Args, Debug)]
pub struct PlaceArgs {
    // --- Point Set Source ---
    /// Layout file to read the point set from. If it already carries cells,
    /// optimization continues from that placement.
    #[arg(
        short,
        long,
        value_name = "PATH",
        required_unless_present = "points",
        conflicts_with = "points"
    )]
    pub input: Option<PathBuf>,

    /// Generate a random point set with this many points instead of reading one.
    #[arg(short = 'n', long, value_name = "INT", requires = "connections")]
    pub points: Option<usize>,

    /// Number of random connections for a generated point set.
    #[arg(short = 'm', long, value_name = "INT", requires = "points")]
    pub connections: Option<usize>,

    // --- Output ---
    /// Write the optimized layout (grid, cells and pixel centers) to this TOML file.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Do not print the ASCII rendering of the final grid.
    #[arg(long)]
    pub no_grid: bool,

    // --- Canvas Overrides ---
    /// Override the canvas width in pixels used to size grid cells.
    #[arg(short = 'w', long, value_name = "PIXELS")]
    pub canvas_width: Option<f64>,

    // --- Energy Overrides ---
    #[command(flatten)]
    pub energy: EnergyArgs,

    // --- Optimization Overrides ---
    /// Override the number of proposed moves per chain.
    #[arg(short = 'k', long, value_name = "INT")]
    pub iterations: Option<usize>,

    /// Stop every chain after this many seconds, even if iterations remain.
    #[arg(long, value_name = "SECONDS")]
    pub time_limit: Option<f64>,

    // --- Search Overrides ---
    /// Override the number of independent optimization chains.
    #[arg(long, value_name = "INT")]
    pub chains: Option<usize>,

    /// Seed for all random choices, making the run reproducible.
    #[arg(long, value_name = "INT")]
    pub seed: Option<u64>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S search.chains=8
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Energy function overrides shared by `place` and `score`.
#[derive(Args, Debug, Clone, Default)]
pub struct EnergyArgs {
    /// Override the weight of the total connection length.
    #[arg(long, value_name = "FLOAT")]
    pub length_weight: Option<f64>,

    /// Override the weight of the collinearity penalty.
    #[arg(long, value_name = "FLOAT")]
    pub collinearity_weight: Option<f64>,

    /// Override how per-connection values are combined ('total' or 'mean').
    #[arg(long, value_name = "MODE")]
    pub aggregation: Option<Aggregation>,
}

/// Arguments for the `score` subcommand.
#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Layout file carrying a point set and its cells.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub energy: EnergyArgs,

    /// Set a specific configuration value, overriding the config file.
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn place_accepts_generated_point_set() {
        let cli = Cli::try_parse_from(["gridplace", "place", "-n", "9", "-m", "12", "--seed", "3"])
            .unwrap();
        let Commands::Place(args) = cli.command else {
            panic!("Expected 'place' subcommand");
        };
        assert_eq!(args.points, Some(9));
        assert_eq!(args.connections, Some(12));
        assert_eq!(args.seed, Some(3));
        assert!(args.input.is_none());
    }

    #[test]
    fn place_requires_a_point_source() {
        assert!(Cli::try_parse_from(["gridplace", "place"]).is_err());
        assert!(Cli::try_parse_from(["gridplace", "place", "-n", "9"]).is_err());
    }

    #[test]
    fn place_rejects_input_together_with_generation() {
        let result = Cli::try_parse_from([
            "gridplace", "place", "-i", "a.toml", "-n", "4", "-m", "2",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn aggregation_flag_is_parsed() {
        let cli = Cli::try_parse_from([
            "gridplace",
            "score",
            "-i",
            "layout.toml",
            "--aggregation",
            "mean",
        ])
        .unwrap();
        let Commands::Score(args) = cli.command else {
            panic!("Expected 'score' subcommand");
        };
        assert_eq!(args.energy.aggregation, Some(Aggregation::Mean));
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::try_parse_from(["gridplace", "score", "-i", "x.toml", "-vv", "-j", "2"])
            .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.threads, Some(2));
    }
}
