mod defaults;

use crate::cli::{EnergyArgs, PlaceArgs, ScoreArgs};
use crate::error::{CliError, Result};
use defaults::DefaultsConfig;
use gridplace::core::energy::scoring::Aggregation;
use gridplace::engine::config as core_config;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct PartialCanvasConfig {
    width: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct PartialEnergyConfig {
    length_weight: Option<f64>,
    collinearity_weight: Option<f64>,
    aggregation: Option<Aggregation>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct PartialOptimizationConfig {
    iterations: Option<usize>,
    /// Seconds.
    time_limit: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct PartialSearchConfig {
    chains: Option<usize>,
    seed: Option<u64>,
}

/// The optional TOML configuration file. Every key may be omitted.
///
/// ```toml
/// [canvas]
/// width = 500
///
/// [energy]
/// length-weight = 1.0
/// collinearity-weight = 2.0
/// aggregation = "mean"
///
/// [optimization]
/// iterations = 200
/// time-limit = 1.5
///
/// [search]
/// chains = 8
/// seed = 42
/// ```
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialPlacementConfig {
    canvas: Option<PartialCanvasConfig>,
    energy: Option<PartialEnergyConfig>,
    optimization: Option<PartialOptimizationConfig>,
    search: Option<PartialSearchConfig>,
}

impl PartialPlacementConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Reads `path` when given; an absent file means "all defaults".
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Resolves the final workflow configuration. Precedence, highest first: command-line flags,
    /// `--set` values, the configuration file, built-in defaults.
    pub fn merge_with_cli(mut self, args: &PlaceArgs) -> Result<core_config::PlacementConfig> {
        self.apply_set_values(&args.set_values)?;
        let defaults = DefaultsConfig::default();

        let canvas = self.canvas.take().unwrap_or_default();
        let opt_config = self.optimization.take().unwrap_or_default();
        let search = self.search.take().unwrap_or_default();
        let energy = self.merge_energy(&args.energy, &defaults);

        let deadline = Self::merge_deadline(args.time_limit.or(opt_config.time_limit))?;

        core_config::PlacementConfigBuilder::new()
            .canvas_width(
                args.canvas_width
                    .or(canvas.width)
                    .unwrap_or(defaults.canvas_width),
            )
            .length_weight(energy.length_weight)
            .collinearity_weight(energy.collinearity_weight)
            .aggregation(energy.aggregation)
            .iterations(
                args.iterations
                    .or(opt_config.iterations)
                    .unwrap_or(defaults.iterations),
            )
            .deadline(deadline)
            .chains(args.chains.or(search.chains).unwrap_or(defaults.chains))
            .seed(args.seed.or(search.seed))
            .build()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    /// Resolves only the energy function, for commands that evaluate rather than optimize.
    pub fn merge_energy_with_cli(mut self, args: &ScoreArgs) -> Result<core_config::EnergyConfig> {
        self.apply_set_values(&args.set_values)?;
        let energy = self.merge_energy(&args.energy, &DefaultsConfig::default());
        core_config::EnergyConfig::new(
            energy.length_weight,
            energy.collinearity_weight,
            energy.aggregation,
        )
        .map_err(|e| CliError::Config(e.to_string()))
    }

    fn merge_energy(&mut self, args: &EnergyArgs, defaults: &DefaultsConfig) -> MergedEnergy {
        let file = self.energy.take().unwrap_or_default();
        MergedEnergy {
            length_weight: args
                .length_weight
                .or(file.length_weight)
                .unwrap_or(defaults.length_weight),
            collinearity_weight: args
                .collinearity_weight
                .or(file.collinearity_weight)
                .unwrap_or(defaults.collinearity_weight),
            aggregation: args
                .aggregation
                .or(file.aggregation)
                .unwrap_or(defaults.aggregation),
        }
    }

    fn merge_deadline(seconds: Option<f64>) -> Result<Option<Duration>> {
        seconds
            .map(|s| {
                Duration::try_from_secs_f64(s).map_err(|_| {
                    CliError::Config(format!(
                        "`optimization.time-limit` must be a non-negative number of seconds, got {}",
                        s
                    ))
                })
            })
            .transpose()
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let (key, value_str) = kv_pair.split_once('=').ok_or_else(|| {
                CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                ))
            })?;

            match key {
                "canvas.width" => {
                    self.canvas.get_or_insert_with(Default::default).width =
                        Some(parse_value(key, value_str)?);
                }
                "energy.length-weight" => {
                    self.energy
                        .get_or_insert_with(Default::default)
                        .length_weight = Some(parse_value(key, value_str)?);
                }
                "energy.collinearity-weight" => {
                    self.energy
                        .get_or_insert_with(Default::default)
                        .collinearity_weight = Some(parse_value(key, value_str)?);
                }
                "energy.aggregation" => {
                    self.energy.get_or_insert_with(Default::default).aggregation =
                        Some(parse_value(key, value_str)?);
                }
                "optimization.iterations" => {
                    self.optimization
                        .get_or_insert_with(Default::default)
                        .iterations = Some(parse_value(key, value_str)?);
                }
                "optimization.time-limit" => {
                    self.optimization
                        .get_or_insert_with(Default::default)
                        .time_limit = Some(parse_value(key, value_str)?);
                }
                "search.chains" => {
                    self.search.get_or_insert_with(Default::default).chains =
                        Some(parse_value(key, value_str)?);
                }
                "search.seed" => {
                    self.search.get_or_insert_with(Default::default).seed =
                        Some(parse_value(key, value_str)?);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}

struct MergedEnergy {
    length_weight: f64,
    collinearity_weight: f64,
    aggregation: Aggregation,
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        CliError::Config(format!("Invalid value for {}: {}", key, value))
    })
}
