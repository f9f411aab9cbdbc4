use crate::core::energy::scoring::{Aggregation, EnergyWeights, ScoringError};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_ITERATIONS: usize = 20;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid value for parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EnergyConfig {
    pub weights: EnergyWeights,
    pub aggregation: Aggregation,
}

impl EnergyConfig {
    /// Validated energy configuration. Weights must be finite and non-negative.
    pub fn new(
        length_weight: f64,
        collinearity_weight: f64,
        aggregation: Aggregation,
    ) -> Result<Self, ConfigError> {
        let weights =
            EnergyWeights::new(length_weight, collinearity_weight).map_err(|e| match e {
                ScoringError::InvalidWeight { term, value } => ConfigError::InvalidParameter {
                    name: if term == "length" {
                        "length_weight"
                    } else {
                        "collinearity_weight"
                    },
                    reason: format!("expected a finite, non-negative weight, got {}", value),
                },
                other => ConfigError::InvalidParameter {
                    name: "weights",
                    reason: other.to_string(),
                },
            })?;
        Ok(Self {
            weights,
            aggregation,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptimizationConfig {
    pub iterations: usize,
    pub deadline: Option<Duration>,
}

impl Default for OptimizationConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            deadline: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacementConfig {
    pub canvas_width: f64,
    pub energy: EnergyConfig,
    pub optimization: OptimizationConfig,
    pub chains: usize,
    pub seed: Option<u64>,
}

#[derive(Default)]
pub struct PlacementConfigBuilder {
    canvas_width: Option<f64>,
    length_weight: Option<f64>,
    collinearity_weight: Option<f64>,
    aggregation: Option<Aggregation>,
    iterations: Option<usize>,
    deadline: Option<Duration>,
    chains: Option<usize>,
    seed: Option<u64>,
}

impl PlacementConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn canvas_width(mut self, width: f64) -> Self {
        self.canvas_width = Some(width);
        self
    }
    pub fn length_weight(mut self, weight: f64) -> Self {
        self.length_weight = Some(weight);
        self
    }
    pub fn collinearity_weight(mut self, weight: f64) -> Self {
        self.collinearity_weight = Some(weight);
        self
    }
    pub fn aggregation(mut self, aggregation: Aggregation) -> Self {
        self.aggregation = Some(aggregation);
        self
    }
    pub fn iterations(mut self, iterations: usize) -> Self {
        self.iterations = Some(iterations);
        self
    }
    pub fn deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }
    pub fn chains(mut self, chains: usize) -> Self {
        self.chains = Some(chains);
        self
    }
    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn build(self) -> Result<PlacementConfig, ConfigError> {
        let canvas_width = self
            .canvas_width
            .ok_or(ConfigError::MissingParameter("canvas_width"))?;
        if !canvas_width.is_finite() || canvas_width <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "canvas_width",
                reason: format!("expected a positive number of pixels, got {}", canvas_width),
            });
        }

        let length_weight = self
            .length_weight
            .ok_or(ConfigError::MissingParameter("length_weight"))?;
        let collinearity_weight = self
            .collinearity_weight
            .ok_or(ConfigError::MissingParameter("collinearity_weight"))?;
        let aggregation = self
            .aggregation
            .ok_or(ConfigError::MissingParameter("aggregation"))?;
        let energy = EnergyConfig::new(length_weight, collinearity_weight, aggregation)?;

        let optimization = OptimizationConfig {
            iterations: self
                .iterations
                .ok_or(ConfigError::MissingParameter("iterations"))?,
            deadline: self.deadline,
        };

        let chains = self.chains.unwrap_or(1);
        if chains == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "chains",
                reason: "at least one chain is required".to_string(),
            });
        }

        Ok(PlacementConfig {
            canvas_width,
            energy,
            optimization,
            chains,
            seed: self.seed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_builder() -> PlacementConfigBuilder {
        PlacementConfigBuilder::new()
            .canvas_width(500.0)
            .length_weight(1.0)
            .collinearity_weight(2.0)
            .aggregation(Aggregation::Mean)
            .iterations(50)
    }

    #[test]
    fn build_with_all_required_parameters_succeeds() {
        let config = complete_builder().build().unwrap();
        assert_eq!(config.canvas_width, 500.0);
        assert_eq!(config.energy.weights.collinearity(), 2.0);
        assert_eq!(config.energy.aggregation, Aggregation::Mean);
        assert_eq!(config.optimization.iterations, 50);
        assert_eq!(config.optimization.deadline, None);
        assert_eq!(config.chains, 1);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn build_keeps_optional_parameters() {
        let config = complete_builder()
            .chains(4)
            .seed(Some(9))
            .deadline(Some(Duration::from_millis(250)))
            .build()
            .unwrap();
        assert_eq!(config.chains, 4);
        assert_eq!(config.seed, Some(9));
        assert_eq!(
            config.optimization.deadline,
            Some(Duration::from_millis(250))
        );
    }

    #[test]
    fn build_reports_first_missing_parameter() {
        let result = PlacementConfigBuilder::new().canvas_width(500.0).build();
        assert_eq!(result, Err(ConfigError::MissingParameter("length_weight")));

        let result = PlacementConfigBuilder::new().build();
        assert_eq!(result, Err(ConfigError::MissingParameter("canvas_width")));
    }

    #[test]
    fn build_rejects_negative_weight() {
        let result = complete_builder().length_weight(-1.0).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter {
                name: "length_weight",
                ..
            })
        ));
    }

    #[test]
    fn build_rejects_non_finite_weight() {
        let result = complete_builder().collinearity_weight(f64::INFINITY).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter {
                name: "collinearity_weight",
                ..
            })
        ));
    }

    #[test]
    fn build_rejects_zero_chains_and_bad_canvas() {
        assert!(matches!(
            complete_builder().chains(0).build(),
            Err(ConfigError::InvalidParameter { name: "chains", .. })
        ));
        assert!(matches!(
            complete_builder().canvas_width(0.0).build(),
            Err(ConfigError::InvalidParameter {
                name: "canvas_width",
                ..
            })
        ));
    }

    #[test]
    fn energy_config_new_validates_weights() {
        let config = EnergyConfig::new(0.5, 0.0, Aggregation::Total).unwrap();
        assert_eq!(config.weights.length(), 0.5);
        assert_eq!(config.weights.collinearity(), 0.0);
        assert!(EnergyConfig::new(f64::NAN, 1.0, Aggregation::Total).is_err());
        assert!(matches!(
            EnergyConfig::new(1.0, -0.5, Aggregation::Mean),
            Err(ConfigError::InvalidParameter {
                name: "collinearity_weight",
                ..
            })
        ));
    }

    #[test]
    fn optimization_config_defaults_to_twenty_iterations() {
        assert_eq!(OptimizationConfig::default().iterations, 20);
        assert_eq!(EnergyConfig::default().weights, EnergyWeights::default());
        assert_eq!(EnergyConfig::default().aggregation, Aggregation::Total);
    }
}
