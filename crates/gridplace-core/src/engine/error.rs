use super::config::ConfigError;
use crate::core::energy::scoring::ScoringError;
use crate::core::models::grid::GridError;
use crate::core::models::placement::PlacementError;
use crate::core::models::point_set::PointSetError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Initialization failed: {0}")]
    Initialization(String),

    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Invalid point set: {source}")]
    PointSet {
        #[from]
        source: PointSetError,
    },

    #[error("Grid sizing failed: {source}")]
    Grid {
        #[from]
        source: GridError,
    },

    #[error("Invalid placement: {source}")]
    Placement {
        #[from]
        source: PlacementError,
    },

    #[error("Energy scoring failed: {source}")]
    Scoring {
        #[from]
        source: ScoringError,
    },

    #[error("Internal logic error: {0}")]
    Internal(String),
}
