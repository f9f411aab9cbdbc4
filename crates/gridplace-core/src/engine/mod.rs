//! # Engine Module
//!
//! The optimization engine searching for low-energy placements.
//!
//! - **Configuration** ([`config`]) - Energy weights, aggregation, iteration budgets and chains
//! - **State Tracking** ([`state`]) - The accepted chain of a hill climb and final solutions
//! - **Progress Monitoring** ([`progress`]) - Progress reporting callbacks
//! - **Error Handling** ([`error`]) - Engine-level error type wrapping core errors
//! - **Tasks** ([`tasks`]) - Neighbor generation and the hill-climbing driver
//!
//! The engine holds no global state: every task receives an explicit
//! [`context::OptimizationContext`] and an injected random number generator, so runs are
//! reproducible under a fixed seed.

pub mod config;
pub mod context;
pub mod error;
pub mod progress;
pub mod state;
pub mod tasks;
