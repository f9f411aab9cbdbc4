//! # Workflows Module
//!
//! High-level entry points that combine the core models with the optimization engine.
//!
//! - **Arrangement** ([`arrange`]) - A random initial placement, and a single hill climb from any
//!   valid placement. The climb may be repeated on its own output.
//! - **Placement Workflow** ([`place`]) - A complete run: grid sizing, one or more independent
//!   chains (in parallel with the `parallel` feature), and solutions sorted by energy.

pub mod arrange;
pub mod place;

pub use arrange::{initial_place, optimize};
