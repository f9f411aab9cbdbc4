//! Optimization tasks.
//!
//! Each task is a self-contained computational unit used by the workflows: proposing a
//! neighboring placement, and driving a greedy hill climb over such proposals.

pub mod hill_climb;
pub mod neighbor;
