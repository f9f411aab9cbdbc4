//! # GridPlace Core Library
//!
//! A small, deterministic-when-seeded library for arranging connected points on the cells of a
//! square grid so that the resulting diagram stays readable: connections should be short and
//! should not pass through unrelated points.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture with a clear separation of concerns.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`PointSet`, `Grid`, `Placement`),
//!   the energy function scoring a placement, random point-set generation and layout file I/O.
//!
//! - **[`engine`]: The Logic Core.** Configuration, error types, progress reporting and the
//!   optimization tasks: the validity-preserving neighbor move and the greedy hill climb.
//!
//! - **[`workflows`]: The Public API.** Ties `engine` and `core` together into complete
//!   procedures: initial random placement, optimization of an existing placement, and a full
//!   placement run over several independent chains.

pub mod core;
pub mod engine;
pub mod workflows;
