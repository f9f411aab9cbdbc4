//! Reading and writing layout documents.
//!
//! A layout document is a TOML file describing a point set and, optionally, the grid and the
//! cells its points are placed on. It is the exchange format between the library and external
//! collaborators such as renderers.

pub mod layout;
