// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The query-side half of the system: prefix enumeration under bounds,
//! board lookups, the pair scan, and search statistics.
//!
//! [`driver::QueryDriver`] owns the per-cardinality state machine;
//! [`window::PrefixWindow`] holds its mutable state and the incremental
//! bound arithmetic; [`pairs`] handles cardinality 2 without the board.

pub mod driver;
pub mod pairs;
pub mod statistics;
pub mod window;

pub use driver::QueryDriver;
pub use statistics::{Counter, Statistics};
pub use window::PrefixWindow;
