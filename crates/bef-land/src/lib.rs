#![deny(missing_docs)]
#![doc = "LER-space evaluation: one biodiversity effect over a grid of hypothetical two-species yield pairs."]

/// CSV export of evaluated grids.
pub mod export;
/// Grid sampling and parallel evaluation.
pub mod grid;
/// Reference lines and points drawn over a grid.
pub mod guides;
/// Canonical hashing helpers.
pub mod hash;
/// Report assembly.
pub mod report;
/// Canonical JSON serde helpers.
pub mod serde;

pub use export::{write_grid_csv, write_grid_csv_path};
pub use grid::{linspace, EffectGrid, LerSpace, DEFAULT_RESOLUTION};
pub use guides::{Guides, Point, Segment};
pub use hash::stable_hash_string;
pub use report::LandscapeReport;
