#![deny(missing_docs)]
//! Closed-form biodiversity effect decompositions.
//!
//! Every operation is a pure function of three equal-length vectors: the
//! monoculture yields `M`, the observed polyculture yields `Yo` and the
//! expected relative yields `RYe`. Inputs are validated against a
//! [`ValidationPolicy`] and failures are reported as [`BefError`] values; no
//! operation ever returns NaN or infinity.

/// Combined decomposition bundle and per-effect evaluation.
pub mod decompose;
/// Land equivalent ratio and its two-species inverse.
pub mod ler;
/// Loreau–Hector and Fox tripartite partitions.
pub mod partition;
/// Mean and biased covariance helpers.
pub mod stats;
/// Input validation policies.
pub mod validate;

pub use bef_core::{BefError, EffectKind};
pub use decompose::{decompose, decompose_with_policy, effect_value, Decomposition};
pub use ler::{
    land_equivalent_ratio, land_equivalent_ratio_with_policy, ler_locus,
    solve_yield_for_target_ler,
};
pub use partition::{
    biodiversity_effect, biodiversity_effect_with_policy, tripartite_partition,
    tripartite_partition_with_policy, LoreauHector, Tripartite,
};
pub use stats::{mean, population_covariance};
pub use validate::ValidationPolicy;

/// Smallest number of species for which the decompositions are defined.
pub const MIN_SPECIES: usize = 2;
