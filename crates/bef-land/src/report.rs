use bef_core::errors::BefError;
use bef_core::{EffectKind, SchemaVersion};
use serde::{Deserialize, Serialize};

use crate::grid::{EffectGrid, LerSpace};
use crate::guides::Guides;
use crate::hash::stable_hash_string;

/// Persisted result of evaluating one effect over a [`LerSpace`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandscapeReport {
    /// Report schema version.
    pub schema: SchemaVersion,
    /// The evaluated space.
    pub space: LerSpace,
    /// The evaluated effect.
    pub effect: EffectKind,
    /// Cell values.
    pub grid: EffectGrid,
    /// Reference geometry.
    pub guides: Guides,
    /// SHA-256 of the canonical grid JSON.
    pub grid_hash: String,
}

impl LandscapeReport {
    /// Evaluates `effect` over `space` and assembles the report.
    pub fn build(
        space: &LerSpace,
        effect: EffectKind,
        observed: Option<[f64; 2]>,
    ) -> Result<Self, BefError> {
        let grid = space.evaluate(effect)?;
        let grid_hash = stable_hash_string(&grid)?;
        Ok(Self {
            schema: SchemaVersion::new(1, 0, 0),
            space: space.clone(),
            effect,
            guides: space.guides(observed),
            grid,
            grid_hash,
        })
    }
}
