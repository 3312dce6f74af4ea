use std::fs;
use std::path::Path;

use bef_core::errors::{BefError, ErrorInfo};
use bef_core::{EffectKind, RngHandle};
use bef_effects::ValidationPolicy;
use bef_land::DEFAULT_RESOLUTION;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::serde::from_yaml_slice;

fn plan_error(code: &str, message: &str) -> BefError {
    BefError::Plan(ErrorInfo::new(code, message))
}

/// Sweep over every `(expected shares, monoculture pair)` combination, with
/// one panel row per observed-yield scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPlan {
    /// Monoculture yield pairs `[M1, M2]`.
    pub monocultures: Vec<[f64; 2]>,
    /// Expected relative yield pairs `[RYe1, RYe2]`.
    pub expected_relative_yields: Vec<[f64; 2]>,
    /// Observed intercrop yield scenarios.
    pub observed: ObservedSpec,
    /// Effects rendered as LER-space heatmaps in every row.
    #[serde(default = "SweepPlan::default_effects")]
    pub effects: Vec<EffectKind>,
    /// Effects shown in the per-row bar chart.
    #[serde(default = "SweepPlan::default_bar_effects")]
    pub bar_effects: Vec<EffectKind>,
    /// Samples along the longer heatmap axis.
    #[serde(default = "SweepPlan::default_resolution")]
    pub resolution: usize,
    /// Added to the largest monoculture yield to obtain the shared axis limit.
    #[serde(default = "SweepPlan::default_margin")]
    pub margin: f64,
    /// Validation applied to every evaluation.
    #[serde(default)]
    pub policy: ValidationPolicy,
}

impl SweepPlan {
    fn default_effects() -> Vec<EffectKind> {
        vec![EffectKind::Complementarity, EffectKind::Selection]
    }

    fn default_bar_effects() -> Vec<EffectKind> {
        EffectKind::LOREAU_HECTOR.to_vec()
    }

    const fn default_resolution() -> usize {
        DEFAULT_RESOLUTION
    }

    const fn default_margin() -> f64 {
        2.0
    }

    /// Plan reproducing the exploration panels: three expected-share splits,
    /// three monoculture pairs and three observed scenarios.
    pub fn exploration() -> Self {
        Self {
            monocultures: vec![[10.0, 6.0], [15.0, 6.0], [20.0, 6.0]],
            expected_relative_yields: vec![[0.4, 0.6], [0.5, 0.5], [0.6, 0.4]],
            observed: ObservedSpec::Grid {
                values: vec![[14.0, 2.2], [9.0, 4.2], [5.0, 5.8]],
            },
            effects: Self::default_effects(),
            bar_effects: Self::default_bar_effects(),
            resolution: Self::default_resolution(),
            margin: Self::default_margin(),
            policy: ValidationPolicy::default(),
        }
    }

    /// Rejects plans that would produce no panels or degenerate axes.
    pub fn validate(&self) -> Result<(), BefError> {
        if self.monocultures.is_empty() {
            return Err(plan_error("plan-monocultures", "no monoculture pairs listed"));
        }
        if self.expected_relative_yields.is_empty() {
            return Err(plan_error(
                "plan-expected",
                "no expected relative yield pairs listed",
            ));
        }
        if self.effects.is_empty() && self.bar_effects.is_empty() {
            return Err(plan_error("plan-effects", "no effects selected"));
        }
        if self.resolution < 2 {
            return Err(plan_error("plan-resolution", "resolution must be at least two"));
        }
        if !self.margin.is_finite() || self.margin < 0.0 {
            return Err(plan_error("plan-margin", "margin must be finite and non-negative"));
        }
        if self.axis_limit() <= 0.0 {
            return Err(plan_error("plan-axis", "axis limit must be positive"));
        }
        self.observed.validate()
    }

    /// Shared upper limit for both yield axes.
    pub fn axis_limit(&self) -> f64 {
        self.monocultures
            .iter()
            .flat_map(|pair| pair.iter())
            .cloned()
            .fold(f64::NEG_INFINITY, f64::max)
            + self.margin
    }
}

/// Observed intercrop yield scenarios evaluated in every panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ObservedSpec {
    /// Explicit `[Y1, Y2]` rows.
    Grid {
        /// Observed yield pairs.
        values: Vec<[f64; 2]>,
    },
    /// Latin hypercube samples inside `[min, max]` per species.
    Lhs {
        /// Number of sampled rows.
        samples: usize,
        /// Lower bounds per species.
        min: [f64; 2],
        /// Upper bounds per species.
        max: [f64; 2],
        /// Master seed; each species draws from its own substream.
        seed: u64,
    },
}

impl ObservedSpec {
    fn validate(&self) -> Result<(), BefError> {
        match self {
            ObservedSpec::Grid { values } if values.is_empty() => {
                Err(plan_error("plan-observed", "no observed yield rows listed"))
            }
            ObservedSpec::Grid { .. } => Ok(()),
            ObservedSpec::Lhs {
                samples, min, max, ..
            } => {
                if *samples == 0 {
                    return Err(plan_error("plan-lhs-samples", "lhs needs at least one sample"));
                }
                if min
                    .iter()
                    .zip(max)
                    .any(|(lo, hi)| !lo.is_finite() || !hi.is_finite() || lo > hi)
                {
                    return Err(plan_error("plan-lhs-bounds", "lhs bounds require min <= max"));
                }
                Ok(())
            }
        }
    }

    /// Seed recorded in the sweep provenance.
    pub fn seed(&self) -> u64 {
        match self {
            ObservedSpec::Grid { .. } => 0,
            ObservedSpec::Lhs { seed, .. } => *seed,
        }
    }

    /// Concrete observed yield pairs, in row order.
    pub fn expand(&self) -> Vec<[f64; 2]> {
        match self {
            ObservedSpec::Grid { values } => values.clone(),
            ObservedSpec::Lhs {
                samples,
                min,
                max,
                seed,
            } => {
                let base_slots: Vec<f64> = (0..*samples)
                    .map(|i| (i as f64 + 0.5) / *samples as f64)
                    .collect();
                let mut rows = vec![[0.0; 2]; *samples];
                for species in 0..2 {
                    let mut rng = RngHandle::substream(*seed, species as u64);
                    let mut slots = base_slots.clone();
                    slots.shuffle(&mut rng);
                    for (row, frac) in rows.iter_mut().zip(slots) {
                        row[species] = min[species] + frac * (max[species] - min[species]);
                    }
                }
                rows
            }
        }
    }
}

/// Reads and validates a YAML sweep plan.
pub fn load_plan(path: &Path) -> Result<SweepPlan, BefError> {
    let bytes = fs::read(path).map_err(|err| {
        BefError::Serde(
            ErrorInfo::new("plan_read", err.to_string()).with_context("path", path.display()),
        )
    })?;
    let plan: SweepPlan = from_yaml_slice(&bytes)?;
    plan.validate()?;
    Ok(plan)
}
