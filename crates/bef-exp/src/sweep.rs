use std::collections::BTreeMap;

use bef_core::errors::BefError;
use bef_core::{EffectKind, RunProvenance, SchemaVersion};
use bef_effects::{decompose_with_policy, Decomposition};
use bef_land::{stable_hash_string, EffectGrid, LerSpace};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::plan::SweepPlan;

/// Shared bar-chart limits across every panel of a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectLimits {
    /// Smallest Loreau–Hector term seen.
    pub min: f64,
    /// Largest Loreau–Hector term seen.
    pub max: f64,
}

/// Outcome of a single panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelStatus {
    /// Every row and grid evaluated.
    Completed,
    /// Evaluation stopped at the recorded error.
    Failed,
}

/// One observed scenario inside a panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioRow {
    /// Observed intercrop yields `[Y1, Y2]`.
    pub observed: [f64; 2],
    /// Both partitions and the LER.
    pub decomposition: Decomposition,
}

/// Result for one `(expected shares, monoculture pair)` combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelReport {
    /// Index of the expected share pair in the plan.
    pub expected_index: usize,
    /// Index of the monoculture pair in the plan.
    pub monoculture_index: usize,
    /// Monoculture yields.
    pub monoculture: [f64; 2],
    /// Expected relative yields.
    pub expected_ry: [f64; 2],
    /// Panel outcome.
    pub status: PanelStatus,
    /// Error text for failed panels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Evaluated observed scenarios.
    pub rows: Vec<ScenarioRow>,
    /// Canonical hash of every heatmap grid, keyed by effect label.
    pub grid_hashes: BTreeMap<String, String>,
    /// Heatmap grids; kept in memory for rendering, not persisted.
    #[serde(skip)]
    pub grids: Vec<EffectGrid>,
}

impl PanelReport {
    /// Stable file stem for panel artefacts.
    pub fn stem(&self) -> String {
        format!("panel-{}-{}", self.expected_index, self.monoculture_index)
    }

    /// Grid for `effect`, if it was evaluated.
    pub fn grid(&self, effect: EffectKind) -> Option<&EffectGrid> {
        self.grids.iter().find(|grid| grid.effect == effect)
    }
}

/// Aggregate sweep report persisted next to the rendered panels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepReport {
    /// Report schema version.
    pub schema: SchemaVersion,
    /// SHA-256 of the canonical plan.
    pub plan_hash: String,
    /// Provenance of the run.
    pub provenance: RunProvenance,
    /// Shared heatmap axis limit.
    pub axis_limit: f64,
    /// Shared bar-chart limits; `None` when no scenario evaluated.
    pub effect_limits: Option<EffectLimits>,
    /// Panels in `(expected_index, monoculture_index)` order.
    pub panels: Vec<PanelReport>,
}

impl SweepReport {
    /// Number of failed panels.
    pub fn failed(&self) -> usize {
        self.panels
            .iter()
            .filter(|panel| panel.status == PanelStatus::Failed)
            .count()
    }
}

/// Executes every panel of `plan`. Panel failures are recorded and do not
/// abort the sweep; only an invalid plan does.
pub fn sweep(plan: &SweepPlan) -> Result<SweepReport, BefError> {
    plan.validate()?;
    let plan_hash = stable_hash_string(plan)?;
    let observed = plan.observed.expand();
    let axis_limit = plan.axis_limit();

    let mut panels = Vec::with_capacity(
        plan.expected_relative_yields.len() * plan.monocultures.len(),
    );
    for (expected_index, expected_ry) in plan.expected_relative_yields.iter().enumerate() {
        for (monoculture_index, monoculture) in plan.monocultures.iter().enumerate() {
            let panel = match evaluate_panel(plan, *monoculture, *expected_ry, &observed, axis_limit)
            {
                Ok((rows, grids, grid_hashes)) => PanelReport {
                    expected_index,
                    monoculture_index,
                    monoculture: *monoculture,
                    expected_ry: *expected_ry,
                    status: PanelStatus::Completed,
                    error: None,
                    rows,
                    grid_hashes,
                    grids,
                },
                Err(err) => {
                    warn!(expected_index, monoculture_index, error = %err, "panel failed");
                    PanelReport {
                        expected_index,
                        monoculture_index,
                        monoculture: *monoculture,
                        expected_ry: *expected_ry,
                        status: PanelStatus::Failed,
                        error: Some(err.to_string()),
                        rows: Vec::new(),
                        grid_hashes: BTreeMap::new(),
                        grids: Vec::new(),
                    }
                }
            };
            panels.push(panel);
        }
    }

    let effect_limits = effect_limits(&panels);
    let report = SweepReport {
        schema: SchemaVersion::new(1, 0, 0),
        provenance: RunProvenance::new(
            plan_hash.clone(),
            plan.observed.seed(),
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
        ),
        plan_hash,
        axis_limit,
        effect_limits,
        panels,
    };
    info!(
        panels = report.panels.len(),
        failed = report.failed(),
        "sweep finished"
    );
    Ok(report)
}

type PanelOutput = (Vec<ScenarioRow>, Vec<EffectGrid>, BTreeMap<String, String>);

fn evaluate_panel(
    plan: &SweepPlan,
    monoculture: [f64; 2],
    expected_ry: [f64; 2],
    observed: &[[f64; 2]],
    axis_limit: f64,
) -> Result<PanelOutput, BefError> {
    let rows = observed
        .iter()
        .map(|yo| {
            decompose_with_policy(&monoculture, yo, &expected_ry, &plan.policy).map(
                |decomposition| ScenarioRow {
                    observed: *yo,
                    decomposition,
                },
            )
        })
        .collect::<Result<Vec<_>, _>>()?;

    let space = LerSpace::new(monoculture, expected_ry, axis_limit, axis_limit)
        .with_resolution(plan.resolution)
        .with_policy(plan.policy);
    let mut grids = Vec::with_capacity(plan.effects.len());
    let mut grid_hashes = BTreeMap::new();
    for effect in &plan.effects {
        let grid = space.evaluate(*effect)?;
        grid_hashes.insert(effect.label().to_string(), stable_hash_string(&grid)?);
        grids.push(grid);
    }
    Ok((rows, grids, grid_hashes))
}

fn effect_limits(panels: &[PanelReport]) -> Option<EffectLimits> {
    panels
        .iter()
        .flat_map(|panel| panel.rows.iter())
        .map(|row| row.decomposition.loreau_hector)
        .fold(None, |acc, lh| {
            Some(match acc {
                None => EffectLimits {
                    min: lh.min(),
                    max: lh.max(),
                },
                Some(limits) => EffectLimits {
                    min: limits.min.min(lh.min()),
                    max: limits.max.max(lh.max()),
                },
            })
        })
}
