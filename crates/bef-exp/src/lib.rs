//! Parameter sweep orchestration for biodiversity effect exploration panels.

mod export;
mod plan;
mod serde;
mod sweep;

pub use export::{write_summary_csv, write_summary_csv_path};
pub use plan::{load_plan, ObservedSpec, SweepPlan};
pub use serde::{from_yaml_slice, to_yaml_string};
pub use sweep::{
    sweep, EffectLimits, PanelReport, PanelStatus, ScenarioRow, SweepReport,
};
