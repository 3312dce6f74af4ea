use std::error::Error;
use std::fs;
use std::path::PathBuf;

use bef_exp::{load_plan, sweep, to_yaml_string, write_summary_csv_path, SweepPlan};
use bef_web::{render_panel_svg, Colormap, FigureConfig, PanelStyle};
use clap::Args;
use tracing::info;

use super::write_json;

#[derive(Args, Debug)]
pub struct SweepArgs {
    /// YAML sweep plan; the built-in exploration plan when omitted.
    #[arg(long)]
    pub plan: Option<PathBuf>,
    /// Output directory for the report, summary and panel figures.
    #[arg(long)]
    pub out: PathBuf,
    /// Diverging colormap (bwr, bwr_r, PuOr).
    #[arg(long, default_value = "PuOr")]
    pub colormap: Colormap,
    /// Width of one panel cell in pixels.
    #[arg(long, default_value_t = 240)]
    pub cell_width: u32,
    /// Height of one panel cell in pixels.
    #[arg(long, default_value_t = 200)]
    pub cell_height: u32,
}

pub fn run(args: &SweepArgs) -> Result<(), Box<dyn Error>> {
    let plan = match &args.plan {
        Some(path) => load_plan(path)?,
        None => SweepPlan::exploration(),
    };
    let report = sweep(&plan)?;

    fs::create_dir_all(&args.out)?;
    fs::write(args.out.join("plan.yaml"), to_yaml_string(&plan)?)?;
    write_json(&args.out.join("sweep_report.json"), &report)?;
    write_summary_csv_path(&report, &args.out.join("summary.csv"))?;

    let style = PanelStyle {
        bar_effects: plan.bar_effects.clone(),
        effect_limits: report.effect_limits,
        axis_limit: report.axis_limit,
        colormap: args.colormap,
        cell: FigureConfig {
            width: args.cell_width,
            height: args.cell_height,
        },
    };
    for panel in &report.panels {
        let path = args.out.join(format!("{}.svg", panel.stem()));
        fs::write(&path, render_panel_svg(panel, &style))?;
    }
    info!(
        panels = report.panels.len(),
        failed = report.failed(),
        out = %args.out.display(),
        "sweep artefacts written"
    );
    Ok(())
}
