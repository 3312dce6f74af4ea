use std::error::Error;
use std::fs;
use std::path::PathBuf;

use bef_core::EffectKind;
use bef_effects::ValidationPolicy;
use bef_land::{write_grid_csv_path, LandscapeReport, LerSpace, DEFAULT_RESOLUTION};
use bef_web::{render_heatmap_svg, Colormap, FigureConfig, TwoSlopeNorm};
use clap::Args;
use tracing::info;

use super::{pair, write_json};

#[derive(Args, Debug)]
pub struct LandscapeArgs {
    /// Monoculture yields of the two species, comma separated.
    #[arg(long, value_delimiter = ',', required = true)]
    pub mono: Vec<f64>,
    /// Expected relative yields of the two species, comma separated.
    #[arg(long, value_delimiter = ',', required = true)]
    pub expected: Vec<f64>,
    /// Effect to evaluate (NE, SE, CE, tic, dom, tdc).
    #[arg(long, default_value = "CE")]
    pub effect: EffectKind,
    /// Largest species-1 yield on the x axis.
    #[arg(long)]
    pub max_x: f64,
    /// Largest species-2 yield on the y axis.
    #[arg(long)]
    pub max_y: f64,
    /// Samples along the longer axis.
    #[arg(long, default_value_t = DEFAULT_RESOLUTION)]
    pub resolution: usize,
    /// Observed yields to mark on the heatmap, comma separated.
    #[arg(long, value_delimiter = ',')]
    pub observed: Option<Vec<f64>>,
    /// Diverging colormap (bwr, bwr_r, PuOr).
    #[arg(long, default_value = "PuOr")]
    pub colormap: Colormap,
    /// Accept expected shares that do not sum to one.
    #[arg(long)]
    pub permissive: bool,
    /// Output directory.
    #[arg(long)]
    pub out: PathBuf,
}

pub fn run(args: &LandscapeArgs) -> Result<(), Box<dyn Error>> {
    let policy = if args.permissive {
        ValidationPolicy::permissive()
    } else {
        ValidationPolicy::default()
    };
    let space = LerSpace::new(
        pair("mono", &args.mono)?,
        pair("expected", &args.expected)?,
        args.max_x,
        args.max_y,
    )
    .with_resolution(args.resolution)
    .with_policy(policy);
    let observed = args
        .observed
        .as_deref()
        .map(|values| pair("observed", values))
        .transpose()?;

    let report = LandscapeReport::build(&space, args.effect, observed)?;
    fs::create_dir_all(&args.out)?;
    write_json(&args.out.join("landscape_report.json"), &report)?;
    write_grid_csv_path(&report.grid, &args.out.join("grid.csv"))?;
    let norm = TwoSlopeNorm::symmetric(args.max_x.max(args.max_y));
    let svg = render_heatmap_svg(
        &report.grid,
        &report.guides,
        args.colormap,
        &norm,
        &FigureConfig::default(),
    );
    fs::write(args.out.join("heatmap.svg"), svg)?;
    info!(
        effect = %args.effect,
        rows = report.grid.rows(),
        cols = report.grid.cols(),
        hash = %report.grid_hash,
        "landscape written"
    );
    Ok(())
}
