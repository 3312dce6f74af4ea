//! Deterministic SVG rendering for decomposition bar charts, LER-space
//! heatmaps, yield plots and sweep panels.

pub mod colormap;
pub mod figures;
pub mod panel;

pub use colormap::{Colormap, ParseColormapError, Rgb, TwoSlopeNorm};
pub use figures::{
    render_effect_bars_svg, render_heatmap_svg, render_yield_svg, FigureConfig,
};
pub use panel::{render_panel_svg, PanelStyle};
