use bef_core::EffectKind;
use bef_exp::{EffectLimits, PanelReport, PanelStatus};
use bef_land::Guides;
use serde::{Deserialize, Serialize};

use crate::colormap::{Colormap, TwoSlopeNorm};
use crate::figures::{effect_bars_body, escape, heatmap_body, svg_open, yield_body, FigureConfig};

const HEADER: f64 = 28.0;

/// Shared styling for every panel of a sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelStyle {
    /// Terms drawn in the bar chart of each row.
    pub bar_effects: Vec<EffectKind>,
    /// Limits shared across panels; widened by one unit each side.
    pub effect_limits: Option<EffectLimits>,
    /// Axis limit of the heatmaps; also the half-width of both norms.
    pub axis_limit: f64,
    /// Colormap for heatmap cells and coloured bars.
    pub colormap: Colormap,
    /// Size of one cell of the layout.
    pub cell: FigureConfig,
}

impl Default for PanelStyle {
    fn default() -> Self {
        Self {
            bar_effects: EffectKind::LOREAU_HECTOR.to_vec(),
            effect_limits: None,
            axis_limit: 1.0,
            colormap: Colormap::default(),
            cell: FigureConfig::default(),
        }
    }
}

fn group(x: f64, y: f64, body: String) -> String {
    format!("<g transform='translate({x:.2},{y:.2})'>{body}</g>")
}

/// Renders one sweep panel: a row per observed scenario holding the LER
/// summary, each heatmap, the effect bar chart and the yield plot.
pub fn render_panel_svg(panel: &PanelReport, style: &PanelStyle) -> String {
    let cell_w = style.cell.width as f64;
    let cell_h = style.cell.height as f64;
    let cols = 3 + panel.grids.len();
    let rows = panel.rows.len().max(1);
    let width = (cell_w * cols as f64).round() as u32;
    let height = (HEADER + cell_h * rows as f64).round() as u32;

    let mut out = svg_open(width, height);
    out.push_str(&format!(
        "<text x='{:.2}' y='18' text-anchor='middle' font-size='13'>RYe1 = {:.1}    RYe2 = {:.1}    M = ({:.1}, {:.1})</text>",
        width as f64 / 2.0,
        panel.expected_ry[0],
        panel.expected_ry[1],
        panel.monoculture[0],
        panel.monoculture[1],
    ));

    if panel.status == PanelStatus::Failed {
        out.push_str(&format!(
            "<text class='error' x='8' y='{:.2}'>panel failed: {}</text></svg>",
            HEADER + 16.0,
            escape(panel.error.as_deref().unwrap_or("unknown error"))
        ));
        return out;
    }

    let norm = TwoSlopeNorm::symmetric(style.axis_limit);
    let limits = style
        .effect_limits
        .map(|limits| (limits.min - 1.0, limits.max + 1.0));
    let monoculture_floor = panel.monoculture[0].min(panel.monoculture[1]);
    let yield_top = panel
        .rows
        .iter()
        .map(|row| row.observed[0] + row.observed[1])
        .fold(f64::NEG_INFINITY, f64::max)
        + monoculture_floor;

    for (row_idx, row) in panel.rows.iter().enumerate() {
        let y = HEADER + cell_h * row_idx as f64;
        let mut cells = Vec::with_capacity(cols);

        let ler = row
            .decomposition
            .ler
            .map(|value| format!("{value:.2}"))
            .unwrap_or_else(|| "n/a".to_string());
        cells.push(format!(
            "<text class='summary' x='12' y='{:.2}' font-size='12'><tspan x='12' dy='0'>LER = {ler}</tspan><tspan x='12' dy='16'>Yo1 = {:.1}</tspan><tspan x='12' dy='16'>Yo2 = {:.1}</tspan></text>",
            cell_h / 2.0 - 16.0,
            row.observed[0],
            row.observed[1],
        ));

        let guides = Guides::new(panel.monoculture, panel.expected_ry, Some(row.observed));
        for grid in &panel.grids {
            cells.push(heatmap_body(
                grid,
                &guides,
                style.colormap,
                &norm,
                cell_w,
                cell_h,
            ));
        }

        let values = row.decomposition.values(&style.bar_effects);
        cells.push(effect_bars_body(
            &values,
            &style.bar_effects,
            style.colormap,
            &norm,
            limits,
            cell_w,
            cell_h,
        ));
        cells.push(yield_body(
            &panel.monoculture,
            &row.observed,
            Some(yield_top),
            cell_w,
            cell_h,
        ));

        let row_body: String = cells
            .into_iter()
            .enumerate()
            .map(|(col, body)| group(cell_w * col as f64, 0.0, body))
            .collect();
        out.push_str(&group(0.0, y, row_body));
    }
    out.push_str("</svg>");
    out
}
