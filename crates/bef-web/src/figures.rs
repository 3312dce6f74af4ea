use bef_core::EffectKind;
use bef_land::{EffectGrid, Guides, Point};
use serde::{Deserialize, Serialize};

use crate::colormap::{Colormap, TwoSlopeNorm};

const INK: &str = "#000000";
const LINE_WIDTH: f64 = 0.75;
const POINT_RADIUS: f64 = 3.0;

/// Pixel size of a single figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FigureConfig {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            width: 240,
            height: 200,
        }
    }
}

/// Plot area inside a figure, in figure pixels.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Frame {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
}

impl Frame {
    pub(crate) fn inset(width: f64, height: f64) -> Self {
        let (left, right, top, bottom) = (34.0, 8.0, 20.0, 22.0);
        Self {
            left,
            top,
            width: (width - left - right).max(1.0),
            height: (height - top - bottom).max(1.0),
        }
    }

    fn x(&self, value: f64, min: f64, max: f64) -> f64 {
        self.left + (value - min) / span(min, max) * self.width
    }

    fn y(&self, value: f64, min: f64, max: f64) -> f64 {
        self.top + self.height - (value - min) / span(min, max) * self.height
    }

    fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

fn span(min: f64, max: f64) -> f64 {
    (max - min).max(1e-9)
}

/// Usable axis bounds; degenerate input widens to a unit interval.
fn ordered(lo: f64, hi: f64) -> (f64, f64) {
    if !(lo.is_finite() && hi.is_finite()) {
        (-1.0, 1.0)
    } else if lo >= hi {
        (lo - 1.0, lo + 1.0)
    } else {
        (lo, hi)
    }
}

pub(crate) fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('\'', "&apos;")
}

pub(crate) fn svg_open(width: u32, height: u32) -> String {
    format!(
        "<svg xmlns='http://www.w3.org/2000/svg' width='{width}' height='{height}' viewBox='0 0 {width} {height}' font-family='sans-serif' font-size='10'>"
    )
}

fn wrap(config: &FigureConfig, body: String) -> String {
    let mut out = svg_open(config.width, config.height);
    out.push_str(&body);
    out.push_str("</svg>");
    out
}

fn title(width: f64, text: &str) -> String {
    format!(
        "<text x='{:.2}' y='12' text-anchor='middle' font-size='11'>{}</text>",
        width / 2.0,
        escape(text)
    )
}

fn line(x1: f64, y1: f64, x2: f64, y2: f64, dash: Option<&str>) -> String {
    let dash = dash
        .map(|pattern| format!(" stroke-dasharray='{pattern}'"))
        .unwrap_or_default();
    format!(
        "<line x1='{x1:.2}' y1='{y1:.2}' x2='{x2:.2}' y2='{y2:.2}' stroke='{INK}' stroke-width='{LINE_WIDTH}'{dash} />"
    )
}

fn axes_box(frame: &Frame) -> String {
    format!(
        "<rect x='{:.2}' y='{:.2}' width='{:.2}' height='{:.2}' fill='none' stroke='{INK}' stroke-width='{LINE_WIDTH}' />",
        frame.left, frame.top, frame.width, frame.height
    )
}

/// Bar chart of decomposition terms. The net effect is drawn black, every
/// other term coloured through `norm`. `limits` fixes the value axis; without
/// it the axis spans the values and zero.
pub fn render_effect_bars_svg(
    values: &[f64],
    kinds: &[EffectKind],
    cmap: Colormap,
    norm: &TwoSlopeNorm,
    limits: Option<(f64, f64)>,
    config: &FigureConfig,
) -> String {
    wrap(
        config,
        effect_bars_body(
            values,
            kinds,
            cmap,
            norm,
            limits,
            config.width as f64,
            config.height as f64,
        ),
    )
}

pub(crate) fn effect_bars_body(
    values: &[f64],
    kinds: &[EffectKind],
    cmap: Colormap,
    norm: &TwoSlopeNorm,
    limits: Option<(f64, f64)>,
    width: f64,
    height: f64,
) -> String {
    let count = values.len().min(kinds.len());
    if count == 0 {
        return String::new();
    }
    let (lo, hi) = limits.unwrap_or_else(|| {
        let lo = values.iter().cloned().fold(0.0, f64::min);
        let hi = values.iter().cloned().fold(0.0, f64::max);
        let pad = (hi - lo).max(1.0) * 0.1;
        (lo - pad, hi + pad)
    });
    let (lo, hi) = ordered(lo, hi);
    let frame = Frame::inset(width, height);
    let slot = frame.width / count as f64;
    let bar_width = slot * 0.6;
    let zero = frame.y(0.0_f64.clamp(lo, hi), lo, hi);

    let mut parts = vec![title(width, "effect size"), axes_box(&frame)];
    for (idx, (value, kind)) in values.iter().zip(kinds).take(count).enumerate() {
        let fill = if kind.is_net() {
            INK.to_string()
        } else {
            norm.colour(cmap, *value).hex()
        };
        let top = frame.y(value.clamp(lo, hi), lo, hi);
        let x = frame.left + slot * idx as f64 + (slot - bar_width) / 2.0;
        parts.push(format!(
            "<rect class='bar' data-effect='{label}' x='{x:.2}' y='{y:.2}' width='{bar_width:.2}' height='{h:.2}' fill='{fill}' stroke='{INK}' stroke-width='{LINE_WIDTH}' />",
            label = kind.label(),
            y = top.min(zero),
            h = (top - zero).abs(),
        ));
        parts.push(format!(
            "<text x='{:.2}' y='{:.2}' text-anchor='middle'>{}</text>",
            x + bar_width / 2.0,
            frame.bottom() + 14.0,
            kind.label()
        ));
    }
    parts.push(line(frame.left, zero, frame.left + frame.width, zero, None));
    parts.join("")
}

/// LER-space heatmap of one effect with its guide geometry.
pub fn render_heatmap_svg(
    grid: &EffectGrid,
    guides: &Guides,
    cmap: Colormap,
    norm: &TwoSlopeNorm,
    config: &FigureConfig,
) -> String {
    wrap(
        config,
        heatmap_body(
            grid,
            guides,
            cmap,
            norm,
            config.width as f64,
            config.height as f64,
        ),
    )
}

pub(crate) fn heatmap_body(
    grid: &EffectGrid,
    guides: &Guides,
    cmap: Colormap,
    norm: &TwoSlopeNorm,
    width: f64,
    height: f64,
) -> String {
    let frame = Frame::inset(width, height);
    let (x_max, y_max) = match (grid.x_values.last(), grid.y_values.last()) {
        (Some(x), Some(y)) => (*x, *y),
        _ => return title(width, grid.effect.label()),
    };
    let px = |p: Point| (frame.x(p.x, 0.0, x_max), frame.y(p.y, 0.0, y_max));

    let mut parts = vec![title(width, grid.effect.label())];
    // Each quad takes the value at its lower-left corner.
    for row in 0..grid.rows().saturating_sub(1) {
        for col in 0..grid.cols().saturating_sub(1) {
            let Some(value) = grid.value_at(row, col) else {
                continue;
            };
            let x0 = frame.x(grid.x_values[col], 0.0, x_max);
            let x1 = frame.x(grid.x_values[col + 1], 0.0, x_max);
            let y0 = frame.y(grid.y_values[row], 0.0, y_max);
            let y1 = frame.y(grid.y_values[row + 1], 0.0, y_max);
            parts.push(format!(
                "<rect class='cell' x='{:.2}' y='{:.2}' width='{:.2}' height='{:.2}' fill='{}' />",
                x0,
                y1,
                x1 - x0,
                y0 - y1,
                norm.colour(cmap, value).hex()
            ));
        }
    }
    parts.push(axes_box(&frame));

    let (ax, ay) = px(guides.ler_one.from);
    let (bx, by) = px(guides.ler_one.to);
    parts.push(line(ax, ay, bx, by, None));
    let (ax, ay) = px(guides.overyield.from);
    let (bx, by) = px(guides.overyield.to);
    parts.push(line(ax, ay, bx, by, Some("2 2")));

    for point in guides.monoculture {
        let (x, y) = px(point);
        parts.push(format!(
            "<rect class='monoculture' x='{:.2}' y='{:.2}' width='{s:.2}' height='{s:.2}' fill='{INK}' />",
            x - POINT_RADIUS,
            y - POINT_RADIUS,
            s = POINT_RADIUS * 2.0
        ));
    }
    let (x, y) = px(guides.expected);
    parts.push(format!(
        "<circle class='expected' cx='{x:.2}' cy='{y:.2}' r='{POINT_RADIUS}' fill='none' stroke='{INK}' stroke-width='{LINE_WIDTH}' />"
    ));
    if let Some(observed) = guides.observed {
        let (x, y) = px(observed);
        parts.push(format!(
            "<circle class='observed' cx='{x:.2}' cy='{y:.2}' r='{POINT_RADIUS}' fill='{INK}' />"
        ));
    }

    let (m1, _) = px(guides.monoculture[0]);
    let (_, m2) = px(guides.monoculture[1]);
    parts.push(format!(
        "<text x='{m1:.2}' y='{:.2}' text-anchor='middle'>{:.1}</text>",
        frame.bottom() + 12.0,
        guides.monoculture[0].x
    ));
    parts.push(format!(
        "<text x='{:.2}' y='{m2:.2}' text-anchor='end'>{:.1}</text>",
        frame.left - 3.0,
        guides.monoculture[1].y
    ));
    parts.join("")
}

/// Monoculture yields against the polyculture total: squares for each
/// monoculture, a hollow marker for their mean, a filled marker for the
/// observed total and a dotted line at the best monoculture.
pub fn render_yield_svg(
    monoculture: &[f64],
    observed: &[f64],
    max_y: Option<f64>,
    config: &FigureConfig,
) -> String {
    wrap(
        config,
        yield_body(
            monoculture,
            observed,
            max_y,
            config.width as f64,
            config.height as f64,
        ),
    )
}

pub(crate) fn yield_body(
    monoculture: &[f64],
    observed: &[f64],
    max_y: Option<f64>,
    width: f64,
    height: f64,
) -> String {
    if monoculture.is_empty() {
        return String::new();
    }
    let best = monoculture.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let worst = monoculture.iter().cloned().fold(f64::INFINITY, f64::min);
    let mean = monoculture.iter().sum::<f64>() / monoculture.len() as f64;
    let total: f64 = observed.iter().sum();
    let (_, top) = ordered(0.0, max_y.unwrap_or_else(|| best.max(total) + worst / 2.0));

    let frame = Frame::inset(width, height);
    // Categorical x axis spanning [-0.25, 1.25].
    let mono_x = frame.x(0.0, -0.25, 1.25);
    let poly_x = frame.x(1.0, -0.25, 1.25);
    let y = |value: f64| frame.y(value.clamp(0.0, top), 0.0, top);

    let mut parts = vec![title(width, "yield"), axes_box(&frame)];
    parts.push(line(
        frame.left,
        y(best),
        frame.left + frame.width,
        y(best),
        Some("1 2"),
    ));
    parts.push(line(mono_x, y(mean), poly_x, y(total), None));
    for value in monoculture {
        parts.push(format!(
            "<rect class='monoculture' x='{:.2}' y='{:.2}' width='{s:.2}' height='{s:.2}' fill='{INK}' />",
            mono_x - POINT_RADIUS,
            y(*value) - POINT_RADIUS,
            s = POINT_RADIUS * 2.0
        ));
    }
    parts.push(format!(
        "<circle class='mean' cx='{mono_x:.2}' cy='{:.2}' r='{POINT_RADIUS}' fill='#ffffff' stroke='{INK}' stroke-width='{LINE_WIDTH}' />",
        y(mean)
    ));
    parts.push(format!(
        "<circle class='total' cx='{poly_x:.2}' cy='{:.2}' r='{POINT_RADIUS}' fill='{INK}' />",
        y(total)
    ));
    for (x, label) in [(mono_x, "mono"), (poly_x, "poly")] {
        parts.push(format!(
            "<text x='{x:.2}' y='{:.2}' text-anchor='middle'>{label}</text>",
            frame.bottom() + 14.0
        ));
    }
    parts.join("")
}
