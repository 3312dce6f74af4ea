use bef_core::errors::{BefError, ErrorInfo};
use bef_core::EffectKind;
use bef_effects::{effect_value, ValidationPolicy};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::guides::Guides;

/// Number of samples along the longer axis unless configured otherwise.
pub const DEFAULT_RESOLUTION: usize = 50;

fn default_resolution() -> usize {
    DEFAULT_RESOLUTION
}

/// Two-species yield plane: x is the species-1 intercrop yield, y the
/// species-2 intercrop yield.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LerSpace {
    /// Monoculture yields `[M1, M2]`.
    pub monoculture: [f64; 2],
    /// Expected relative yields `[RYe1, RYe2]`.
    pub expected_ry: [f64; 2],
    /// Largest species-1 yield on the x axis.
    pub max_x: f64,
    /// Largest species-2 yield on the y axis.
    pub max_y: f64,
    /// Number of samples along the longer axis.
    #[serde(default = "default_resolution")]
    pub resolution: usize,
    /// Validation applied to every cell.
    #[serde(default)]
    pub policy: ValidationPolicy,
}

/// One effect evaluated over a [`LerSpace`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectGrid {
    /// Effect stored in the cells.
    pub effect: EffectKind,
    /// Species-1 yields, one per column.
    pub x_values: Vec<f64>,
    /// Species-2 yields, one per row.
    pub y_values: Vec<f64>,
    /// `cells[row][col]` is the effect at `Yo = [x_values[col], y_values[row]]`;
    /// `None` where the effect is undefined.
    pub cells: Vec<Vec<Option<f64>>>,
}

/// `count` evenly spaced values from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count)
                .map(|idx| {
                    if idx == count - 1 {
                        end
                    } else {
                        start + step * idx as f64
                    }
                })
                .collect()
        }
    }
}

impl LerSpace {
    /// Creates a space with the default resolution and validation policy.
    pub fn new(monoculture: [f64; 2], expected_ry: [f64; 2], max_x: f64, max_y: f64) -> Self {
        Self {
            monoculture,
            expected_ry,
            max_x,
            max_y,
            resolution: DEFAULT_RESOLUTION,
            policy: ValidationPolicy::default(),
        }
    }

    /// Overrides the number of samples along the longer axis.
    pub fn with_resolution(mut self, resolution: usize) -> Self {
        self.resolution = resolution;
        self
    }

    /// Overrides the per-cell validation policy.
    pub fn with_policy(mut self, policy: ValidationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Checks the plane bounds and the fixed `(M, RYe)` pair.
    pub fn validate(&self) -> Result<(), BefError> {
        for (name, value) in [("max_x", self.max_x), ("max_y", self.max_y)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(BefError::Plan(
                    ErrorInfo::new("ler-space-bound", "axis bounds must be positive and finite")
                        .with_context("axis", name)
                        .with_context("value", value),
                ));
            }
        }
        if self.resolution < 2 {
            return Err(BefError::Plan(
                ErrorInfo::new("ler-space-resolution", "resolution must be at least two")
                    .with_context("resolution", self.resolution),
            ));
        }
        self.policy
            .check(&self.monoculture, &[0.0, 0.0], &self.expected_ry, 2)
            .map(|_| ())
    }

    /// Axis samples. The longer axis receives `resolution` points and the
    /// shorter one a proportional count, so cells stay roughly square.
    pub fn axes(&self) -> (Vec<f64>, Vec<f64>) {
        let resolution = self.resolution.max(2);
        if self.max_x >= self.max_y {
            let y_count = proportional_count(self.max_y, self.max_x, resolution);
            (
                linspace(0.0, self.max_x, resolution),
                linspace(0.0, self.max_y, y_count),
            )
        } else {
            let x_count = proportional_count(self.max_x, self.max_y, resolution);
            (
                linspace(0.0, self.max_x, x_count),
                linspace(0.0, self.max_y, resolution),
            )
        }
    }

    /// Evaluates `effect` at every grid point, one rayon task per row.
    pub fn evaluate(&self, effect: EffectKind) -> Result<EffectGrid, BefError> {
        self.validate()?;
        let (x_values, y_values) = self.axes();
        let cells: Vec<Vec<Option<f64>>> = y_values
            .par_iter()
            .map(|y| {
                x_values
                    .iter()
                    .map(|x| {
                        effect_value(
                            effect,
                            &self.monoculture,
                            &[*x, *y],
                            &self.expected_ry,
                            &self.policy,
                        )
                        .ok()
                    })
                    .collect()
            })
            .collect();
        let grid = EffectGrid {
            effect,
            x_values,
            y_values,
            cells,
        };
        let undefined = grid.undefined_cells();
        if undefined > 0 {
            debug!(effect = %effect, undefined, "grid cells without a defined effect");
        }
        Ok(grid)
    }

    /// Reference geometry for this space, optionally marking an observed pair.
    pub fn guides(&self, observed: Option<[f64; 2]>) -> Guides {
        Guides::new(self.monoculture, self.expected_ry, observed)
    }
}

fn proportional_count(short: f64, long: f64, resolution: usize) -> usize {
    ((short * resolution as f64 / long).round() as usize).max(2)
}

impl EffectGrid {
    /// Number of rows (y samples).
    pub fn rows(&self) -> usize {
        self.y_values.len()
    }

    /// Number of columns (x samples).
    pub fn cols(&self) -> usize {
        self.x_values.len()
    }

    /// Cell value at `(row, col)`.
    pub fn value_at(&self, row: usize, col: usize) -> Option<f64> {
        self.cells.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    /// Number of cells where the effect is undefined.
    pub fn undefined_cells(&self) -> usize {
        self.cells
            .iter()
            .flat_map(|row| row.iter())
            .filter(|cell| cell.is_none())
            .count()
    }

    /// Minimum and maximum over the defined cells.
    pub fn range(&self) -> Option<(f64, f64)> {
        self.cells
            .iter()
            .flat_map(|row| row.iter())
            .flatten()
            .fold(None, |acc, value| match acc {
                None => Some((*value, *value)),
                Some((lo, hi)) => Some((lo.min(*value), hi.max(*value))),
            })
    }

    /// Iterates `(x, y, value)` in row-major order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64, Option<f64>)> + '_ {
        self.y_values.iter().enumerate().flat_map(move |(row, y)| {
            self.x_values
                .iter()
                .enumerate()
                .map(move |(col, x)| (*x, *y, self.cells[row][col]))
        })
    }
}
