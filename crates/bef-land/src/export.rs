use std::fs::File;
use std::io::Write;
use std::path::Path;

use bef_core::errors::{BefError, ErrorInfo};

use crate::grid::EffectGrid;

fn csv_error(code: &str, err: impl ToString) -> BefError {
    BefError::Serde(ErrorInfo::new(code, err.to_string()))
}

/// Writes `x,y,value` rows; undefined cells have an empty value.
pub fn write_grid_csv<W: Write>(grid: &EffectGrid, writer: W) -> Result<(), BefError> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["x", "y", grid.effect.label()])
        .map_err(|err| csv_error("csv_header", err))?;
    for (x, y, value) in grid.points() {
        let value = value.map(|v| format!("{v:.9}")).unwrap_or_default();
        csv.write_record([format!("{x:.9}"), format!("{y:.9}"), value])
            .map_err(|err| csv_error("csv_row", err))?;
    }
    csv.flush().map_err(|err| csv_error("csv_flush", err))
}

/// Writes the grid CSV to `path`.
pub fn write_grid_csv_path(grid: &EffectGrid, path: &Path) -> Result<(), BefError> {
    let file = File::create(path).map_err(|err| {
        BefError::Serde(
            ErrorInfo::new("csv_create", err.to_string())
                .with_context("path", path.display()),
        )
    })?;
    write_grid_csv(grid, file)
}
