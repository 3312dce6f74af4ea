use std::fs::File;
use std::io::Write;
use std::path::Path;

use bef_core::errors::{BefError, ErrorInfo};
use bef_core::EffectKind;

use crate::sweep::SweepReport;

fn csv_error(code: &str, err: impl ToString) -> BefError {
    BefError::Serde(ErrorInfo::new(code, err.to_string()))
}

/// One CSV row per evaluated scenario with every decomposition term.
pub fn write_summary_csv<W: Write>(report: &SweepReport, writer: W) -> Result<(), BefError> {
    let mut csv = csv::Writer::from_writer(writer);
    let mut header: Vec<String> = [
        "expected_index",
        "monoculture_index",
        "m1",
        "m2",
        "rye1",
        "rye2",
        "yo1",
        "yo2",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    header.extend(EffectKind::ALL.iter().map(|kind| kind.label().to_string()));
    header.push("ler".to_string());
    csv.write_record(&header)
        .map_err(|err| csv_error("csv_header", err))?;

    for panel in &report.panels {
        for row in &panel.rows {
            let mut record = vec![
                panel.expected_index.to_string(),
                panel.monoculture_index.to_string(),
            ];
            let numbers = panel
                .monoculture
                .iter()
                .chain(panel.expected_ry.iter())
                .chain(row.observed.iter())
                .copied()
                .chain(row.decomposition.values(&EffectKind::ALL));
            record.extend(numbers.map(|value| format!("{value:.6}")));
            record.push(
                row.decomposition
                    .ler
                    .map(|ler| format!("{ler:.6}"))
                    .unwrap_or_default(),
            );
            csv.write_record(&record)
                .map_err(|err| csv_error("csv_row", err))?;
        }
    }
    csv.flush().map_err(|err| csv_error("csv_flush", err))
}

/// Writes the summary CSV to `path`.
pub fn write_summary_csv_path(report: &SweepReport, path: &Path) -> Result<(), BefError> {
    let file = File::create(path).map_err(|err| {
        BefError::Serde(
            ErrorInfo::new("csv_create", err.to_string()).with_context("path", path.display()),
        )
    })?;
    write_summary_csv(report, file)
}
