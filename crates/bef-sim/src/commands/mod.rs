use std::error::Error;
use std::fs;
use std::path::Path;

use bef_core::YieldVector;
use bef_effects::ValidationPolicy;
use bef_land::serde::to_canonical_json_bytes;
use clap::Args;
use serde::Serialize;

pub mod decompose;
pub mod landscape;
pub mod ler;
pub mod solve;
pub mod sweep;
pub mod version;

/// Yield vectors shared by the single-scenario commands.
#[derive(Args, Debug)]
pub struct ScenarioArgs {
    /// Monoculture yields, comma separated.
    #[arg(long, value_delimiter = ',', required = true, allow_hyphen_values = true)]
    pub mono: Vec<f64>,
    /// Observed intercrop yields, comma separated.
    #[arg(long, value_delimiter = ',', required = true, allow_hyphen_values = true)]
    pub observed: Vec<f64>,
    /// Expected relative yields, comma separated.
    #[arg(long, value_delimiter = ',', required = true, allow_hyphen_values = true)]
    pub expected: Vec<f64>,
    /// Accept negative yields and expected shares that do not sum to one.
    #[arg(long)]
    pub permissive: bool,
}

impl ScenarioArgs {
    /// `(monoculture, observed, expected)` with non-finite entries rejected.
    pub fn vectors(&self) -> Result<(YieldVector, YieldVector, YieldVector), Box<dyn Error>> {
        Ok((
            YieldVector::new(self.mono.clone())?,
            YieldVector::new(self.observed.clone())?,
            YieldVector::new(self.expected.clone())?,
        ))
    }

    pub fn policy(&self) -> ValidationPolicy {
        if self.permissive {
            ValidationPolicy::permissive()
        } else {
            ValidationPolicy::default()
        }
    }
}

pub fn pair(name: &str, values: &[f64]) -> Result<[f64; 2], Box<dyn Error>> {
    match values {
        [a, b] => Ok([*a, *b]),
        _ => Err(format!("--{name} expects two comma separated values, got {}", values.len()).into()),
    }
}

pub fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn Error>> {
    let bytes = to_canonical_json_bytes(value)?;
    println!("{}", String::from_utf8(bytes)?);
    Ok(())
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), Box<dyn Error>> {
    fs::write(path, to_canonical_json_bytes(value)?)?;
    Ok(())
}
