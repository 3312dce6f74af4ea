use std::error::Error;
use std::process::Command;

use bef_core::{EffectKind, SchemaVersion};
use bef_web::Colormap;
use clap::Args;
use serde::Serialize;

use super::print_json;

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Emit extended metadata including the git commit and supported options.
    #[arg(long)]
    pub long: bool,
}

#[derive(Debug, Serialize)]
struct VersionInfo {
    version: String,
    schema: SchemaVersion,
    git_commit: String,
    effects: Vec<&'static str>,
    colormaps: Vec<&'static str>,
}

pub fn run(args: &VersionArgs) -> Result<(), Box<dyn Error>> {
    if !args.long {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }
    print_json(&gather_info())
}

fn gather_info() -> VersionInfo {
    let git_commit = Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .map(|out| String::from_utf8_lossy(&out.stdout).trim().to_string())
        .unwrap_or_else(|| "unknown".into());
    VersionInfo {
        version: env!("CARGO_PKG_VERSION").into(),
        schema: SchemaVersion::default(),
        git_commit,
        effects: EffectKind::ALL.iter().map(|kind| kind.label()).collect(),
        colormaps: Colormap::ALL.iter().map(|cmap| cmap.name()).collect(),
    }
}
