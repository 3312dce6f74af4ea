use std::error::Error;

use bef_effects::{ler_locus, solve_yield_for_target_ler};
use clap::Args;
use serde_json::json;

use super::print_json;

#[derive(Args, Debug)]
pub struct SolveArgs {
    /// Species-1 monoculture yield.
    #[arg(long)]
    pub m1: f64,
    /// Species-2 monoculture yield.
    #[arg(long)]
    pub m2: f64,
    /// Species-1 intercrop yield.
    #[arg(long, allow_hyphen_values = true)]
    pub y1: f64,
    /// Target land equivalent ratio.
    #[arg(long)]
    pub ler: f64,
    /// Also emit this many points of the target LER line.
    #[arg(long)]
    pub locus: Option<usize>,
}

pub fn run(args: &SolveArgs) -> Result<(), Box<dyn Error>> {
    let y2 = solve_yield_for_target_ler(args.m1, args.m2, args.y1, args.ler)?;
    match args.locus {
        Some(samples) => {
            let locus = ler_locus(args.m1, args.m2, args.ler, samples)?;
            print_json(&json!({ "y2": y2, "locus": locus }))
        }
        None => print_json(&json!({ "y2": y2 })),
    }
}
