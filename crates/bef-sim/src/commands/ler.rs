use std::error::Error;

use bef_effects::land_equivalent_ratio_with_policy;
use clap::Args;
use serde_json::json;

use super::{print_json, ScenarioArgs};

#[derive(Args, Debug)]
pub struct LerArgs {
    #[command(flatten)]
    pub scenario: ScenarioArgs,
}

pub fn run(args: &LerArgs) -> Result<(), Box<dyn Error>> {
    let (mono, observed, expected) = args.scenario.vectors()?;
    let ler = land_equivalent_ratio_with_policy(
        mono.as_slice(),
        observed.as_slice(),
        expected.as_slice(),
        &args.scenario.policy(),
    )?;
    print_json(&json!({ "ler": ler }))
}
