use std::error::Error;

use bef_effects::decompose_with_policy;
use clap::Args;
use tracing::debug;

use super::{print_json, ScenarioArgs};

#[derive(Args, Debug)]
pub struct DecomposeArgs {
    #[command(flatten)]
    pub scenario: ScenarioArgs,
}

pub fn run(args: &DecomposeArgs) -> Result<(), Box<dyn Error>> {
    let (mono, observed, expected) = args.scenario.vectors()?;
    debug!(
        species = mono.len(),
        observed_total = observed.sum(),
        expected_total = expected.sum(),
        "decomposing scenario"
    );
    let decomposition = decompose_with_policy(
        mono.as_slice(),
        observed.as_slice(),
        expected.as_slice(),
        &args.scenario.policy(),
    )?;
    print_json(&decomposition)
}
