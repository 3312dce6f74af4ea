use bef_core::{BefError, EffectKind};
use serde::{Deserialize, Serialize};

use crate::ler::ler_terms;
use crate::partition::{loreau_hector_terms, tripartite_terms, LoreauHector, Tripartite};
use crate::validate::ValidationPolicy;
use crate::MIN_SPECIES;

/// Both partitions of one `(M, Yo, RYe)` scenario plus its land equivalent
/// ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Decomposition {
    /// Loreau–Hector selection/complementarity partition.
    pub loreau_hector: LoreauHector,
    /// Fox tripartite partition.
    pub tripartite: Tripartite,
    /// Land equivalent ratio; `None` when an expected relative yield is zero.
    pub ler: Option<f64>,
}

impl Decomposition {
    /// Value of a single decomposition term.
    pub fn value(&self, kind: EffectKind) -> f64 {
        match kind {
            EffectKind::Net => self.loreau_hector.net,
            EffectKind::Selection => self.loreau_hector.selection,
            EffectKind::Complementarity => self.loreau_hector.complementarity,
            EffectKind::TraitIndependent => self.tripartite.trait_independent,
            EffectKind::Dominance => self.tripartite.dominance,
            EffectKind::TraitDependent => self.tripartite.trait_dependent,
        }
    }

    /// Values for several terms, in the order requested.
    pub fn values(&self, kinds: &[EffectKind]) -> Vec<f64> {
        kinds.iter().map(|kind| self.value(*kind)).collect()
    }
}

/// Computes every decomposition term under the default policy.
pub fn decompose(
    monoculture: &[f64],
    observed: &[f64],
    expected_ry: &[f64],
) -> Result<Decomposition, BefError> {
    decompose_with_policy(
        monoculture,
        observed,
        expected_ry,
        &ValidationPolicy::default(),
    )
}

/// Computes every decomposition term under an explicit policy.
pub fn decompose_with_policy(
    monoculture: &[f64],
    observed: &[f64],
    expected_ry: &[f64],
    policy: &ValidationPolicy,
) -> Result<Decomposition, BefError> {
    policy.check(monoculture, observed, expected_ry, MIN_SPECIES)?;
    let ler = match ler_terms(monoculture, observed, expected_ry) {
        Ok(value) => Some(value),
        Err(BefError::DivisionByZero(_)) => None,
        Err(other) => return Err(other),
    };
    Ok(Decomposition {
        loreau_hector: loreau_hector_terms(monoculture, observed, expected_ry)?,
        tripartite: tripartite_terms(monoculture, observed, expected_ry)?,
        ler,
    })
}

/// Evaluates only the partition needed for `kind`.
///
/// Loreau–Hector terms stay defined where the tripartite shares are not (all
/// observed yields zero), so grid evaluation goes through this entry point.
pub fn effect_value(
    kind: EffectKind,
    monoculture: &[f64],
    observed: &[f64],
    expected_ry: &[f64],
    policy: &ValidationPolicy,
) -> Result<f64, BefError> {
    policy.check(monoculture, observed, expected_ry, MIN_SPECIES)?;
    let lh = || loreau_hector_terms(monoculture, observed, expected_ry);
    let fox = || tripartite_terms(monoculture, observed, expected_ry);
    Ok(match kind {
        EffectKind::Net => lh()?.net,
        EffectKind::Selection => lh()?.selection,
        EffectKind::Complementarity => lh()?.complementarity,
        EffectKind::TraitIndependent => fox()?.trait_independent,
        EffectKind::Dominance => fox()?.dominance,
        EffectKind::TraitDependent => fox()?.trait_dependent,
    })
}
