use bef_core::errors::{BefError, ErrorInfo};
use serde::{Deserialize, Serialize};

use crate::stats::{mean, population_covariance};
use crate::validate::{finite, ValidationPolicy};
use crate::MIN_SPECIES;

/// Loreau & Hector (2001) additive partition of the net biodiversity effect.
///
/// `net == selection + complementarity` up to rounding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoreauHector {
    /// Selection effect: `N * cov(ΔRY, M)`.
    pub selection: f64,
    /// Complementarity effect: `N * mean(ΔRY) * mean(M)`.
    pub complementarity: f64,
    /// Net effect: observed minus expected total yield.
    pub net: f64,
}

impl LoreauHector {
    /// Returns `(SE, CE, NE)`.
    pub fn as_tuple(&self) -> (f64, f64, f64) {
        (self.selection, self.complementarity, self.net)
    }

    /// Largest of the three terms.
    pub fn max(&self) -> f64 {
        self.selection.max(self.complementarity).max(self.net)
    }

    /// Smallest of the three terms.
    pub fn min(&self) -> f64 {
        self.selection.min(self.complementarity).min(self.net)
    }
}

/// Fox (2005) tripartite partition of the net biodiversity effect.
///
/// `trait_independent` equals the Loreau–Hector complementarity effect and
/// `dominance + trait_dependent` equals the selection effect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tripartite {
    /// Trait-independent complementarity.
    pub trait_independent: f64,
    /// Dominance effect.
    pub dominance: f64,
    /// Trait-dependent complementarity.
    pub trait_dependent: f64,
}

impl Tripartite {
    /// Returns `(TIC, DOM, TDC)`.
    pub fn as_tuple(&self) -> (f64, f64, f64) {
        (self.trait_independent, self.dominance, self.trait_dependent)
    }

    /// Sum of the three terms, equal to the net effect.
    pub fn total(&self) -> f64 {
        let (tic, dom, tdc) = self.as_tuple();
        tic + dom + tdc
    }
}

/// Selection, complementarity and net effects under the default policy.
pub fn biodiversity_effect(
    monoculture: &[f64],
    observed: &[f64],
    expected_ry: &[f64],
) -> Result<LoreauHector, BefError> {
    biodiversity_effect_with_policy(
        monoculture,
        observed,
        expected_ry,
        &ValidationPolicy::default(),
    )
}

/// Selection, complementarity and net effects under an explicit policy.
pub fn biodiversity_effect_with_policy(
    monoculture: &[f64],
    observed: &[f64],
    expected_ry: &[f64],
    policy: &ValidationPolicy,
) -> Result<LoreauHector, BefError> {
    policy.check(monoculture, observed, expected_ry, MIN_SPECIES)?;
    loreau_hector_terms(monoculture, observed, expected_ry)
}

/// Trait-independent complementarity, dominance and trait-dependent
/// complementarity under the default policy.
pub fn tripartite_partition(
    monoculture: &[f64],
    observed: &[f64],
    expected_ry: &[f64],
) -> Result<Tripartite, BefError> {
    tripartite_partition_with_policy(
        monoculture,
        observed,
        expected_ry,
        &ValidationPolicy::default(),
    )
}

/// Tripartite partition under an explicit policy.
///
/// Fails with [`BefError::DivisionByZero`] when every observed yield is zero,
/// since the relative yield shares are then undefined.
pub fn tripartite_partition_with_policy(
    monoculture: &[f64],
    observed: &[f64],
    expected_ry: &[f64],
    policy: &ValidationPolicy,
) -> Result<Tripartite, BefError> {
    policy.check(monoculture, observed, expected_ry, MIN_SPECIES)?;
    tripartite_terms(monoculture, observed, expected_ry)
}

// Callers must have validated the inputs.
pub(crate) fn loreau_hector_terms(
    monoculture: &[f64],
    observed: &[f64],
    expected_ry: &[f64],
) -> Result<LoreauHector, BefError> {
    let n = monoculture.len() as f64;
    let deviation = relative_yield_deviation(monoculture, observed, expected_ry);

    let observed_total: f64 = observed.iter().sum();
    let expected_total: f64 = monoculture
        .iter()
        .zip(expected_ry)
        .map(|(m, rye)| rye * m)
        .sum();

    let complementarity = n * mean(&deviation)? * mean(monoculture)?;
    let selection = n * population_covariance(&deviation, monoculture)?;
    Ok(LoreauHector {
        selection: finite("SE", selection)?,
        complementarity: finite("CE", complementarity)?,
        net: finite("NE", observed_total - expected_total)?,
    })
}

pub(crate) fn tripartite_terms(
    monoculture: &[f64],
    observed: &[f64],
    expected_ry: &[f64],
) -> Result<Tripartite, BefError> {
    let n = monoculture.len() as f64;
    let relative = relative_yields(monoculture, observed);
    let relative_total: f64 = relative.iter().sum();
    if relative_total == 0.0 {
        return Err(BefError::DivisionByZero(
            ErrorInfo::new(
                "relative-yield-total-zero",
                "observed relative yields sum to zero so their shares are undefined",
            )
            .with_hint("at least one species must yield in the mixture"),
        ));
    }
    let share: Vec<f64> = relative.iter().map(|ry| ry / relative_total).collect();

    let deviation: Vec<f64> = relative
        .iter()
        .zip(expected_ry)
        .map(|(ryo, rye)| ryo - rye)
        .collect();
    let share_excess: Vec<f64> = share
        .iter()
        .zip(expected_ry)
        .map(|(s, rye)| s - rye)
        .collect();
    let share_residual: Vec<f64> = relative.iter().zip(&share).map(|(ry, s)| ry - s).collect();

    let trait_independent = n * mean(&deviation)? * mean(monoculture)?;
    let dominance = n * population_covariance(monoculture, &share_excess)?;
    let trait_dependent = n * population_covariance(monoculture, &share_residual)?;
    Ok(Tripartite {
        trait_independent: finite("tic", trait_independent)?,
        dominance: finite("dom", dominance)?,
        trait_dependent: finite("tdc", trait_dependent)?,
    })
}

fn relative_yields(monoculture: &[f64], observed: &[f64]) -> Vec<f64> {
    observed
        .iter()
        .zip(monoculture)
        .map(|(yo, m)| yo / m)
        .collect()
}

fn relative_yield_deviation(
    monoculture: &[f64],
    observed: &[f64],
    expected_ry: &[f64],
) -> Vec<f64> {
    relative_yields(monoculture, observed)
        .into_iter()
        .zip(expected_ry)
        .map(|(ryo, rye)| ryo - rye)
        .collect()
}
