use bef_core::errors::{BefError, ErrorInfo};

use crate::validate::{finite, ValidationPolicy};

/// Land equivalent ratio under the default policy.
///
/// `LER = Σ Yo[i] / (2 · M[i] · RYe[i])`. The factor two encodes the
/// two-species baseline: with `RYe = [0.5, 0.5]` each term collapses to the
/// ordinary relative yield `Yo[i] / M[i]`.
pub fn land_equivalent_ratio(
    monoculture: &[f64],
    observed: &[f64],
    expected_ry: &[f64],
) -> Result<f64, BefError> {
    land_equivalent_ratio_with_policy(
        monoculture,
        observed,
        expected_ry,
        &ValidationPolicy::default(),
    )
}

/// Land equivalent ratio under an explicit policy.
pub fn land_equivalent_ratio_with_policy(
    monoculture: &[f64],
    observed: &[f64],
    expected_ry: &[f64],
    policy: &ValidationPolicy,
) -> Result<f64, BefError> {
    policy.check(monoculture, observed, expected_ry, 1)?;
    ler_terms(monoculture, observed, expected_ry)
}

pub(crate) fn ler_terms(
    monoculture: &[f64],
    observed: &[f64],
    expected_ry: &[f64],
) -> Result<f64, BefError> {
    let mut total = 0.0;
    for (idx, ((m, yo), rye)) in monoculture.iter().zip(observed).zip(expected_ry).enumerate() {
        let denominator = 2.0 * m * rye;
        if denominator == 0.0 {
            return Err(BefError::DivisionByZero(
                ErrorInfo::new(
                    "ler-expected-share-zero",
                    "expected relative yield is zero so the LER term is undefined",
                )
                .with_context("index", idx),
            ));
        }
        total += yo / denominator;
    }
    finite("LER", total)
}

/// Species-2 intercrop yield giving `target_ler` for two species with equal
/// expected shares: `Y2 = target · M2 − (M2 / M1) · Y1`.
///
/// The result is returned unclamped and may be negative when `Y1` alone
/// already exceeds the target.
pub fn solve_yield_for_target_ler(
    m1: f64,
    m2: f64,
    y1: f64,
    target_ler: f64,
) -> Result<f64, BefError> {
    for (name, value) in [("m1", m1), ("m2", m2), ("y1", y1), ("target_ler", target_ler)] {
        if !value.is_finite() {
            return Err(BefError::NonFinite(
                ErrorInfo::new("input-non-finite", "input contains NaN or infinity")
                    .with_context("argument", name),
            ));
        }
    }
    if m1 == 0.0 {
        return Err(BefError::DivisionByZero(ErrorInfo::new(
            "monoculture-zero",
            "species-1 monoculture yield is zero",
        )));
    }
    finite("Y2", target_ler * m2 - (m2 / m1) * y1)
}

/// Evenly spaced `(Y1, Y2)` points on the iso-LER line from `(0, target·M2)`
/// to `(target·M1, 0)`.
pub fn ler_locus(
    m1: f64,
    m2: f64,
    target_ler: f64,
    samples: usize,
) -> Result<Vec<(f64, f64)>, BefError> {
    if samples < 2 {
        return Err(BefError::Shape(
            ErrorInfo::new("locus-samples", "an iso-LER line needs at least two points")
                .with_context("samples", samples),
        ));
    }
    let end = target_ler * m1;
    let step = end / (samples - 1) as f64;
    (0..samples)
        .map(|idx| {
            let y1 = if idx == samples - 1 {
                end
            } else {
                step * idx as f64
            };
            solve_yield_for_target_ler(m1, m2, y1, target_ler).map(|y2| (y1, y2))
        })
        .collect()
}
