use bef_core::errors::{BefError, ErrorInfo};
use serde::{Deserialize, Serialize};

/// Domain invariants enforced before any formula is evaluated.
///
/// Shape, finiteness and the monoculture divisor are always checked. The
/// remaining checks are ecological invariants that can be relaxed for
/// exploratory use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValidationPolicy {
    /// Reject negative monoculture or observed yields.
    #[serde(default = "default_true")]
    pub require_non_negative: bool,
    /// Reject expected relative yields whose total differs from one by more
    /// than `sum_tolerance`. Negative expected relative yields are rejected
    /// together with negative yields.
    #[serde(default = "default_true")]
    pub require_unit_expected_sum: bool,
    /// Absolute tolerance on the expected relative yield total.
    #[serde(default = "default_sum_tolerance")]
    pub sum_tolerance: f64,
}

fn default_true() -> bool {
    true
}

fn default_sum_tolerance() -> f64 {
    1e-6
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            require_non_negative: true,
            require_unit_expected_sum: true,
            sum_tolerance: default_sum_tolerance(),
        }
    }
}

impl ValidationPolicy {
    /// Policy that only checks shape, finiteness and divisors.
    pub fn permissive() -> Self {
        Self {
            require_non_negative: false,
            require_unit_expected_sum: false,
            sum_tolerance: default_sum_tolerance(),
        }
    }

    /// Validates one `(M, Yo, RYe)` triple and returns the species count.
    pub fn check(
        &self,
        monoculture: &[f64],
        observed: &[f64],
        expected_ry: &[f64],
        min_species: usize,
    ) -> Result<usize, BefError> {
        let n = check_shape(monoculture, observed, expected_ry, min_species)?;
        check_finite("monoculture", monoculture)?;
        check_finite("observed", observed)?;
        check_finite("expected_ry", expected_ry)?;

        if let Some(idx) = monoculture.iter().position(|value| *value == 0.0) {
            return Err(BefError::DivisionByZero(
                ErrorInfo::new(
                    "monoculture-zero",
                    "monoculture yield is zero and cannot scale the observed yield",
                )
                .with_context("index", idx)
                .with_hint("drop species without a monoculture reference"),
            ));
        }

        if self.require_non_negative {
            check_non_negative("monoculture", monoculture)?;
            check_non_negative("observed", observed)?;
            if let Some((idx, value)) = first_negative(expected_ry) {
                return Err(BefError::ExpectedYield(
                    ErrorInfo::new(
                        "expected-ry-negative",
                        "expected relative yields must not be negative",
                    )
                    .with_context("index", idx)
                    .with_context("value", value),
                ));
            }
        }

        if self.require_unit_expected_sum {
            let total: f64 = expected_ry.iter().sum();
            if (total - 1.0).abs() > self.sum_tolerance {
                return Err(BefError::ExpectedYield(
                    ErrorInfo::new(
                        "expected-ry-sum",
                        "expected relative yields must sum to one",
                    )
                    .with_context("sum", total)
                    .with_context("tolerance", self.sum_tolerance)
                    .with_hint("use ValidationPolicy::permissive() for non-standard designs"),
                ));
            }
        }
        Ok(n)
    }
}

fn check_shape(
    monoculture: &[f64],
    observed: &[f64],
    expected_ry: &[f64],
    min_species: usize,
) -> Result<usize, BefError> {
    let n = monoculture.len();
    if observed.len() != n || expected_ry.len() != n {
        return Err(BefError::Shape(
            ErrorInfo::new("length-mismatch", "yield vectors differ in length")
                .with_context("monoculture", n)
                .with_context("observed", observed.len())
                .with_context("expected_ry", expected_ry.len()),
        ));
    }
    if n < min_species {
        return Err(BefError::Shape(
            ErrorInfo::new("too-few-species", "not enough species for this operation")
                .with_context("species", n)
                .with_context("required", min_species),
        ));
    }
    Ok(n)
}

fn check_finite(name: &str, values: &[f64]) -> Result<(), BefError> {
    match values.iter().position(|value| !value.is_finite()) {
        Some(idx) => Err(BefError::NonFinite(
            ErrorInfo::new("input-non-finite", "input contains NaN or infinity")
                .with_context("vector", name)
                .with_context("index", idx),
        )),
        None => Ok(()),
    }
}

fn check_non_negative(name: &str, values: &[f64]) -> Result<(), BefError> {
    match first_negative(values) {
        Some((idx, value)) => Err(BefError::NegativeYield(
            ErrorInfo::new("yield-negative", "yields must not be negative")
                .with_context("vector", name)
                .with_context("index", idx)
                .with_context("value", value),
        )),
        None => Ok(()),
    }
}

fn first_negative(values: &[f64]) -> Option<(usize, f64)> {
    values
        .iter()
        .copied()
        .enumerate()
        .find(|(_, value)| *value < 0.0)
}

/// Converts an overflowed result into an explicit error.
pub(crate) fn finite(term: &str, value: f64) -> Result<f64, BefError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(BefError::NonFinite(
            ErrorInfo::new("result-non-finite", "computed term overflowed")
                .with_context("term", term),
        ))
    }
}
