use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::errors::{BefError, ErrorInfo};

/// Ordered per-species yields: monoculture yields, observed polyculture
/// yields or expected relative yields.
///
/// Construction only guarantees finite entries. Sign and sum constraints are
/// policy decisions taken by the engine's validation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct YieldVector(Vec<f64>);

impl YieldVector {
    /// Wraps the provided values, rejecting NaN and infinite entries.
    pub fn new(values: Vec<f64>) -> Result<Self, BefError> {
        if let Some((idx, value)) = values
            .iter()
            .enumerate()
            .find(|(_, value)| !value.is_finite())
        {
            return Err(BefError::NonFinite(
                ErrorInfo::new("yield-non-finite", "yield vector entries must be finite")
                    .with_context("index", idx)
                    .with_context("value", value),
            ));
        }
        Ok(Self(values))
    }

    /// Number of species.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true when no species are present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the raw values.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Sum of all entries.
    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }
}

impl TryFrom<Vec<f64>> for YieldVector {
    type Error = BefError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}

impl From<YieldVector> for Vec<f64> {
    fn from(vector: YieldVector) -> Self {
        vector.0
    }
}

impl AsRef<[f64]> for YieldVector {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

/// Terms produced by the Loreau–Hector and Fox tripartite decompositions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    /// Net biodiversity effect (observed minus expected total yield).
    #[serde(rename = "NE", alias = "ne")]
    Net,
    /// Selection effect.
    #[serde(rename = "SE", alias = "se")]
    Selection,
    /// Complementarity effect.
    #[serde(rename = "CE", alias = "ce")]
    Complementarity,
    /// Trait-independent complementarity.
    #[serde(rename = "tic", alias = "TIC")]
    TraitIndependent,
    /// Dominance effect.
    #[serde(rename = "dom", alias = "DOM")]
    Dominance,
    /// Trait-dependent complementarity.
    #[serde(rename = "tdc", alias = "TDC")]
    TraitDependent,
}

impl EffectKind {
    /// Every effect in display order.
    pub const ALL: [EffectKind; 6] = [
        EffectKind::Net,
        EffectKind::Complementarity,
        EffectKind::Selection,
        EffectKind::TraitIndependent,
        EffectKind::Dominance,
        EffectKind::TraitDependent,
    ];

    /// The Loreau–Hector triple in bar-chart order.
    pub const LOREAU_HECTOR: [EffectKind; 3] = [
        EffectKind::Net,
        EffectKind::Complementarity,
        EffectKind::Selection,
    ];

    /// Stable short label.
    pub fn label(self) -> &'static str {
        match self {
            EffectKind::Net => "NE",
            EffectKind::Selection => "SE",
            EffectKind::Complementarity => "CE",
            EffectKind::TraitIndependent => "tic",
            EffectKind::Dominance => "dom",
            EffectKind::TraitDependent => "tdc",
        }
    }

    /// Returns true for the net effect, which is drawn uncoloured.
    pub fn is_net(self) -> bool {
        matches!(self, EffectKind::Net)
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when parsing an unknown effect label.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown effect label `{0}` (expected one of NE, SE, CE, tic, dom, tdc)")]
pub struct ParseEffectKindError(pub String);

impl FromStr for EffectKind {
    type Err = ParseEffectKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Same label set as the serde renames and aliases.
        match s {
            "NE" | "ne" => Ok(EffectKind::Net),
            "SE" | "se" => Ok(EffectKind::Selection),
            "CE" | "ce" => Ok(EffectKind::Complementarity),
            "tic" | "TIC" => Ok(EffectKind::TraitIndependent),
            "dom" | "DOM" => Ok(EffectKind::Dominance),
            "tdc" | "TDC" => Ok(EffectKind::TraitDependent),
            _ => Err(ParseEffectKindError(s.to_string())),
        }
    }
}
