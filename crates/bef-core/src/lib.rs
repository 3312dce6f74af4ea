#![deny(missing_docs)]
#![doc = "Core error surface and value types shared by the biodiversity effect crates."]

pub mod errors;
pub mod provenance;
pub mod rng;
mod types;

pub use errors::{BefError, ErrorInfo};
pub use provenance::{RunProvenance, SchemaVersion};
pub use rng::{derive_substream_seed, RngHandle};
pub use types::{EffectKind, ParseEffectKindError, YieldVector};
