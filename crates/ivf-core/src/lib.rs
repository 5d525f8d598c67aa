#![deny(missing_docs)]
#![doc = "Shared error, provenance and hashing types for the interval finder workspace."]

pub mod errors;
pub mod hash;
pub mod provenance;

pub use errors::{ErrorInfo, IvfError};
pub use hash::{stable_hash_string, to_canonical_json_bytes};
pub use provenance::{RunProvenance, SchemaVersion};
