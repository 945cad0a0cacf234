//! Value objects
//!
//! Immutable values that describe time windows and published key material.

/// Epoch-aligned time buckets
pub mod bucket;
/// Public JSON Web Keys
pub mod jwk;

pub use bucket::{Bucket, key_blob_ttl};
pub use jwk::{JwkSet, PublicJwk};
