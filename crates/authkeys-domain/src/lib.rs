//! # authkeys domain
//!
//! Core types for the signing-key lifecycle: the [`Key`] entity, the
//! [`Bucket`] time window, published JWKs, and the ports that the
//! application layer drives.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`entities`] | RSA signing keys with deterministic ids |
//! | [`value_objects`] | Buckets and JWKs |
//! | [`ports`] | Blob store, crypto, key store, error reporter, clock |
//! | [`error`] | Domain error type |
//! | [`constants`] | Fleet-wide constants |

pub mod constants;
pub mod entities;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use entities::Key;
pub use error::{Error, Result};
pub use value_objects::{Bucket, JwkSet, PublicJwk};
