//! Application Ports
//!
//! The domain crate owns the provider and service traits; this layer only
//! adds the registry used to pick a blob store backend by name.

pub mod registry;

pub use registry::*;
