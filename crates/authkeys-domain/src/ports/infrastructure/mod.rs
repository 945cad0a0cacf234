//! Infrastructure Service Ports
//!
//! Ports for in-process services: the signing key window consumed by token
//! code, the error reporting sink, and the clock.

/// Clock port
pub mod clock;
/// Error reporter port
pub mod error_reporter;
/// Key store port
pub mod key_store;

pub use clock::Clock;
pub use error_reporter::ErrorReporter;
pub use key_store::KeyStore;
