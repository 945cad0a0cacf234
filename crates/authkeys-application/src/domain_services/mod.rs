//! Domain Services
//!
//! In-process building blocks of the key lifecycle.
//!
//! | Service | Description |
//! |---------|-------------|
//! | [`RotatingKeyStore`] | Previous/current signing key window |
//! | [`EpochIntervalTicker`] | Bucket transitions aligned to Unix time |
//! | [`SystemClock`] | Real-time clock |

/// System clock
pub mod clock;
/// Epoch-aligned ticker
pub mod epoch_ticker;
/// Rotating key window
pub mod rotating_key_store;

pub use clock::SystemClock;
pub use epoch_ticker::EpochIntervalTicker;
pub use rotating_key_store::RotatingKeyStore;
