//! Infrastructure Layer - authkeys
//!
//! Concrete services around the key lifecycle and the composition root.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment-based layered configuration and validation |
//! | [`crypto`] | AES-256-GCM blob encryption, RS256 signing and verification |
//! | [`logging`] | tracing subscriber setup |
//! | [`shutdown`] | Cancellation and tracking of background tasks |
//! | [`reporting`] | Error sink for the rotation loop |
//! | [`di`] | [`AppContext`](di::AppContext) bootstrap |

pub mod config;
pub mod constants;
pub mod crypto;
pub mod di;
pub mod error_ext;
pub mod logging;
pub mod reporting;
pub mod shutdown;

pub use config::{AppConfig, ConfigLoader};
pub use crypto::{CryptoService, TokenSigner, TokenVerifier};
pub use di::{AppContext, init_app, init_app_with_store};
pub use logging::init_logging;
pub use shutdown::ShutdownCoordinator;
