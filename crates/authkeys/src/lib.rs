//! # authkeys
//!
//! Distributed rotation of RS256 signing keys for an auth service fleet.
//!
//! Every process keeps a two-key window (previous and current) in memory.
//! Keys are aligned to epoch buckets of the configured interval, so all
//! processes agree on which bucket is current from their clocks alone. The
//! first process to reach a new bucket generates its key and NX-writes it,
//! encrypted, to a shared blob store; everyone else adopts that key.
//!
//! ## Example
//!
//! ```ignore
//! use authkeys::infrastructure::{ConfigLoader, init_app};
//!
//! let context = init_app(ConfigLoader::new().load()?).await?;
//! let token = context.signer().sign(&claims)?;
//! let jwks = context.jwks();
//! ```
//!
//! ## Architecture
//!
//! - `domain` - keys, buckets, errors and port traits
//! - `application` - key window, epoch ticker and rotation use case
//! - `infrastructure` - config, logging, crypto and the composition root
//! - `providers` - blob store backends

use authkeys_domain::ports::infrastructure::KeyStore;
use authkeys_infrastructure::config::ConfigLoader;
use authkeys_infrastructure::constants::SHUTDOWN_TIMEOUT;
use authkeys_infrastructure::error_ext::ErrorContext;
use authkeys_infrastructure::{init_app, init_logging};
use std::path::Path;
use tracing::{info, warn};

/// Domain layer - core types and ports
pub mod domain {
    pub use authkeys_domain::*;
}

/// Application layer - key lifecycle orchestration
pub mod application {
    pub use authkeys_application::*;
}

/// Infrastructure layer - config, crypto, bootstrap
pub mod infrastructure {
    pub use authkeys_infrastructure::*;
}

/// Blob store backends
pub mod providers {
    pub use authkeys_providers::*;
}

pub use domain::{Bucket, Error, JwkSet, Key, Result};

/// Load configuration, bring the key window up and keep it rotating
///
/// With `check` set, prints the restored JWKS and returns once the window
/// is populated. Otherwise runs until Ctrl-C.
pub async fn run(config_path: Option<&Path>, check: bool) -> Result<()> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = config_path {
        loader = loader.with_config_path(path);
    }
    let config = loader.load()?;
    init_logging(config.logging.clone())?;

    let context = init_app(config).await?;

    if check {
        for key in context.key_store().keys() {
            info!(key_id = key.id(), bits = key.bits(), "Key in window");
        }
        let jwks = serde_json::to_string_pretty(&context.jwks())?;
        println!("{jwks}");
        context.shutdown().shutdown(SHUTDOWN_TIMEOUT).await;
        return Ok(());
    }

    tokio::select! {
        signal = tokio::signal::ctrl_c() => {
            signal.io_context("Failed to listen for Ctrl-C")?;
            info!("Received Ctrl-C");
        }
        () = context.shutdown().wait_for_shutdown() => {}
    }

    if !context.shutdown().shutdown(SHUTDOWN_TIMEOUT).await {
        warn!("Key rotation did not stop within the shutdown timeout");
    }
    Ok(())
}
