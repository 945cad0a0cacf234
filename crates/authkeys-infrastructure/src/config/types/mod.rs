//! Configuration types module

pub mod app;
pub mod blob_store;
pub mod logging;
pub mod rotation;
pub mod secrets;

pub use app::AppConfig;
pub use blob_store::BlobStoreConfig;
pub use logging::LoggingConfig;
pub use rotation::RotationConfig;
pub use secrets::SecretsConfig;
