//! Dependency wiring

pub mod bootstrap;

pub use bootstrap::{AppContext, init_app, init_app_with_store};
