//! Application Layer - authkeys
//!
//! Orchestrates the signing-key lifecycle on top of the domain ports.
//!
//! ## Architecture
//!
//! The application layer:
//! - Holds the in-memory key window consumed by signing and verification
//! - Schedules rotation on epoch-aligned bucket boundaries
//! - Resolves generation races through the shared blob store
//! - Declares the registry that blob store backends plug into
//!
//! ## Dependencies
//!
//! This crate depends only on:
//! - `authkeys-domain`: entities, value objects and port traits
//! - tokio / tokio-util for tasks, channels and cancellation

pub mod domain_services;
pub mod ports;
pub mod use_cases;

pub use domain_services::*;
pub use ports::*;
pub use use_cases::*;
