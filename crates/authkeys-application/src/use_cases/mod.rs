//! Use Case Implementations
//!
//! | Use case | Description |
//! |----------|-------------|
//! | [`KeyStoreRotater`] | Restore, generate and periodically rotate signing keys |

pub mod key_rotation;

pub use key_rotation::{Generation, KeyStoreRotater, RotationTask};
