//! Domain models, shared types, and error definitions.
//!
//! Foundation crate -- no async or I/O dependencies.

pub mod error;
pub mod types;

pub use error::CorralError;
pub use types::{AccessMap, AccessPolicy, CowId, Folder, FolderId, Forest};
