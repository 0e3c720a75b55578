//! WipeGuard Services Layer
//!
//! Business logic of a wipe session: storing uploads, classifying them, deleting their blobs
//! and purging their metadata. HTTP handling stays in `wipeguard-api`; this crate only talks
//! to the repository and storage traits.

pub mod session;

pub use session::{ProgressRegistry, SessionService, UploadInput};
pub use wipeguard_storage::{create_storage, Storage, StorageBackend, StorageError};
