//! WipeGuard Storage Library
//!
//! Blob storage for uploaded files, with a local filesystem and an S3 backend behind the
//! [`Storage`] trait.
//!
//! # Storage key format
//!
//! Keys are session-scoped: `{session_id}/{uuid}-{filename}`. The random segment keeps two
//! uploads of the same name apart. Only the key carries a reduced form of the client's file
//! name; keys never contain `..` or a leading `/`.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use keys::{generate_session_key, key_safe_filename};
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
pub use wipeguard_core::StorageBackend;
