//! WipeGuard Database Library
//!
//! Repositories for uploaded file metadata. The Postgres implementation lives in [`db`];
//! enable the `test-helpers` feature for an in-memory implementation of the same trait.

pub mod db;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use db::{
    PostgresUploadedFileRepository, UploadedFileRepository, UploadedFileRepositoryTrait,
};
