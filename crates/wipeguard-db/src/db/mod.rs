//! Database repositories for data access layer

pub mod uploaded_file;

pub use uploaded_file::{
    PostgresUploadedFileRepository, UploadedFileRepository, UploadedFileRepositoryTrait,
};
