//! Test helpers for downstream crates
//!
//! Provides an in-memory repository so services and HTTP handlers can be exercised without
//! a Postgres instance.

mod memory;

pub use memory::InMemoryUploadedFileRepository;
