//! WipeGuard Core Library
//!
//! This crate provides the domain models, the risk classifier, user settings, error types
//! and configuration shared by every WipeGuard component.

pub mod classifier;
pub mod config;
pub mod error;
pub mod models;
pub mod settings;
pub mod storage_types;

// Re-export commonly used types
pub use classifier::{classify, classify_with_reason, Classification, ClassifierConfig, MatchReason};
pub use config::{BaseConfig, Config, WipeServiceConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{RiskLevel, UploadedFile, WipeStatus, WipeType};
pub use settings::WipeSettings;
pub use storage_types::StorageBackend;
