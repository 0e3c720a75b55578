//! WipeGuard HTTP API
//!
//! The axum server exposing the session lifecycle: upload, scan, wipe, status, progress and
//! purge. `main` only loads configuration and calls into [`setup`].

pub mod api_doc;
pub mod constants;
pub mod error;
pub mod handlers;
pub mod setup;
pub mod state;
pub mod telemetry;
pub mod utils;

pub use error::{ErrorResponse, HttpAppError, ValidatedJson};
pub use state::AppState;
