//! API constants

pub const API_VERSION: &str = "v1";
pub const API_PREFIX: &str = "/api/v1";

/// Request bodies may carry several files; the body limit is this many times the per-file limit.
pub const UPLOAD_BODY_FILE_FACTOR: usize = 16;
