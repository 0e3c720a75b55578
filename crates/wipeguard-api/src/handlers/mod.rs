pub mod scan;
pub mod session;
pub mod upload;
pub mod wipe;
