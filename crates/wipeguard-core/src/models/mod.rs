mod progress;
mod risk;
mod session;
mod uploaded_file;

pub use progress::*;
pub use risk::*;
pub use session::*;
pub use uploaded_file::*;
