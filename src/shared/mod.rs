pub mod error;
pub mod result;
pub mod security;

pub use error::{ExitCode, SnapshotError};
pub use result::Result;
