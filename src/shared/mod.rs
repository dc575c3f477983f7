/// Shared utilities: error taxonomy, result alias and filesystem checks
pub mod error;
pub mod result;
pub mod security;

pub use result::Result;
