mod error;
pub mod types;

pub use error::error_chain;
pub use types::*;
