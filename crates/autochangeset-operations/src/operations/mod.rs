pub mod attribution;
pub mod detection;
pub mod emission;
mod generate;

pub use generate::{GenerateInput, GenerateOperation, GenerateOutput};
