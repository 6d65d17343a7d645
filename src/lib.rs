pub mod config;
pub mod error;
pub mod simulation;

pub use config::*;
pub use error::EngineError;
pub use simulation::*;
