//! Utility modules

pub mod memory_storage;
pub mod recording_sender;
pub mod validation;

pub use memory_storage::*;
pub use recording_sender::*;
pub use validation::*;
