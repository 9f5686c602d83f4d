mod error;
pub mod fs;
pub mod global;
pub mod transcripts;

pub use error::*;
pub use transcripts::TranscriptVault;
