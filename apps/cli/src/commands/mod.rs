pub mod edit;
pub mod jobs;
pub mod reflow;
pub mod show;
