/// Tileset catalog parsing
pub mod catalog;
/// Command-line parsing and the batch job runner
pub mod cli;
/// Defaults and limits
pub mod configuration;
/// Error types
pub mod error;
/// PNG loading and saving
pub mod image;
/// Job list parsing
pub mod jobs;
/// Terminal progress display
pub mod progress;
/// Wave rendering
pub mod visualization;
