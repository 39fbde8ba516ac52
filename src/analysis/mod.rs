//! Catalog analysis for the overlapping model

/// Pattern overlap agreement tables
pub mod adjacency;
/// Sample decoding and pattern extraction
pub mod patterns;
