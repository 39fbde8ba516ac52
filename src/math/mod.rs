//! Mathematical utilities for the collapse driver

/// Entropy and weighted sampling
pub mod probability;
