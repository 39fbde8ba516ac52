/// Oriented texture storage for tile rendering
pub mod cache;
/// Model trait and the generic observe/propagate driver
pub mod executor;
/// Overlapping model built from sample patterns
pub mod overlapping;
/// Constraint propagation for both model families
pub mod propagation;
/// Minimum-entropy cell selection and weighted state draws
pub mod selection;
/// Simple tiled model built from a tile catalog
pub mod tiled;
