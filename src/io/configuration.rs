//! Model constants and runtime configuration defaults

// Overlapping model defaults
/// Default pattern window size
pub const DEFAULT_PATTERN_SIZE: usize = 2;
/// Default overlapping output width in pixels
pub const DEFAULT_OVERLAPPING_WIDTH: usize = 48;
/// Default overlapping output height in pixels
pub const DEFAULT_OVERLAPPING_HEIGHT: usize = 48;
/// Whether the sample wraps around when extracting patterns
pub const DEFAULT_PERIODIC_INPUT: bool = true;
/// Number of pattern orientations kept (all eight dihedral variants)
pub const DEFAULT_SYMMETRY: usize = 8;

// Tiled model defaults
/// Default tiled output width in cells
pub const DEFAULT_TILED_WIDTH: usize = 10;
/// Default tiled output height in cells
pub const DEFAULT_TILED_HEIGHT: usize = 10;
/// Tile edge length used when the catalog omits `size`
pub const DEFAULT_TILE_SIZE: usize = 16;

/// Upper bound on pattern orientations
pub const MAX_SYMMETRY: usize = 8;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: usize = 10_000;

// Job defaults shared by both model kinds
/// Images produced per job
pub const DEFAULT_SCREENSHOTS: usize = 2;
/// Seeds tried per image before giving up
pub const DEFAULT_ATTEMPTS: usize = 10;
/// Observe/propagate rounds per attempt (0 = unbounded)
pub const DEFAULT_LIMIT: usize = 0;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

// Output settings
/// Directory receiving rendered images
pub const DEFAULT_OUTPUT_DIR: &str = "./out";
/// File name of the tile catalog inside a tileset directory
pub const TILESET_CATALOG_FILE: &str = "data.xml";
