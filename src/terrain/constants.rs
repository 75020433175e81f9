/// Constants for the terrain generation system

/// Noise layering
pub const BASE_FREQUENCY: f64 = 2.0;
pub const OCTAVES: u32 = 3;
pub const OCTAVE_WEIGHT: f64 = 0.5;
pub const SEED_OFFSET_RANGE: i32 = 2048;

/// Height shaping
pub const HEIGHT_CEILING: f32 = 2550.0;
pub const HEIGHT_SHAPING_EXPONENT: f64 = 1.5;
pub const COAST_INNER_EXPONENT: f64 = 1.5;
pub const COAST_OUTER_EXPONENT: f64 = 3.5;
pub const COAST_LOWER_WEIGHT: f64 = 0.4;

/// Moisture shaping
pub const WATER_CEILING: f64 = 255.0;
pub const WATER_SHAPING_EXPONENT: f64 = 1.5;
pub const WATER_CONTRAST_EXPONENT: f64 = 3.0;

/// Slope: horizontal distance between neighbouring cells, in height units
pub const CELL_SPACING: f32 = 10.0;

/// Classification thresholds on scaled elevation (`height / ELEVATION_SCALE`)
pub const ELEVATION_SCALE: f32 = 10.0;
pub const LAND_THRESHOLD: f32 = 20.0;
pub const FOREST_MIN_ELEVATION: f32 = 25.0;
pub const FOREST_MAX_ELEVATION: f32 = 70.0;
pub const FOREST_MIN_MOISTURE: u8 = 55;
