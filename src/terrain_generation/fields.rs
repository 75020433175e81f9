//! Layers derived from the height and moisture passes

use crate::terrain::constants::{
    CELL_SPACING, ELEVATION_SCALE, FOREST_MAX_ELEVATION, FOREST_MIN_ELEVATION,
    FOREST_MIN_MOISTURE,
};
use crate::terrain::coordinates::{grid_index, neighbors_8};

/// Slope in degrees between two heights one cell apart
pub fn slope_between(a: f32, b: f32) -> f32 {
    ((a - b).abs() / CELL_SPACING).atan().to_degrees()
}

/// Per-cell mean slope over the in-bounds 8-connected neighbours.
///
/// Boundary cells average over fewer terms (corners over 3, edges over 5).
/// A cell with no neighbours at all gets a slope of 0.
pub fn slope_field(width: u32, height: u32, heights: &[f32]) -> Vec<f32> {
    let mut slopes = Vec::with_capacity(heights.len());

    for y in 0..height {
        for x in 0..width {
            let center = heights[grid_index(width, x, y)];
            let (sum, count) =
                neighbors_8(width, height, x, y).fold((0.0, 0u32), |(sum, count), n| {
                    (sum + slope_between(center, heights[n.to_index(width)]), count + 1)
                });

            slopes.push(if count == 0 { 0.0 } else { sum / count as f32 });
        }
    }

    slopes
}

/// Forest grows on mid elevations (neither lowland nor alpine) with enough rain
pub fn is_forest(elevation: f32, moisture: u8) -> bool {
    let scaled = elevation / ELEVATION_SCALE;
    scaled > FOREST_MIN_ELEVATION && scaled < FOREST_MAX_ELEVATION && moisture > FOREST_MIN_MOISTURE
}

pub fn forest_field(heights: &[f32], water: &[u8]) -> Vec<bool> {
    heights
        .iter()
        .zip(water)
        .map(|(&elevation, &moisture)| is_forest(elevation, moisture))
        .collect()
}
