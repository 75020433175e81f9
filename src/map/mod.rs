use crate::errors::{WayfinderError, WayfinderResult};
use crate::terrain::constants::{ELEVATION_SCALE, LAND_THRESHOLD};
use crate::terrain::coordinates::GridCoord;
use crate::terrain_generation::fields::{forest_field, slope_field};
use derive_more::Display;

/// The four co-registered layers produced by one generation cycle.
///
/// Every layer is a flattened row-major grid indexed by `y * width + x`.
/// Slope and forest are derived from height and water; build terrain through
/// [`TerrainData::from_layers`] so the derived layers can never go stale.
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainData {
    pub width: u32,
    pub height: u32,
    /// Elevation in [0, 2550]
    pub heights: Vec<f32>,
    /// Mean neighbour slope in degrees
    pub slopes: Vec<f32>,
    /// Moisture in [0, 255]
    pub water: Vec<u8>,
    pub forest: Vec<bool>,
}

/// Traversal classification of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum CellKind {
    #[display("water")]
    Water,
    #[display("forest")]
    Forest,
    #[display("land")]
    Land,
}

impl CellKind {
    pub fn is_traversable(self) -> bool {
        self == CellKind::Land
    }
}

/// Everything known about one cell, for read-outs by a presentation layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellInfo {
    pub coord: GridCoord,
    pub elevation: f32,
    pub slope: f32,
    pub moisture: u8,
    pub forested: bool,
    pub kind: CellKind,
}

impl TerrainData {
    /// Assemble terrain from height and moisture layers, deriving slope and forest cover
    pub fn from_layers(
        width: u32,
        height: u32,
        heights: Vec<f32>,
        water: Vec<u8>,
    ) -> WayfinderResult<Self> {
        if width == 0 || height == 0 {
            return Err(WayfinderError::InvalidDimensions { width, height });
        }

        let expected_size = width as usize * height as usize;
        if heights.len() != expected_size || water.len() != expected_size {
            return Err(WayfinderError::InvalidTerrainData {
                reason: format!(
                    "Layer sizes (heights {}, water {}) do not match terrain dimensions {}x{} (expected {})",
                    heights.len(),
                    water.len(),
                    width,
                    height,
                    expected_size
                ),
            });
        }

        let slopes = slope_field(width, height, &heights);
        let forest = forest_field(&heights, &water);

        Ok(Self {
            width,
            height,
            heights,
            slopes,
            water,
            forest,
        })
    }

    /// Create flat, dry terrain for testing
    pub fn create_flat(width: u32, height: u32, base_height: f32) -> WayfinderResult<Self> {
        let cells = width as usize * height as usize;
        Self::from_layers(width, height, vec![base_height; cells], vec![0; cells])
    }

    pub fn cell_count(&self) -> usize {
        self.heights.len()
    }

    /// Resolve a coordinate to its index, reporting out-of-bounds coordinates
    pub fn index_of(&self, coord: GridCoord) -> WayfinderResult<usize> {
        if !coord.is_within(self.width, self.height) {
            return Err(WayfinderError::OutOfBounds {
                x: coord.x,
                y: coord.y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(coord.to_index(self.width))
    }

    pub fn coord_of(&self, index: usize) -> GridCoord {
        GridCoord::from_index(index, self.width)
    }

    /// Elevation divided by the display scale, the unit all thresholds are expressed in
    pub fn scaled_elevation(&self, index: usize) -> f32 {
        self.heights[index] / ELEVATION_SCALE
    }

    /// Classify a cell. Open water takes precedence over forest.
    pub fn cell_kind(&self, index: usize) -> CellKind {
        if self.scaled_elevation(index) < LAND_THRESHOLD {
            CellKind::Water
        } else if self.forest[index] {
            CellKind::Forest
        } else {
            CellKind::Land
        }
    }

    pub fn cell_info(&self, coord: GridCoord) -> WayfinderResult<CellInfo> {
        let index = self.index_of(coord)?;
        Ok(CellInfo {
            coord,
            elevation: self.heights[index],
            slope: self.slopes[index],
            moisture: self.water[index],
            forested: self.forest[index],
            kind: self.cell_kind(index),
        })
    }

    /// Count cells per classification as (land, water, forest)
    pub fn kind_counts(&self) -> (usize, usize, usize) {
        (0..self.cell_count()).fold((0, 0, 0), |(land, water, forest), index| {
            match self.cell_kind(index) {
                CellKind::Land => (land + 1, water, forest),
                CellKind::Water => (land, water + 1, forest),
                CellKind::Forest => (land, water, forest + 1),
            }
        })
    }
}
