use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Grid coordinates (unsigned integers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[display("({x}, {y})")]
pub struct GridCoord {
    pub x: u32,
    pub y: u32,
}

impl GridCoord {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Check if these coordinates fall inside a `width` x `height` grid
    pub fn is_within(&self, width: u32, height: u32) -> bool {
        self.x < width && self.y < height
    }

    /// Linear index of this coordinate in a row-major grid of the given width
    pub fn to_index(&self, width: u32) -> usize {
        grid_index(width, self.x, self.y)
    }

    /// Inverse of [`GridCoord::to_index`]
    pub fn from_index(index: usize, width: u32) -> Self {
        let width = width as usize;
        Self::new((index % width) as u32, (index / width) as u32)
    }

    /// Manhattan distance to another coordinate
    pub fn manhattan_distance(&self, other: &GridCoord) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Whether `other` is one axis-aligned step away
    pub fn is_adjacent(&self, other: &GridCoord) -> bool {
        self.manhattan_distance(other) == 1
    }
}

/// Row-major index: `y * width + x`
pub fn grid_index(width: u32, x: u32, y: u32) -> usize {
    y as usize * width as usize + x as usize
}

/// Iterate over the in-bounds 8-connected neighbours of a cell
pub fn neighbors_8(width: u32, height: u32, x: u32, y: u32) -> impl Iterator<Item = GridCoord> {
    const OFFSETS: [(i64, i64); 8] = [
        (-1, -1),
        (0, -1),
        (1, -1),
        (1, 0),
        (1, 1),
        (0, 1),
        (-1, 1),
        (-1, 0),
    ];

    OFFSETS.into_iter().filter_map(move |(dx, dy)| {
        let nx = x as i64 + dx;
        let ny = y as i64 + dy;
        if nx >= 0 && ny >= 0 && nx < width as i64 && ny < height as i64 {
            Some(GridCoord::new(nx as u32, ny as u32))
        } else {
            None
        }
    })
}

/// Iterate over the in-bounds 4-connected neighbours of a cell (left, right, up, down)
pub fn neighbors_4(width: u32, height: u32, x: u32, y: u32) -> impl Iterator<Item = GridCoord> {
    let left = (x > 0).then(|| GridCoord::new(x - 1, y));
    let right = (x + 1 < width).then(|| GridCoord::new(x + 1, y));
    let up = (y > 0).then(|| GridCoord::new(x, y - 1));
    let down = (y + 1 < height).then(|| GridCoord::new(x, y + 1));

    [left, right, up, down].into_iter().flatten()
}
