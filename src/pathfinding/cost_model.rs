use crate::map::{CellKind, TerrainData};
use crate::terrain::coordinates::{GridCoord, neighbors_4};

/// Traversability and edge costs over a generated terrain.
///
/// Cells are either open or blocked; there is no slow terrain. Moving between
/// two open cells costs their absolute elevation difference, so climbing and
/// descending are equally expensive and a flat plain is free.
#[derive(Debug, Clone, Copy)]
pub struct CostModel<'a> {
    terrain: &'a TerrainData,
}

impl<'a> CostModel<'a> {
    pub fn new(terrain: &'a TerrainData) -> Self {
        Self { terrain }
    }

    pub fn terrain(&self) -> &'a TerrainData {
        self.terrain
    }

    /// Open water or forest
    pub fn is_blocked(&self, index: usize) -> bool {
        self.terrain.cell_kind(index) != CellKind::Land
    }

    pub fn edge_weight(&self, from: usize, to: usize) -> f64 {
        (self.terrain.heights[to] as f64 - self.terrain.heights[from] as f64).abs()
    }

    /// Manhattan distance to the goal. Not a lower bound on elevation cost.
    pub fn heuristic(&self, index: usize, goal: GridCoord) -> f64 {
        self.terrain.coord_of(index).manhattan_distance(&goal) as f64
    }

    /// In-bounds axis-aligned neighbours, left, right, up, down
    pub fn neighbors(&self, index: usize) -> impl Iterator<Item = usize> + 'a {
        let width = self.terrain.width;
        let coord = self.terrain.coord_of(index);
        neighbors_4(width, self.terrain.height, coord.x, coord.y).map(move |n| n.to_index(width))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip() -> TerrainData {
        // land, land, water, forest, land
        TerrainData::from_layers(
            5,
            1,
            vec![300.0, 350.0, 120.0, 400.0, 260.0],
            vec![0, 0, 0, 200, 0],
        )
        .unwrap()
    }

    #[test]
    fn test_blocking_rules() {
        let terrain = strip();
        let model = CostModel::new(&terrain);

        assert!(!model.is_blocked(0));
        assert!(!model.is_blocked(1));
        assert!(model.is_blocked(2)); // open water
        assert!(model.is_blocked(3)); // forest
        assert!(!model.is_blocked(4));
    }

    #[test]
    fn test_edge_weight_is_symmetric_elevation_delta() {
        let terrain = strip();
        let model = CostModel::new(&terrain);

        assert_eq!(model.edge_weight(0, 1), 50.0);
        assert_eq!(model.edge_weight(1, 0), 50.0);
        assert_eq!(model.edge_weight(0, 0), 0.0);
        assert_eq!(model.edge_weight(3, 4), 140.0);
    }

    #[test]
    fn test_heuristic_is_manhattan() {
        let terrain = TerrainData::create_flat(6, 6, 500.0).unwrap();
        let model = CostModel::new(&terrain);

        assert_eq!(model.heuristic(0, GridCoord::new(5, 5)), 10.0);
        assert_eq!(model.heuristic(35, GridCoord::new(5, 5)), 0.0);
        assert_eq!(model.heuristic(7, GridCoord::new(0, 3)), 3.0);
    }

    #[test]
    fn test_neighbors_stay_on_grid() {
        let terrain = TerrainData::create_flat(3, 3, 500.0).unwrap();
        let model = CostModel::new(&terrain);

        let corner: Vec<_> = model.neighbors(0).collect();
        assert_eq!(corner, vec![1, 3]);

        let right_edge: Vec<_> = model.neighbors(5).collect();
        assert_eq!(right_edge, vec![4, 2, 8]);

        let center: Vec<_> = model.neighbors(4).collect();
        assert_eq!(center, vec![3, 5, 1, 7]);
    }
}
