use crate::errors::WayfinderResult;
use crate::map::TerrainData;
use crate::terrain::coordinates::GridCoord;
use bevy::log::debug;

pub mod cost_model;
pub mod frontier;

pub use cost_model::CostModel;
pub use frontier::PriorityFrontier;

/// A queued cell together with the accumulated cost it was queued with
#[derive(Debug, Clone, Copy)]
struct SearchNode {
    index: usize,
    cost: f64,
}

/// Result of a successful search
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// Cell the search started from
    pub start: usize,
    /// Cell indices from the first step after the start up to and including the goal.
    /// When start and goal coincide this is just the goal.
    pub path: Vec<usize>,
    /// Sum of edge weights along `path`
    pub cost: f64,
    /// Cells whose neighbours were examined
    pub expanded: usize,
    /// Superseded frontier entries that were popped and skipped
    pub stale_pops: usize,
}

impl SearchOutcome {
    /// Number of moves needed to walk the path. Zero when the search started on the goal.
    pub fn steps(&self) -> usize {
        match self.path.as_slice() {
            [only] if *only == self.start => 0,
            path => path.len(),
        }
    }
}

/// Weighted 4-connected A* over a [`CostModel`].
///
/// The Manhattan heuristic is not a lower bound on elevation cost, so results
/// are not guaranteed optimal on rugged terrain. The start cell is never tested
/// for traversability; only cells being moved into are.
pub struct PathFinder<'a> {
    model: CostModel<'a>,
}

impl<'a> PathFinder<'a> {
    pub fn new(terrain: &'a TerrainData) -> Self {
        Self {
            model: CostModel::new(terrain),
        }
    }

    pub fn model(&self) -> &CostModel<'a> {
        &self.model
    }

    /// Search from `start` to `goal` (both grid indices). `None` means the goal
    /// is unreachable under the current blocking rules.
    pub fn search(&self, start: usize, goal: usize) -> Option<SearchOutcome> {
        let terrain = self.model.terrain();
        let goal_coord = terrain.coord_of(goal);
        let cells = terrain.cell_count();

        let mut frontier = PriorityFrontier::new();
        let mut came_from: Vec<Option<usize>> = vec![None; cells];
        let mut best_cost = vec![f64::INFINITY; cells];

        frontier.insert(SearchNode { index: start, cost: 0.0 }, 0.0);
        came_from[start] = Some(start);
        best_cost[start] = 0.0;

        let mut expanded = 0;
        let mut stale_pops = 0;
        let mut reached = false;

        while let Some(current) = frontier.extract_min() {
            // A cheaper route to this cell was queued after this entry
            if current.cost > best_cost[current.index] {
                stale_pops += 1;
                continue;
            }

            if current.index == goal {
                reached = true;
                break;
            }

            expanded += 1;
            let current_cost = best_cost[current.index];

            for next in self.model.neighbors(current.index) {
                if self.model.is_blocked(next) {
                    continue;
                }

                let new_cost = current_cost + self.model.edge_weight(current.index, next);
                if new_cost < best_cost[next] {
                    best_cost[next] = new_cost;
                    came_from[next] = Some(current.index);
                    let priority = new_cost + self.model.heuristic(next, goal_coord);
                    frontier.insert(
                        SearchNode {
                            index: next,
                            cost: new_cost,
                        },
                        priority,
                    );
                }
            }
        }

        if !reached {
            return None;
        }

        let path = reconstruct_path(&came_from, start, goal)?;

        Some(SearchOutcome {
            start,
            path,
            cost: best_cost[goal],
            expanded,
            stale_pops,
        })
    }
}

/// Walk predecessors back from the goal, stopping before the start
fn reconstruct_path(came_from: &[Option<usize>], start: usize, goal: usize) -> Option<Vec<usize>> {
    let mut path = vec![goal];
    let mut current = goal;

    loop {
        let previous = came_from[current]?;
        if previous == start {
            break;
        }
        path.push(previous);
        current = previous;
    }

    path.reverse();
    Some(path)
}

/// Find a route between two cells. An empty result means no route exists.
pub fn find_path(
    terrain: &TerrainData,
    start: GridCoord,
    goal: GridCoord,
) -> WayfinderResult<Vec<GridCoord>> {
    let start_index = terrain.index_of(start)?;
    let goal_index = terrain.index_of(goal)?;

    match PathFinder::new(terrain).search(start_index, goal_index) {
        Some(outcome) => {
            debug!(
                "Pathfinding success: {start} -> {goal} in {steps} steps, cost {cost:.1}, expanded {expanded}, stale pops {stale}",
                steps = outcome.steps(),
                cost = outcome.cost,
                expanded = outcome.expanded,
                stale = outcome.stale_pops
            );
            Ok(outcome
                .path
                .into_iter()
                .map(|index| terrain.coord_of(index))
                .collect())
        }
        None => {
            debug!("Pathfinding failed: no route from {start} to {goal}");
            Ok(Vec::new())
        }
    }
}

/// Whether the agent may stand on `cell`
pub fn is_traversable(terrain: &TerrainData, cell: GridCoord) -> WayfinderResult<bool> {
    let index = terrain.index_of(cell)?;
    Ok(!CostModel::new(terrain).is_blocked(index))
}
