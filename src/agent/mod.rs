use crate::terrain::coordinates::GridCoord;
use std::collections::VecDeque;

/// What a single call to [`Agent::step`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Advanced one cell along the route
    Moved(GridCoord),
    /// Standing on the target; the route has been dropped
    Arrived,
    /// No target, or the route ran out before reaching it
    Idle,
}

/// The routed walker on the grid.
///
/// The route is consumed front to back, one cell per step. Arrival is decided
/// by comparing position and target, never by the route running dry, so a
/// route of `[goal]` while already standing on the goal costs zero moves.
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    position: GridCoord,
    target: Option<GridCoord>,
    route: VecDeque<GridCoord>,
    position_invalid: bool,
}

impl Agent {
    pub fn new(position: GridCoord) -> Self {
        Self {
            position,
            target: None,
            route: VecDeque::new(),
            position_invalid: false,
        }
    }

    pub fn position(&self) -> GridCoord {
        self.position
    }

    pub fn target(&self) -> Option<GridCoord> {
        self.target
    }

    /// Cells still to walk
    pub fn remaining(&self) -> usize {
        self.route.len()
    }

    pub fn route(&self) -> impl Iterator<Item = GridCoord> + '_ {
        self.route.iter().copied()
    }

    /// Set when the agent stands, or was asked to stand, on water or forest
    pub fn is_position_invalid(&self) -> bool {
        self.position_invalid
    }

    pub(crate) fn mark_position_invalid(&mut self, invalid: bool) {
        self.position_invalid = invalid;
    }

    /// Move without walking. Drops any active route.
    pub fn teleport(&mut self, position: GridCoord) {
        self.position = position;
        self.clear_route();
    }

    /// Replace the active route wholesale
    pub fn set_route(&mut self, target: GridCoord, route: Vec<GridCoord>) {
        self.target = Some(target);
        self.route = route.into();
    }

    pub fn clear_route(&mut self) {
        self.target = None;
        self.route.clear();
    }

    pub fn has_arrived(&self) -> bool {
        self.target == Some(self.position)
    }

    pub fn step(&mut self) -> StepOutcome {
        let Some(target) = self.target else {
            return StepOutcome::Idle;
        };

        if self.position == target {
            self.route.clear();
            return StepOutcome::Arrived;
        }

        match self.route.pop_front() {
            Some(next) => {
                self.position = next;
                StepOutcome::Moved(next)
            }
            None => StepOutcome::Idle,
        }
    }
}
