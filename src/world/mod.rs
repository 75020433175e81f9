use crate::agent::{Agent, StepOutcome};
use crate::errors::{WayfinderError, WayfinderResult};
use crate::map::{CellInfo, TerrainData};
use crate::pathfinding::PathFinder;
use crate::resources::WorldSettings;
use crate::terrain::coordinates::GridCoord;
use crate::terrain_generation::TerrainGenerator;
use bevy::log::{debug, info, warn};
use bevy::prelude::Resource;

/// Result of asking the agent to route somewhere
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RouteStatus {
    /// A route was installed; `steps` is the number of moves it takes
    Found { steps: usize, cost: f64 },
    /// The goal cannot be reached from where the agent stands
    NoPath,
}

/// The whole simulated world: current terrain plus the agent walking on it.
///
/// Terrain is replaced wholesale on regeneration and only ever read by the
/// pathfinder. The agent owns its route.
#[derive(Resource, Debug, Clone)]
pub struct WorldContext {
    settings: WorldSettings,
    seed: u32,
    terrain: TerrainData,
    agent: Agent,
}

impl WorldContext {
    pub fn new(settings: WorldSettings) -> WayfinderResult<Self> {
        settings.check()?;
        let terrain =
            TerrainGenerator::new(settings.seed).generate(settings.width, settings.height)?;
        Self::from_terrain(settings, terrain)
    }

    /// Wrap an existing terrain, e.g. a hand-built one. Its size must match the settings
    /// so that later regeneration keeps the same grid.
    pub fn from_terrain(settings: WorldSettings, terrain: TerrainData) -> WayfinderResult<Self> {
        if (terrain.width, terrain.height) != (settings.width, settings.height) {
            return Err(WayfinderError::InvalidTerrainData {
                reason: format!(
                    "Terrain is {}x{} but settings ask for {}x{}",
                    terrain.width, terrain.height, settings.width, settings.height
                ),
            });
        }

        let start = settings.agent_start;
        terrain.index_of(start)?;

        let mut world = Self {
            seed: settings.seed,
            settings,
            terrain,
            agent: Agent::new(start),
        };
        world.revalidate_agent();
        Ok(world)
    }

    pub fn settings(&self) -> &WorldSettings {
        &self.settings
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn terrain(&self) -> &TerrainData {
        &self.terrain
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    /// Rebuild the terrain from `seed` at the configured size. The agent keeps its
    /// cell but loses its route, and is flagged if that cell is no longer walkable.
    pub fn regenerate(&mut self, seed: u32) -> WayfinderResult<()> {
        self.terrain =
            TerrainGenerator::new(seed).generate(self.settings.width, self.settings.height)?;
        self.seed = seed;
        self.agent.clear_route();
        self.revalidate_agent();

        let (land, water, forest) = self.terrain.kind_counts();
        info!(
            "Regenerated world with seed {seed}: {land} land, {water} water, {forest} forest cells"
        );
        Ok(())
    }

    /// Regenerate from a fresh random seed and return it
    pub fn regenerate_random(&mut self) -> WayfinderResult<u32> {
        let seed = rand::random::<u32>();
        self.regenerate(seed)?;
        Ok(seed)
    }

    /// Put the agent on `cell`. A water or forest cell leaves the agent where it
    /// was, raises the invalid-position flag and reports `InvalidPlacement`.
    pub fn place_agent(&mut self, cell: GridCoord) -> WayfinderResult<()> {
        let index = self.terrain.index_of(cell)?;
        let kind = self.terrain.cell_kind(index);

        if !kind.is_traversable() {
            self.agent.mark_position_invalid(true);
            warn!("Refusing to place agent on {kind} at {cell}");
            return Err(WayfinderError::InvalidPlacement {
                x: cell.x,
                y: cell.y,
                kind,
            });
        }

        self.agent.teleport(cell);
        self.agent.mark_position_invalid(false);
        debug!("Agent placed at {cell}");
        Ok(())
    }

    /// Plan a route from the agent's cell to `goal` and hand it to the agent.
    /// The previous route is discarded either way.
    pub fn route_to(&mut self, goal: GridCoord) -> WayfinderResult<RouteStatus> {
        let goal_index = self.terrain.index_of(goal)?;
        let kind = self.terrain.cell_kind(goal_index);
        if !kind.is_traversable() {
            return Err(WayfinderError::InvalidPlacement {
                x: goal.x,
                y: goal.y,
                kind,
            });
        }

        let start = self.agent.position();
        let start_index = self.terrain.index_of(start)?;
        self.agent.clear_route();

        let Some(outcome) = PathFinder::new(&self.terrain).search(start_index, goal_index) else {
            info!("No route from {start} to {goal}");
            return Ok(RouteStatus::NoPath);
        };

        let steps = outcome.steps();
        debug!(
            "Route {start} -> {goal}: {steps} steps, cost {cost:.1}, expanded {expanded}",
            cost = outcome.cost,
            expanded = outcome.expanded
        );

        let route = outcome
            .path
            .iter()
            .map(|&index| self.terrain.coord_of(index))
            .collect();
        self.agent.set_route(goal, route);

        Ok(RouteStatus::Found {
            steps,
            cost: outcome.cost,
        })
    }

    pub fn step_agent(&mut self) -> StepOutcome {
        self.agent.step()
    }

    pub fn cell_info(&self, cell: GridCoord) -> WayfinderResult<CellInfo> {
        self.terrain.cell_info(cell)
    }

    fn revalidate_agent(&mut self) {
        let position = self.agent.position();
        let walkable = self
            .terrain
            .index_of(position)
            .map(|index| self.terrain.cell_kind(index).is_traversable())
            .unwrap_or(false);

        if !walkable {
            warn!("Agent at {position} is standing on water or forest");
        }
        self.agent.mark_position_invalid(!walkable);
    }
}
