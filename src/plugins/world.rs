use crate::agent::StepOutcome;
use crate::terrain::coordinates::GridCoord;
use crate::world::{RouteStatus, WorldContext};
use bevy::prelude::*;
use std::collections::VecDeque;

/// Drives a [`WorldContext`] resource: queued commands first, then one agent
/// step per update. The context itself is inserted by the caller.
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WorldCommands>()
            .init_resource::<WorldStatus>()
            .add_systems(
                Update,
                (apply_world_commands, advance_agent)
                    .chain()
                    .run_if(resource_exists::<WorldContext>),
            );
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorldCommand {
    /// Rebuild the terrain; `None` picks a random seed
    Regenerate(Option<u32>),
    PlaceAgent(GridCoord),
    RouteTo(GridCoord),
}

/// Pending commands, applied in order at the start of the next update
#[derive(Resource, Debug, Default)]
pub struct WorldCommands {
    queue: VecDeque<WorldCommand>,
}

impl WorldCommands {
    pub fn push(&mut self, command: WorldCommand) {
        self.queue.push_back(command);
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// What the driver observed on the most recent updates
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct WorldStatus {
    pub last_route: Option<RouteStatus>,
    pub last_step: Option<StepOutcome>,
    /// Moves made since the last route was installed
    pub moves: u32,
    pub rejected_commands: u32,
}

fn apply_world_commands(
    mut commands: ResMut<WorldCommands>,
    mut world: ResMut<WorldContext>,
    mut status: ResMut<WorldStatus>,
) {
    while let Some(command) = commands.queue.pop_front() {
        let result = match command {
            WorldCommand::Regenerate(Some(seed)) => world.regenerate(seed),
            WorldCommand::Regenerate(None) => world.regenerate_random().map(|_| ()),
            WorldCommand::PlaceAgent(cell) => world.place_agent(cell),
            WorldCommand::RouteTo(goal) => world.route_to(goal).map(|route| {
                status.last_route = Some(route);
                status.moves = 0;
            }),
        };

        if let Err(err) = result {
            warn!("World command {command:?} rejected: {err}");
            status.rejected_commands += 1;
        }
    }
}

fn advance_agent(mut world: ResMut<WorldContext>, mut status: ResMut<WorldStatus>) {
    let outcome = world.step_agent();
    if matches!(outcome, StepOutcome::Moved(_)) {
        status.moves += 1;
    }
    status.last_step = Some(outcome);
}
