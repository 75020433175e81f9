use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use wayfinder::agent::StepOutcome;
use wayfinder::config::{load_config, load_config_from, range_types::StepBudget};
use wayfinder::errors::{WayfinderError, WayfinderResult};
use wayfinder::world::{RouteStatus, WorldContext};
use wayfinder::{WorldCommand, WorldCommands, WorldPlugin, WorldStatus};

mod cli_utils;

use cli_utils::{parse_coord, parse_size};

#[derive(ValueEnum, Clone, Copy, Debug)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

#[derive(Parser, Clone)]
#[command(name = "wayfinder")]
#[command(about = "Generate an island world and walk an agent across it")]
struct Args {
    /// Random seed for reproducible generation (overrides config)
    #[arg(long)]
    seed: Option<u32>,

    /// Map size in grid cells (format: WIDTHxHEIGHT)
    #[arg(long)]
    size: Option<String>,

    /// Agent start cell (format: X,Y)
    #[arg(long)]
    start: Option<String>,

    /// Goal cell to route the agent to (format: X,Y)
    #[arg(long)]
    goal: Option<String>,

    /// Stop walking after this many moves
    #[arg(long)]
    max_steps: Option<u32>,

    /// Config file to use instead of the one in the user config directory
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "info")]
    log_level: LogLevel,
}

fn main() -> WayfinderResult<()> {
    let args = Args::parse();

    let mut app = App::new();
    app.add_plugins(LogPlugin {
        level: args.log_level.into(),
        ..default()
    });

    let mut settings = match &args.config {
        Some(path) => load_config_from(path)?.settings,
        None => load_config().settings,
    };

    if let Some(seed) = args.seed {
        settings.seed = seed;
    }
    if let Some(size) = &args.size {
        (settings.width, settings.height) = parse_size(size)?;
        if args.start.is_none() {
            settings.agent_start.x = settings.width / 2;
            settings.agent_start.y = settings.height / 2;
        }
    }
    if let Some(start) = &args.start {
        settings.agent_start = parse_coord(start)?;
    }
    if let Some(max_steps) = args.max_steps {
        settings.step_budget = StepBudget::new(max_steps);
    }
    let goal = args.goal.as_deref().map(parse_coord).transpose()?;

    let world = WorldContext::new(settings)?;
    if world.agent().is_position_invalid() {
        let start = world.agent().position();
        let info = world.cell_info(start)?;
        return Err(WayfinderError::InvalidPlacement {
            x: start.x,
            y: start.y,
            kind: info.kind,
        });
    }

    let (land, water, forest) = world.terrain().kind_counts();
    println!(
        "World seed {} ({}x{}): {land} land, {water} water, {forest} forest",
        world.seed(),
        world.terrain().width,
        world.terrain().height
    );

    let Some(goal) = goal else {
        println!("No goal given, agent stays at {}", world.agent().position());
        return Ok(());
    };

    let goal_kind = world.cell_info(goal)?.kind;
    if !goal_kind.is_traversable() {
        return Err(WayfinderError::InvalidPlacement {
            x: goal.x,
            y: goal.y,
            kind: goal_kind,
        });
    }

    let budget = world.settings().step_budget.get();
    let start = world.agent().position();
    app.insert_resource(world).add_plugins(WorldPlugin);
    app.world_mut()
        .resource_mut::<WorldCommands>()
        .push(WorldCommand::RouteTo(goal));

    loop {
        app.update();

        let status = app.world().resource::<WorldStatus>();
        match status.last_step {
            Some(StepOutcome::Arrived) | Some(StepOutcome::Idle) | None => break,
            Some(StepOutcome::Moved(_)) if status.moves >= budget => {
                if !app.world().resource::<WorldContext>().agent().has_arrived() {
                    warn!("Step budget of {budget} exhausted before reaching {goal}");
                }
                break;
            }
            Some(StepOutcome::Moved(_)) => {}
        }
    }

    let status = app.world().resource::<WorldStatus>();
    let world = app.world().resource::<WorldContext>();
    match status.last_route {
        Some(RouteStatus::Found { steps, cost }) => {
            println!("Route {start} -> {goal}: {steps} steps, elevation cost {cost:.1}");
            println!(
                "Agent walked {} moves and is at {}{}",
                status.moves,
                world.agent().position(),
                if world.agent().has_arrived() {
                    " (arrived)"
                } else {
                    ""
                }
            );
        }
        Some(RouteStatus::NoPath) | None => {
            println!("No route from {start} to {goal}");
        }
    }

    Ok(())
}
