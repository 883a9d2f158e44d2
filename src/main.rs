//! Headless driver: runs the simulation at a fixed step with a simple autopilot
//! steering Pac-Man, logging what happens along the way.
//!
//! Usage: `haunted-arcade [settings.json] [seconds]`

use std::cell::Cell;
use std::rc::Rc;

use anyhow::{Context, Result};
use thousands::Separable;
use tracing::{debug, info, warn};
use tracing_error::ErrorLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;

use haunted_arcade::constants::LOOP_TIME;
use haunted_arcade::entity::targeting::{choose_direction, open_options};
use haunted_arcade::entity::Actor;
use haunted_arcade::events::{EventBus, EventKind, GameEvent};
use haunted_arcade::formatter::{self, StepFormatter};
use haunted_arcade::game::state::GameState;
use haunted_arcade::game::Game;
use haunted_arcade::map::direction::Direction;
use haunted_arcade::replay::ReplayRecorder;
use haunted_arcade::settings::Settings;

/// Simulated seconds to run when none are given.
const DEFAULT_RUN_SECONDS: u64 = 120;
/// Snapshots are captured for the replay every this many steps.
const SNAPSHOT_PERIOD: u64 = 60;

fn setup_tracing() -> Result<()> {
    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().event_format(StepFormatter))
        .with(ErrorLayer::default());

    tracing::subscriber::set_global_default(subscriber).context("Could not set global default subscriber")
}

/// Heads for the nearest pellet, never reversing unless cornered.
fn autopilot(game: &Game) -> Option<Direction> {
    let player = game.player();
    let maze = game.maze();
    let from = player.tile();
    let target = maze
        .pellet_tiles()
        .chain(maze.power_pellet_tiles())
        .min_by_key(|tile| (*tile - from).length_squared())?;

    let options = open_options(player.motion(), maze);
    if options.is_empty() {
        return player.direction().map(Direction::opposite);
    }
    choose_direction(from, &options, target)
}

fn subscribe(events: &mut EventBus, finished: &Rc<Cell<bool>>) {
    events.on(EventKind::State, |event| {
        if let GameEvent::State { state } = event {
            info!(state = state.as_ref(), "State changed");
        }
    });
    events.on(EventKind::Level, |event| {
        if let GameEvent::Level { level, maze, .. } = event {
            info!(level, maze = %maze, "Level started");
        }
    });
    events.on(EventKind::Memory, |event| {
        if let GameEvent::Memory { title, caption, .. } = event {
            info!(title, caption, "Memory revealed");
        }
    });
    events.on(EventKind::GhostEaten, |event| {
        if let GameEvent::GhostEaten { ghost, combo, score } = event {
            info!(ghost = %ghost, combo, score, "Ghost eaten");
        }
    });
    events.on(EventKind::GhostMood, |event| {
        if let GameEvent::GhostMood { ghost, mood, affinity, .. } = event {
            debug!(ghost = %ghost, mood = mood.as_ref(), affinity, "Ghost mood");
        }
    });
    events.on(EventKind::Lives, |event| {
        if let GameEvent::Lives { lives } = event {
            info!(lives, "Lives");
        }
    });

    let finished = Rc::clone(finished);
    events.once(EventKind::GameOver, move |event| {
        if let GameEvent::GameOver { score, level } = event {
            info!(score = %score.separate_with_commas(), level, "Game over");
        }
        finished.set(true);
    });
}

fn main() -> Result<()> {
    setup_tracing()?;

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load(&path).with_context(|| format!("Failed to load settings from {path}"))?,
        None => Settings::default(),
    };
    let seconds = match args.next() {
        Some(raw) => raw.parse::<u64>().with_context(|| format!("Invalid run length: {raw}"))?,
        None => DEFAULT_RUN_SECONDS,
    };

    let finished = Rc::new(Cell::new(false));
    let mut events = EventBus::new();
    subscribe(&mut events, &finished);

    let mut game = Game::with_event_bus(settings.game_config(), events).context("Failed to build game")?;
    let mut replay = ReplayRecorder::new();
    if settings.replay {
        replay.start(0.0);
    }

    let step_ms = LOOP_TIME.as_secs_f32() * 1000.0;
    let steps = (seconds as f64 / LOOP_TIME.as_secs_f64()) as u64;
    info!(steps, step_ms, "Starting simulation");

    let mut last_input = None;
    for step in 0..steps {
        if finished.get() {
            break;
        }

        let input = autopilot(&game);
        let now = step as f64 * step_ms as f64;
        if input != last_input {
            game.set_direction(input);
            replay.record_input(now, input);
            last_input = input;
        }

        game.update(step_ms);
        formatter::increment_step();

        if step % SNAPSHOT_PERIOD == 0 {
            replay.capture(now, game.snapshot());
        }
    }

    if game.state() != GameState::GameOver {
        warn!("Run length reached before game over");
    }
    info!(
        score = %game.score().separate_with_commas(),
        high_score = %game.high_score().separate_with_commas(),
        level = game.level(),
        events = game.events().emitted(),
        "Simulation finished"
    );

    if replay.is_recording() {
        replay.stop();
        let json = replay.to_json().context("Failed to serialize replay")?;
        println!("{json}");
    }

    Ok(())
}
