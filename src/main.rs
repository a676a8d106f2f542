use std::path::PathBuf;
use std::process::ExitCode;

use glam::Vec3;
use hecs::World;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use deep_dungeon::components::{Chaser, Collider, Player, PlayerController, Position};
use deep_dungeon::constants::{CHASER_COUNT, PLAYER_EYE_HEIGHT};
use deep_dungeon::events::{EventQueue, GameEvent};
use deep_dungeon::systems::{living_chasers, move_player, player_attack, update_chasers, MoveInput};
use deep_dungeon::{DungeonConfig, Level, SeededRandom};

const SEED_ENV_VAR: &str = "DEEP_DUNGEON_SEED";
const SIM_STEPS: u32 = 600;
const SIM_DT: f32 = 1.0 / 60.0;
const ATTACK_INTERVAL_STEPS: u32 = 30;

fn main() -> ExitCode {
    init_tracing();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "run_failed");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => DungeonConfig::load(&path)?,
        None => DungeonConfig::default(),
    };
    if let Some(seed) = seed_from_env() {
        config.seed = Some(seed);
    }

    let mut rng = match config.seed {
        Some(seed) => SeededRandom::from_seed(seed),
        None => SeededRandom::from_entropy(),
    };
    info!(seed = rng.seed(), "level_seed");

    let level = Level::generate(&config, &mut rng)?;
    print!("{}", level.grid.render_ascii());

    let mut world = World::new();
    let spawn = level.entrance_position() + Vec3::Y * PLAYER_EYE_HEIGHT;
    let player = world.spawn((Player, Position(spawn), Collider::player(), PlayerController::default()));
    for slot in chaser_rooms(&level) {
        world.spawn((Position(level.room_position(slot)), Collider::chaser(), Chaser::default()));
    }
    info!(chasers = living_chasers(&world), "scene_loaded");

    // Stand still, swing periodically and let the chasers come
    let mut events = EventQueue::new();
    for step in 0..SIM_STEPS {
        move_player(&mut world, &level, player, MoveInput::default(), SIM_DT);
        update_chasers(&mut world, &level, player, SIM_DT, &mut events);
        if step % ATTACK_INTERVAL_STEPS == 0 {
            player_attack(&mut world, player, &mut events);
        }

        for event in events.drain() {
            match event {
                GameEvent::PlayerCaught { .. } => {
                    info!(step, outcome = "lose", "player_caught");
                    return Ok(());
                }
                GameEvent::ChaserDefeated { .. } => {}
                GameEvent::AllChasersDefeated => {
                    info!(step, outcome = "win", "all_chasers_defeated");
                    return Ok(());
                }
            }
        }
    }

    info!(steps = SIM_STEPS, chasers_left = living_chasers(&world), "simulation_finished");
    Ok(())
}

/// Rooms farthest from the entrance, one chaser each.
fn chaser_rooms(level: &Level) -> Vec<(i32, i32)> {
    let mut rooms: Vec<_> = level.rooms.iter().copied().filter(|&slot| slot != level.entrance).collect();
    let (ex, ey) = level.entrance;
    rooms.sort_by_key(|&(x, y)| std::cmp::Reverse((x - ex).abs() + (y - ey).abs()));
    rooms.truncate(CHASER_COUNT);
    rooms
}

fn seed_from_env() -> Option<u64> {
    let raw = std::env::var(SEED_ENV_VAR).ok()?;
    match raw.trim().parse() {
        Ok(seed) => Some(seed),
        Err(_) => {
            warn!(var = SEED_ENV_VAR, value = %raw, "seed_override_ignored");
            None
        }
    }
}
