//! # DELVE Headless Driver
//!
//! Runs the simulation without a window, feeding scripted input at the
//! configured tick rate, and prints a run summary.
//!
//! ```bash
//! # Classic layout, built-in catalog, 3600 frames
//! ./delve_headless
//!
//! # Custom data, more logging
//! RUST_LOG=delve=debug ./delve_headless data/simulation.toml data/catalog.toml 600
//! ```

use std::process::ExitCode;
use std::time::Instant;

use delve::economy::GameCatalog;
use delve::procedural::ChunkMesher;
use delve::{GameEvent, InputIntent, Simulation, SimulationConfig};
use tracing_subscriber::EnvFilter;

/// Frames run when no count is given (one minute at 60 Hz).
const DEFAULT_FRAMES: u64 = 3600;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}

/// Wanders: walks forward, turns for a while every few seconds, taps fire,
/// presses interact once a second.
fn scripted_input(frame: u64) -> InputIntent {
    InputIntent {
        forward: 1.0,
        strafe: 0.0,
        turn: if frame % 240 < 40 { 1.0 } else { 0.0 },
        look_x: 0.0,
        look_y: 0.0,
        fire: frame % 30 < 2,
        interact: frame % 60 == 0,
        switch_spell: i32::from(frame % 600 == 599),
    }
}

fn main() -> ExitCode {
    init_tracing();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => match SimulationConfig::from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(error = %e, "could not load simulation config");
                return ExitCode::FAILURE;
            }
        },
        None => SimulationConfig::default(),
    };
    let catalog = match args.next() {
        Some(path) => match GameCatalog::from_file(&path) {
            Ok(catalog) => catalog,
            Err(e) => {
                tracing::error!(error = %e, "could not load catalog");
                return ExitCode::FAILURE;
            }
        },
        None => GameCatalog::default(),
    };
    let frames = match args.next().map(|s| s.parse::<u64>()) {
        Some(Ok(n)) => n,
        Some(Err(e)) => {
            tracing::error!(error = %e, "frame count must be a whole number");
            return ExitCode::FAILURE;
        }
        None => DEFAULT_FRAMES,
    };

    println!("═══════════════════════════════════════════════════════════════════");
    println!("                    DELVE HEADLESS v{}", env!("CARGO_PKG_VERSION"));
    println!("═══════════════════════════════════════════════════════════════════");

    let dt = config.fixed_delta();
    let mut sim = Simulation::new(config, catalog, ChunkMesher::new());
    let events = sim.events();

    let mut kills = 0u32;
    let mut loot = 0u32;
    let mut peak_realized = 0usize;
    let started = Instant::now();

    for frame in 0..frames {
        let stats = sim.tick(dt, &scripted_input(frame));
        peak_realized = peak_realized.max(sim.world_stats().realized_chunks);

        for event in events.drain() {
            match event {
                GameEvent::HostileKilled { .. } => kills += 1,
                GameEvent::ItemLooted { .. } => loot += 1,
                _ => {}
            }
        }

        if stats.frame % u64::from(sim.config().tick_rate) == 0 {
            tracing::debug!(
                frame = stats.frame,
                x = sim.player().position.x,
                z = sim.player().position.z,
                hostiles_alive = stats.hostiles_alive,
                "second elapsed"
            );
        }

        if sim.player().dead {
            tracing::info!(frame = stats.frame, "run ended: player died");
            break;
        }
    }

    let elapsed = started.elapsed();
    let player = sim.player();
    let world = sim.world_stats();

    println!();
    println!("┌─ RUN ──────────────────────────────────────────────────────────┐");
    println!("│ Frames:             {}", sim.frame());
    println!("│ Simulated:          {:.1}s", sim.clock());
    println!("│ Wall clock:         {:.3}s", elapsed.as_secs_f64());
    println!("└────────────────────────────────────────────────────────────────┘");
    println!("┌─ PLAYER ───────────────────────────────────────────────────────┐");
    println!("│ Position:           ({:.1}, {:.1})", player.position.x, player.position.z);
    println!("│ Level:              {} ({}/{} xp)", player.level, player.experience, player.next_level);
    println!("│ Health:             {}/{}", player.health, player.max_health);
    println!("│ Kills:              {kills}");
    println!("│ Items looted:       {loot} (carrying {})", player.inventory.len());
    println!("└────────────────────────────────────────────────────────────────┘");
    println!("┌─ WORLD ────────────────────────────────────────────────────────┐");
    println!("│ Chunks generated:   {}", world.generated_chunks);
    println!("│ Chunks realized:    {} (peak {peak_realized})", world.realized_chunks);
    println!("│ Realized / released this session: {} / {}", world.realized_this_session, world.released_this_session);
    println!("│ Meshes alive:       {}", sim.world().renderer().live());
    println!("└────────────────────────────────────────────────────────────────┘");

    ExitCode::SUCCESS
}
