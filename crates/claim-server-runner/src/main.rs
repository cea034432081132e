//! Headless claim server runner
//!
//! This binary:
//! 1. Opens the claim store and loads every saved claim
//! 2. Simulates a world that players can join and act in
//! 3. Runs the tick loop, routing commands through the claim service
//!
//! Type `help` at the prompt for the command list.

mod commands;
mod sim;

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use claim_core::BlockPos;
use claim_protect::{
    ActorAction, ClaimConfig, ClaimService, Decision, Explosion, ItemActivation, WorldEvent,
};
use claim_store::LmdbStore;
use commands::{Action, Command, HELP, parse_command};
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::terminal::{self, ClearType};
use crossterm::{cursor, execute};
use eyre::WrapErr;
use sim::{SimWorld, explosion_blocks};
use tracing::{debug, info, warn};

/// Chunks kept loaded around each player.
const VIEW_DISTANCE: i32 = 8;

fn main() -> eyre::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("claim_server_runner=info".parse()?)
                .add_directive("claim_protect=info".parse()?)
                .add_directive("claim_store=info".parse()?),
        )
        .init();

    info!("Starting claim server runner");

    let config = load_config()?;

    let db_dir = std::env::var("CLAIM_DB_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data/claims"));

    info!("Claim database: {}", db_dir.display());

    let store = LmdbStore::open(&db_dir)
        .wrap_err_with(|| format!("failed to open claim database at {}", db_dir.display()))?;
    let mut service = ClaimService::open(config, Box::new(store))
        .wrap_err("failed to load saved claims")?;
    let mut world = SimWorld::new(VIEW_DISTANCE);

    let target_fps: f32 = std::env::var("TARGET_FPS")
        .ok()
        .and_then(|p| p.parse().ok())
        .filter(|fps: &f32| *fps > 0.0)
        .unwrap_or(20.0);

    // Set up command input channel
    let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();

    // Spawn input thread
    thread::spawn(move || {
        input_thread(cmd_tx);
    });

    // Enable raw mode for keyboard input
    terminal::enable_raw_mode().ok();

    print_prompt();

    // Run game loop
    let target_delta = Duration::from_secs_f32(1.0 / target_fps);
    let mut tick: u64 = 0;
    let mut running = true;

    while running {
        let start = std::time::Instant::now();

        // Check for commands
        while let Ok(cmd) = cmd_rx.try_recv() {
            clear_line();
            running = apply_command(cmd, &mut service, &mut world);
            print_prompt();
        }

        // Progress the world
        if let Some(stats) = service.tick(&mut world) {
            debug!(
                "Rendered {} claim border(s) with {} marker(s)",
                stats.claims_rendered, stats.markers
            );
        }
        tick += 1;

        // Update title with tick count
        if tick.is_multiple_of(20) {
            update_title(tick, &service, &world);
        }

        // Sleep to maintain target FPS
        let elapsed = start.elapsed();
        if elapsed < target_delta {
            std::thread::sleep(target_delta - elapsed);
        }
    }

    // Cleanup
    terminal::disable_raw_mode().ok();

    Ok(())
}

fn load_config() -> eyre::Result<ClaimConfig> {
    let Ok(path) = std::env::var("CLAIM_CONFIG") else {
        return Ok(ClaimConfig::default());
    };

    let json = std::fs::read_to_string(&path)
        .wrap_err_with(|| format!("failed to read config file {path}"))?;
    let config =
        ClaimConfig::from_json(&json).wrap_err_with(|| format!("invalid config file {path}"))?;
    info!("Loaded config from {path}");
    Ok(config)
}

/// Apply one command. Returns `false` once the runner should stop.
fn apply_command(cmd: Command, service: &mut ClaimService, world: &mut SimWorld) -> bool {
    match cmd {
        Command::Join { name, at } => {
            let id = world.join(&name, at);
            info!("{name} joined at ({:.1}, {:.1}, {:.1}) as {id}", at.x, at.y, at.z);
        }
        Command::Leave { name } => match world.leave(&name) {
            Some(id) => {
                service.handle_event(&WorldEvent::PlayerLeave(id), world);
                info!("{name} left");
            }
            None => warn!("No player named '{name}'"),
        },
        Command::Move { name, at } => {
            if world.move_player(&name, at) {
                info!("{name} moved to ({:.1}, {:.1}, {:.1})", at.x, at.y, at.z);
            } else {
                warn!("No player named '{name}'");
            }
        }
        Command::Point { name, x, z } => {
            let (Some(id), Some(at)) = (world.id_of(&name).cloned(), world.position_of(&name))
            else {
                warn!("No player named '{name}'");
                return true;
            };
            // The click lands on the column at the player's feet height
            let y = at.block().y;
            let event = WorldEvent::ItemActivation(ItemActivation {
                player: id,
                item: service.config().tool_item.clone(),
                target: Some(BlockPos::new(x, y, z)),
            });
            service.handle_event(&event, world);
        }
        Command::Act {
            action,
            name,
            block,
        } => {
            let Some(id) = world.id_of(&name).cloned() else {
                warn!("No player named '{name}'");
                return true;
            };
            let act = ActorAction::new(id, block);
            let event = match action {
                Action::Interact => WorldEvent::BlockInteraction(act),
                Action::Break => WorldEvent::BlockBreak(act),
                Action::Entity => WorldEvent::EntityInteraction(act),
                Action::UseOn => WorldEvent::ItemUseOn(act),
            };
            let decision = service.handle_event(&event, world);
            report(&format!("{name} {} {block:?}", action.name()), decision);
        }
        Command::Explode { center, radius } => {
            let event = WorldEvent::Explosion(Explosion {
                source: None,
                impacted: explosion_blocks(center, radius),
            });
            let decision = service.handle_event(&event, world);
            report(&format!("explosion at {center:?} radius {radius}"), decision);
        }
        Command::Claims => {
            let claims = service.registry().snapshot();
            info!("Claims ({}):", claims.len());
            for claim in claims {
                let owner = world.name_of(&claim.owner).unwrap_or(claim.owner.as_str());
                info!("  - {owner}: {} (area {})", claim.bounds, claim.bounds.area());
            }
        }
        Command::Help => {
            info!("\r\nCommands:");
            for line in HELP {
                info!("  {line}");
            }
        }
        Command::Quit => {
            info!("Shutting down...");
            return false;
        }
        Command::Invalid(usage) => warn!("{usage}"),
        Command::Unknown(s) => {
            if !s.is_empty() {
                info!("Unknown command: '{}'. Type 'help' for commands.", s);
            }
        }
    }
    true
}

fn report(what: &str, decision: Decision) {
    match decision {
        Decision::Allow => info!("{what}: allowed"),
        Decision::Cancel => info!("{what}: cancelled (claimed ground)"),
    }
}

#[allow(clippy::print_stdout)]
fn input_thread(tx: mpsc::Sender<Command>) {
    let mut input_buffer = String::new();

    loop {
        if event::poll(Duration::from_millis(50)).unwrap_or(false) {
            if let Ok(Event::Key(key_event)) = event::read() {
                if key_event.modifiers.contains(KeyModifiers::CONTROL)
                    && key_event.code == KeyCode::Char('c')
                {
                    let _ = tx.send(Command::Quit);
                    break;
                }

                match key_event.code {
                    KeyCode::Enter => {
                        let cmd = parse_command(&input_buffer);
                        let is_quit = matches!(cmd, Command::Quit);
                        let _ = tx.send(cmd);
                        input_buffer.clear();
                        if is_quit {
                            break;
                        }
                    }
                    KeyCode::Char(c) => {
                        input_buffer.push(c);
                        print!("{c}");
                        io::stdout().flush().ok();
                    }
                    KeyCode::Backspace => {
                        if input_buffer.pop().is_some() {
                            print!("\x08 \x08");
                            io::stdout().flush().ok();
                        }
                    }
                    KeyCode::Esc => {
                        input_buffer.clear();
                        clear_line();
                        print_prompt();
                    }
                    _ => {}
                }
            }
        }
    }
}

#[allow(clippy::print_stdout)]
fn print_prompt() {
    print!("\r> ");
    io::stdout().flush().ok();
}

fn clear_line() {
    let mut stdout = io::stdout();
    execute!(
        stdout,
        cursor::MoveToColumn(0),
        terminal::Clear(ClearType::CurrentLine)
    )
    .ok();
}

#[allow(clippy::print_stdout)]
fn update_title(tick: u64, service: &ClaimService, world: &SimWorld) {
    print!(
        "\x1b]0;Claim Runner - Tick: {tick} - Players: {} - Claims: {} - Particles: {}\x07",
        world.player_count(),
        service.registry().len(),
        world.particles()
    );
    io::stdout().flush().ok();
}
