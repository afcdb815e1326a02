use anyhow::{ensure, Context, Result};
use clap::Parser;
use log::info;

use crash_prevention_sim::simulation::{
    FixedStep, FrameLimiter, JitteredStep, Scenario, Simulation, TimeSource, WallClock,
};

#[derive(Parser)]
#[command(name = "crash_prevention_sim")]
#[command(about = "Vehicle crash prevention simulation with optional UI")]
struct Cli {
    /// Run with the Bevy game engine UI
    #[arg(long)]
    ui: bool,

    /// Which scenario to simulate
    #[arg(long, value_enum, default_value_t = Scenario::Intersection)]
    scenario: Scenario,

    /// Maximum number of frames to run in headless mode
    #[arg(long, default_value = "10000")]
    frames: u64,

    /// Time delta per frame in seconds (defaults to one frame at the target rate)
    #[arg(long)]
    delta: Option<f32>,

    /// Random variation applied to each headless frame delta, in seconds
    #[arg(long, default_value = "0.0")]
    jitter: f32,

    /// Seed for the jittered frame delta
    #[arg(long, default_value = "0")]
    seed: u64,

    /// Pace the headless run with the wall clock instead of a fixed delta
    #[arg(long)]
    realtime: bool,

    /// Restart the halted run this many times in headless mode
    #[arg(long, default_value = "0")]
    restarts: u32,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let simulation = Simulation::from_scenario(cli.scenario)
        .with_context(|| format!("failed to create {:?} scenario", cli.scenario))?;

    if cli.ui {
        return run_with_ui(cli.scenario, simulation);
    }

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn,crash_prevention_sim=info"),
    )
    .init();
    run_headless(&cli, simulation)
}

/// Run the simulation in headless mode (no graphics)
fn run_headless(cli: &Cli, mut simulation: Simulation) -> Result<()> {
    let delta = cli.delta.unwrap_or_else(|| simulation.config.frame_delta());
    ensure!(delta >= 0.0, "--delta must not be negative, got {}", delta);
    ensure!(cli.jitter >= 0.0, "--jitter must not be negative, got {}", cli.jitter);

    println!("Running {} in headless mode...", cli.scenario.title());
    println!("Frames: {}, Delta: {}s, Jitter: {}s", cli.frames, delta, cli.jitter);
    println!();

    let mut clock: Box<dyn TimeSource> = if cli.realtime {
        Box::new(WallClock::new())
    } else if cli.jitter > 0.0 {
        Box::new(JitteredStep::new(delta, cli.jitter, cli.seed))
    } else {
        Box::new(FixedStep::new(delta))
    };
    let mut limiter = cli
        .realtime
        .then(|| FrameLimiter::new(simulation.config.frame_rate));

    println!("Initial state:");
    simulation.print_summary();
    println!();

    let mut restarts_left = cli.restarts;
    let mut next_report = 1.0;

    for _ in 0..cli.frames {
        simulation.frame(clock.as_mut(), std::iter::empty());

        // Print a summary after every simulated second
        let elapsed = simulation.stats().elapsed_time;
        if elapsed >= next_report {
            println!("--- After {:.1}s simulated time ---", elapsed);
            simulation.print_summary();
            println!();
            next_report = elapsed.floor() + 1.0;
        }

        if simulation.state().is_halted() {
            if restarts_left == 0 {
                break;
            }
            restarts_left -= 1;
            simulation.restart();
            next_report = 1.0;
        }

        if let Some(limiter) = limiter.as_mut() {
            limiter.wait();
        }
    }

    if simulation.state().is_running() {
        info!(
            "Frame limit reached after {:.2}s without halting",
            simulation.stats().elapsed_time
        );
    }

    println!("=== Final State ===");
    simulation.print_summary();
    Ok(())
}

#[cfg(not(feature = "ui"))]
fn run_with_ui(_scenario: Scenario, _simulation: Simulation) -> Result<()> {
    anyhow::bail!("UI feature is not enabled. Rebuild with --features ui")
}

#[cfg(feature = "ui")]
fn run_with_ui(scenario: Scenario, simulation: Simulation) -> Result<()> {
    use bevy::log::LogPlugin;
    use bevy::prelude::*;

    use crash_prevention_sim::ui::CrashSimUIPlugin;

    println!("Starting {}...", scenario.title());
    println!();
    println!("Controls:");
    println!("  Click Restart - Restart once every vehicle has stopped");
    println!("  ESC           - Exit");
    println!();

    let window = simulation.config.window_size;

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(LogPlugin {
                    filter: "warn,crash_prevention_sim=debug".to_string(),
                    level: bevy::log::Level::DEBUG,
                    ..default()
                })
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: scenario.title().into(),
                        resolution: (window.width as u32, window.height as u32).into(),
                        resizable: false,
                        ..default()
                    }),
                    ..default()
                }),
        )
        .add_plugins(CrashSimUIPlugin {
            scenario,
            simulation,
        })
        .run();
    Ok(())
}
