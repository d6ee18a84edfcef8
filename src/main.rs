//! Death By Dots headless runner
//!
//! Builds a level and drives it with a simple autopilot until the player wins,
//! dies or runs out of ticks. Useful for eyeballing generated levels and
//! checking that a seed is beatable.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use death_by_dots::render::{draw_list, shapes};
use death_by_dots::sim::{MoveIntent, Session, TickInput, TickResult, tick};
use death_by_dots::{Result, Settings};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Level seed (overrides the settings file)
    #[arg(long)]
    seed: Option<u64>,
    /// JSON settings file
    #[arg(long, default_value = "death_by_dots.json")]
    settings: PathBuf,
    /// Give up after this many ticks
    #[arg(long, default_value_t = 20_000)]
    ticks: u64,
    /// Simulated seconds per tick
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,
    /// Pace ticks on the wall clock instead of running flat out
    #[arg(long)]
    realtime: bool,
    /// Turn on spawning turrets
    #[arg(long)]
    spawning: bool,
}

/// Heads right and sidesteps vertically when a wall stops it
struct Autopilot {
    going_down: bool,
    sidestep: u32,
}

impl Autopilot {
    fn new() -> Self {
        Self {
            going_down: true,
            sidestep: 0,
        }
    }

    fn intent(&self) -> MoveIntent {
        MoveIntent {
            right: self.sidestep == 0,
            down: self.sidestep > 0 && self.going_down,
            up: self.sidestep > 0 && !self.going_down,
            left: false,
        }
    }

    /// Feed back how far the player actually moved last tick
    fn observe(&mut self, moved: glam::Vec2) {
        if self.sidestep > 0 {
            self.sidestep -= 1;
            if moved.y == 0.0 {
                // Hit the top or bottom edge or another block
                self.going_down = !self.going_down;
            }
        } else if moved.x == 0.0 {
            self.sidestep = 9;
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut settings = Settings::load(&cli.settings)?;
    if cli.seed.is_some() {
        settings.seed = cli.seed;
    }
    settings.spawning_turrets |= cli.spawning;

    let mut session = Session::new(&settings)?;
    log::info!("Seed {}", session.seed());

    let frame = Duration::from_millis(settings.frame_limit_ms);
    let mut autopilot = Autopilot::new();
    let mut last = Instant::now();
    let mut outcome = TickResult::Continue;

    for _ in 0..cli.ticks {
        let dt = if cli.realtime {
            let since = last.elapsed();
            if since < frame {
                std::thread::sleep(frame - since);
            }
            let now = Instant::now();
            let dt = now.duration_since(last).as_secs_f32();
            last = now;
            dt
        } else {
            cli.dt
        };

        let before = session.player().pos();
        let report = tick(
            &mut session,
            &TickInput {
                intent: autopilot.intent(),
                dt,
            },
        );
        autopilot.observe(session.player().pos() - before);

        if report.bullets_fired > 0 {
            log::debug!(
                "tick {}: {} fired, {} in flight",
                session.time_ticks,
                report.bullets_fired,
                session.bullets().len()
            );
        }
        if report.result != TickResult::Continue {
            outcome = report.result;
            break;
        }
    }

    let vertices = shapes::quads(&draw_list(&session), glam::Vec2::ZERO);
    log::debug!("Final frame: {} vertices", vertices.len());

    println!(
        "seed={} outcome={:?} ticks={} elapsed={:.1}s shots={} player={:?}",
        session.seed(),
        outcome,
        session.time_ticks,
        session.elapsed,
        session.shots_fired,
        session.player().pos()
    );
    Ok(())
}

fn main() {
    env_logger::init();
    log::info!("Death By Dots (headless) starting...");

    if let Err(err) = run(Cli::parse()) {
        log::error!("{err}");
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
