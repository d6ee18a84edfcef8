//! Per-tick orchestration
//!
//! Advances a session by one step. The caller supplies input and the elapsed
//! time since the previous tick; nothing here reads a clock.

use serde::{Deserialize, Serialize};

use super::entities::MoveIntent;
use super::state::{Phase, Session};

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    pub intent: MoveIntent,
    /// Seconds since the previous tick
    pub dt: f32,
}

/// What the host should do next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickResult {
    Continue,
    PlayerWon,
    PlayerDied,
}

/// Result plus bookkeeping for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub result: TickResult,
    pub bullets_fired: usize,
    pub bullets_removed: usize,
    pub turrets_spawned: usize,
    pub player_safe: bool,
}

impl TickReport {
    fn new(result: TickResult) -> Self {
        Self {
            result,
            bullets_fired: 0,
            bullets_removed: 0,
            turrets_spawned: 0,
            player_safe: false,
        }
    }
}

impl Session {
    /// Advance one tick and return only the outcome
    pub fn tick(&mut self, input: &TickInput) -> TickResult {
        tick(self, input).result
    }
}

/// Advance the session by one step.
///
/// Once a session has been won or lost, further calls return the same result
/// and change nothing.
pub fn tick(session: &mut Session, input: &TickInput) -> TickReport {
    match session.phase {
        Phase::Won => return TickReport::new(TickResult::PlayerWon),
        Phase::Died => return TickReport::new(TickResult::PlayerDied),
        Phase::Playing => {}
    }

    session.time_ticks += 1;
    session.elapsed += input.dt;
    for turret in &mut session.turrets {
        turret.gun.tick_clock(input.dt);
    }
    for turret in &mut session.moving_turrets {
        turret.gun.tick_clock(input.dt);
    }
    for turret in &mut session.spawning_turrets {
        turret.tick_clock(input.dt);
    }

    // Bullets fly before anything reacts to them
    for bullet in &mut session.bullets {
        bullet.update();
    }

    session.refresh_active();

    let player_bounds = session.player.bounds();
    if session.zones.reached_goal(&player_bounds) {
        log::info!(
            "Player reached the goal after {} ticks ({:.1}s)",
            session.time_ticks,
            session.elapsed
        );
        session.phase = Phase::Won;
        return TickReport::new(TickResult::PlayerWon);
    }

    let safe = session.zones.is_safe(&player_bounds);
    session.player_safe = safe;
    let target = (!safe).then(|| session.player.center());

    let mut report = TickReport::new(TickResult::Continue);
    report.player_safe = safe;
    let bullets_before = session.bullets.len();

    {
        let Session {
            grid,
            turrets,
            moving_turrets,
            spawning_turrets,
            bullets,
            active,
            rng,
            max_spawning_turrets,
            ..
        } = session;

        for &i in &active.turrets {
            turrets[i].update(target, grid, bullets);
        }
        for &i in &active.moving_turrets {
            moving_turrets[i].update(target, grid, bullets);
        }

        let mut clones = Vec::new();
        for &i in &active.spawning_turrets {
            let may_spawn = spawning_turrets.len() + clones.len() < *max_spawning_turrets;
            let out = spawning_turrets[i].update(target, grid, bullets, rng, may_spawn);
            if let Some(clone) = out.spawned {
                log::debug!("Spawning turret cloned at {:?}", clone.pos());
                clones.push(clone);
            }
        }
        report.turrets_spawned = clones.len();
        spawning_turrets.extend(clones);
    }

    report.bullets_fired = session.bullets.len() - bullets_before;
    session.shots_fired += report.bullets_fired as u64;

    session.player.update(&input.intent, &session.grid);

    let world = session.grid.world_size();
    session.camera.follow(session.player.center(), world);
    session.active_bounds = session.camera.active_bounds();

    let before_cull = session.bullets.len();
    let grid = &session.grid;
    session
        .bullets
        .retain(|bullet| !bullet.left_world(grid) && !bullet.hits_grid(grid));
    report.bullets_removed = before_cull - session.bullets.len();

    if !safe && session.bullets.iter().any(|b| session.player.hit_by(b)) {
        log::info!(
            "Player hit at {:?} after {} ticks",
            session.player.pos(),
            session.time_ticks
        );
        session.phase = Phase::Died;
        report.result = TickResult::PlayerDied;
    }

    report
}
