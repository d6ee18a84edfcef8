use glam::Vec2;

use death_by_dots::Settings;
use death_by_dots::sim::{
    GameRng, Level, MoveIntent, Phase, Player, Session, SpawningTurret, TickInput, TickResult,
    TileGrid, Turret, Zones, angle_to, tick,
};

fn level(grid: TileGrid, player: Vec2, safe: &[f32], turrets: Vec<Turret>) -> Level {
    Level {
        zones: Zones::for_grid(&grid, safe),
        grid,
        player: Player::new(player),
        turrets,
        moving_turrets: Vec::new(),
        spawning_turrets: Vec::new(),
    }
}

fn input(intent: MoveIntent, dt: f32) -> TickInput {
    TickInput { intent, dt }
}

const TOWARD_TURRET: MoveIntent = MoveIntent {
    left: false,
    right: true,
    up: false,
    down: true,
};

#[test]
fn one_shot_per_second_aimed_at_player() {
    let grid = TileGrid::new(10, 10).unwrap();
    let turret_pos = grid.tile_center(glam::IVec2::new(5, 5));
    let mut session = Session::from_level(
        level(grid, Vec2::ZERO, &[], vec![Turret::new(turret_pos, 1.0)]),
        GameRng::new(1),
        Vec2::new(700.0, 700.0),
    );

    let dt = 0.25;
    let mut shot_ticks = Vec::new();
    for i in 1..=40u64 {
        let aim_point = session.player().center();
        let report = tick(&mut session, &input(TOWARD_TURRET, dt));
        assert!(report.bullets_fired <= 1);
        if report.bullets_fired == 1 {
            shot_ticks.push(i);
            if report.result == TickResult::Continue {
                let bullet = session.bullets().last().unwrap();
                assert_eq!(bullet.pos, turret_pos);
                assert!((bullet.direction - angle_to(turret_pos, aim_point)).abs() < 1e-5);
            }
        }
        if report.result != TickResult::Continue {
            break;
        }
    }

    assert!(shot_ticks.len() >= 3, "shots at {shot_ticks:?}");
    assert_eq!(shot_ticks[0], 4);
    for pair in shot_ticks.windows(2) {
        // 4 ticks of 0.25s
        assert_eq!(pair[1] - pair[0], 4);
    }
}

#[test]
fn walking_into_turret_fire_ends_in_death() {
    let grid = TileGrid::new(10, 10).unwrap();
    let turret_pos = grid.tile_center(glam::IVec2::new(5, 5));
    let mut session = Session::from_level(
        level(grid, Vec2::ZERO, &[], vec![Turret::new(turret_pos, 1.0)]),
        GameRng::new(1),
        Vec2::new(700.0, 700.0),
    );
    let mut result = TickResult::Continue;
    for _ in 0..200 {
        result = session.tick(&input(TOWARD_TURRET, 0.25));
        if result != TickResult::Continue {
            break;
        }
    }
    assert_eq!(result, TickResult::PlayerDied);
    assert_eq!(session.phase(), Phase::Died);

    let shots = session.shots_fired;
    let pos = session.player().pos();
    assert_eq!(session.tick(&input(TOWARD_TURRET, 0.25)), TickResult::PlayerDied);
    assert_eq!(session.shots_fired, shots);
    assert_eq!(session.player().pos(), pos);
}

#[test]
fn reaching_goal_wins_without_further_changes() {
    let grid = TileGrid::new(12, 10).unwrap();
    // Goal strip starts at x = 225; player right edge reaches it after two steps
    let turret = Turret::new(Vec2::new(112.5, 212.5), 4.0);
    let mut session = Session::from_level(
        level(grid, Vec2::new(197.0, 100.0), &[], vec![turret]),
        GameRng::new(1),
        Vec2::new(700.0, 700.0),
    );
    let right = MoveIntent {
        right: true,
        ..Default::default()
    };

    assert_eq!(session.tick(&input(right, 0.01)), TickResult::Continue);
    assert_eq!(session.player().pos().x, 200.0);
    assert_eq!(session.tick(&input(right, 0.01)), TickResult::Continue);
    let shots = session.shots_fired;
    let pos = session.player().pos();

    assert_eq!(session.tick(&input(right, 10.0)), TickResult::PlayerWon);
    // Win is decided before turrets or the player act
    assert_eq!(session.shots_fired, shots);
    assert_eq!(session.player().pos(), pos);
    assert_eq!(session.phase(), Phase::Won);
}

#[test]
fn safe_zone_hides_player_until_they_step_out() {
    let grid = TileGrid::new(20, 10).unwrap();
    let turret = Turret::new(Vec2::new(237.5, 37.5), 1.0);
    let mut session = Session::from_level(
        level(grid, Vec2::new(40.0, 25.0), &[0.0], vec![turret]),
        GameRng::new(1),
        Vec2::new(700.0, 700.0),
    );

    for _ in 0..40 {
        let report = tick(&mut session, &input(MoveIntent::default(), 0.25));
        assert!(report.player_safe);
        assert_eq!(report.bullets_fired, 0);
    }

    // Walk right until the player no longer overlaps the strip (x >= 75)
    let right = MoveIntent {
        right: true,
        ..Default::default()
    };
    let mut fired_while_exposed = false;
    for _ in 0..20 {
        let report = tick(&mut session, &input(right, 0.01));
        if !report.player_safe && report.bullets_fired > 0 {
            fired_while_exposed = true;
            break;
        }
    }
    assert!(fired_while_exposed, "turret was ready and should fire at once");
}

#[test]
fn player_slides_along_wall() {
    let mut grid = TileGrid::new(20, 10).unwrap();
    for y in 0..10 {
        grid.set_solid(6, y, true).unwrap();
    }
    let mut session = Session::from_level(
        level(grid, Vec2::new(125.0, 50.0), &[], Vec::new()),
        GameRng::new(1),
        Vec2::new(700.0, 700.0),
    );
    let diagonal = MoveIntent {
        right: true,
        down: true,
        ..Default::default()
    };
    for _ in 0..5 {
        session.tick(&input(diagonal, 0.01));
    }
    assert_eq!(session.player().pos(), Vec2::new(125.0, 65.0));
}

#[test]
fn spawning_turrets_stop_at_cap() {
    let mut grid = TileGrid::new(40, 10).unwrap();
    for y in 0..10 {
        grid.set_solid(10, y, true).unwrap();
    }
    let spawner = SpawningTurret::new(grid.tile_center(glam::IVec2::new(20, 5)), 1.0, 1.0, 0.0);
    let mut lvl = level(grid, Vec2::ZERO, &[], Vec::new());
    lvl.spawning_turrets.push(spawner);
    let mut session = Session::from_level(lvl, GameRng::new(5), Vec2::new(700.0, 700.0));
    session.max_spawning_turrets = 3;

    for _ in 0..40 {
        assert_eq!(
            session.tick(&input(MoveIntent::default(), 0.25)),
            TickResult::Continue
        );
    }
    assert_eq!(session.spawning_turrets().len(), 3);
}

#[test]
fn generated_sessions_replay_identically() {
    let settings = Settings {
        seed: Some(2024),
        ..Settings::default()
    };
    let mut a = Session::new(&settings).unwrap();
    let mut b = Session::new(&settings).unwrap();

    let script = [
        MoveIntent::default(),
        TOWARD_TURRET,
        MoveIntent {
            right: true,
            ..Default::default()
        },
    ];
    for i in 0..600 {
        let step = input(script[(i / 50) % script.len()], 1.0 / 64.0);
        assert_eq!(a.tick(&step), b.tick(&step));
    }
    assert_eq!(a.player().pos(), b.player().pos());
    assert_eq!(a.bullets(), b.bullets());
    assert_eq!(a.moving_turrets(), b.moving_turrets());
    assert_eq!(a.shots_fired, b.shots_fired);
}

#[test]
fn idle_player_in_start_corridor_is_never_shot() {
    let settings = Settings {
        seed: Some(7),
        ..Settings::default()
    };
    let mut session = Session::new(&settings).unwrap();
    for _ in 0..2000 {
        assert_eq!(
            session.tick(&input(MoveIntent::default(), 1.0 / 64.0)),
            TickResult::Continue
        );
    }
    assert_eq!(session.shots_fired, 0);
}

#[test]
fn bad_settings_are_rejected() {
    let settings = Settings {
        level_width: 0,
        ..Settings::default()
    };
    assert!(Session::new(&settings).is_err());
}
