//! Render data for the host
//!
//! The simulation draws nothing itself. `draw_list` describes what is visible
//! this frame as colored rectangles; `shapes::quads` turns those into
//! triangles a GPU or software renderer can consume directly.

pub mod shapes;
pub mod vertex;

use serde::Serialize;

pub use vertex::{Vertex, colors};

use crate::sim::{Rect, Session};

/// What a rectangle represents, which decides its color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColorClass {
    Solid,
    SafeZone,
    GoalZone,
    Player,
    Bullet,
    Turret,
    MovingTurret,
    SpawningTurret,
}

impl ColorClass {
    pub fn color(&self) -> [f32; 4] {
        match self {
            ColorClass::Solid => colors::SOLID,
            ColorClass::SafeZone => colors::SAFE_ZONE,
            ColorClass::GoalZone => colors::GOAL_ZONE,
            ColorClass::Player => colors::PLAYER,
            ColorClass::Bullet => colors::BULLET,
            ColorClass::Turret => colors::TURRET,
            ColorClass::MovingTurret => colors::MOVING_TURRET,
            ColorClass::SpawningTurret => colors::SPAWNING_TURRET,
        }
    }
}

/// One rectangle to draw, in world units
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DrawItem {
    pub rect: Rect,
    pub class: ColorClass,
}

impl DrawItem {
    pub fn new(rect: Rect, class: ColorClass) -> Self {
        Self { rect, class }
    }
}

/// Everything visible through the session camera, back to front:
/// solid tiles, zones, player, bullets, then active turrets.
pub fn draw_list(session: &Session) -> Vec<DrawItem> {
    let grid = session.grid();
    let ts = grid.tile_size();
    let mut items = Vec::new();

    let view = session.camera().view();
    for tile in session.visible_tiles(&view).iter() {
        if grid.is_solid(tile.x, tile.y) {
            let corner = tile.as_vec2() * ts;
            items.push(DrawItem::new(
                Rect::new(corner.x, corner.y, ts, ts),
                ColorClass::Solid,
            ));
        }
    }

    let zones = session.zones();
    items.extend(
        zones
            .safe
            .iter()
            .map(|zone| DrawItem::new(*zone, ColorClass::SafeZone)),
    );
    items.push(DrawItem::new(zones.goal, ColorClass::GoalZone));

    items.push(DrawItem::new(session.player().bounds(), ColorClass::Player));

    items.extend(
        session
            .bullets()
            .iter()
            .map(|b| DrawItem::new(b.bounds(), ColorClass::Bullet)),
    );
    items.extend(
        session
            .active_turrets()
            .map(|t| DrawItem::new(t.bounds(), ColorClass::Turret)),
    );
    items.extend(
        session
            .active_moving_turrets()
            .map(|t| DrawItem::new(t.body.bounds(), ColorClass::MovingTurret)),
    );
    items.extend(
        session
            .active_spawning_turrets()
            .map(|t| DrawItem::new(t.body.bounds(), ColorClass::SpawningTurret)),
    );

    items
}
