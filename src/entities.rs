//! All game entity types: pure data, no logic.

use serde::{Deserialize, Serialize};

// ── Device & play-field ───────────────────────────────────────────────────────

/// Device class of the host.  Scales entity sizes and star density, and
/// decides whether the on-screen touch panel is shown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    #[default]
    Desktop,
    Mobile,
}

impl DeviceClass {
    pub fn is_mobile(&self) -> bool {
        *self == DeviceClass::Mobile
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "desktop" => Some(DeviceClass::Desktop),
            "mobile" | "touch" => Some(DeviceClass::Mobile),
            _ => None,
        }
    }
}

/// The bounded region every entity lives in, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Field {
    pub width: f32,
    pub height: f32,
    pub device: DeviceClass,
}

impl Field {
    pub fn new(width: f32, height: f32, device: DeviceClass) -> Self {
        Self {
            width,
            height,
            device,
        }
    }

    /// Base sizing unit: one twentieth of the shorter field side.
    pub fn grid_size(&self) -> f32 {
        (self.width.min(self.height) / 20.0).floor().max(0.0)
    }
}

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle; `(x, y)` is the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Anything with an axis-aligned bounding box.
pub trait Bounds {
    fn rect(&self) -> Rect;
}

impl Bounds for Rect {
    fn rect(&self) -> Rect {
        *self
    }
}

// ── Player, enemies, bullets ──────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyKind {
    Invader,
    Alien,
    Saucer,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Invader, EnemyKind::Alien, EnemyKind::Saucer];
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub kind: EnemyKind,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

macro_rules! impl_bounds {
    ($($ty:ty),*) => {
        $(impl Bounds for $ty {
            fn rect(&self) -> Rect {
                Rect::new(self.x, self.y, self.width, self.height)
            }
        })*
    };
}

impl_bounds!(Player, Enemy, Bullet);

// ── Background ────────────────────────────────────────────────────────────────

/// Decorative star.  Never collides with anything.
#[derive(Clone, Debug, PartialEq)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    /// Pixels moved downward per tick.
    pub speed: f32,
}

// ── Session state ─────────────────────────────────────────────────────────────

/// Direction the player is steering in; each component is -1, 0 or 1.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Velocity {
    pub dx: i8,
    pub dy: i8,
}

impl Velocity {
    pub const ZERO: Velocity = Velocity { dx: 0, dy: 0 };

    pub fn new(dx: i8, dy: i8) -> Self {
        Self {
            dx: dx.signum(),
            dy: dy.signum(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    /// No tick loop; the initial state and the state after game over.
    Idle,
    Running,
}

/// The entire state of one session.  Cloneable so the pure update
/// functions can return a new copy without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub stars: Vec<Star>,
    pub velocity: Velocity,
    pub score: u32,
    /// Best score seen so far, raised live during play.
    pub high_score: u32,
    pub status: GameStatus,
    pub frame: u64,
    pub field: Field,
}
