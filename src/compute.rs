//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `GameState` (and, where needed, an RNG handle) and returns a brand-new
//! `GameState`.  Side effects are limited to the injected RNG.

use rand::Rng;

use crate::entities::{
    Bounds, Bullet, Enemy, EnemyKind, Field, GameState, GameStatus, Player, Star, Velocity,
};

// ── Tuning ────────────────────────────────────────────────────────────────────

/// Simulation cadence.
pub const TICKS_PER_SECOND: u32 = 60;

/// Pixels per tick, per axis, while a direction is held.
pub const PLAYER_SPEED: f32 = 5.0;
/// Pixels per tick enemies descend.
pub const ENEMY_SPEED: f32 = 2.0;
/// Pixels per tick bullets climb.
pub const BULLET_SPEED: f32 = 10.0;

/// Chance per tick that a new enemy appears.
pub const SPAWN_PROBABILITY: f64 = 0.02;
/// Most enemies alive at once.
pub const MAX_ENEMIES: usize = 5;

fn player_size(field: &Field) -> f32 {
    let grid = field.grid_size();
    if field.device.is_mobile() {
        grid * 2.5
    } else {
        grid
    }
}

fn enemy_size(field: &Field) -> f32 {
    let grid = field.grid_size();
    if field.device.is_mobile() {
        grid * 1.5
    } else {
        grid * 0.8
    }
}

fn bullet_size(field: &Field) -> f32 {
    if field.device.is_mobile() {
        6.0
    } else {
        4.0
    }
}

fn star_count(field: &Field) -> usize {
    if field.device.is_mobile() {
        50
    } else {
        100
    }
}

/// Uniform in `[0, max)`, or 0 when the range is empty.
fn random_offset(rng: &mut impl Rng, max: f32) -> f32 {
    if max > 0.0 {
        rng.gen_range(0.0..max)
    } else {
        0.0
    }
}

// ── Constructors ──────────────────────────────────────────────────────────────

/// Build a fresh idle session for `field`.  The player starts centred
/// horizontally, one and a half ship-widths above the bottom edge.
pub fn init_state(field: Field, high_score: u32, rng: &mut impl Rng) -> GameState {
    let size = player_size(&field);
    GameState {
        player: Player {
            x: field.width / 2.0 - size / 2.0,
            y: field.height - size * 1.5,
            width: size,
            height: size * 1.5,
        },
        enemies: Vec::new(),
        bullets: Vec::new(),
        stars: create_stars(&field, rng),
        velocity: Velocity::ZERO,
        score: 0,
        high_score,
        status: GameStatus::Idle,
        frame: 0,
        field,
    }
}

/// Scatter the star field over the whole play-field.
pub fn create_stars(field: &Field, rng: &mut impl Rng) -> Vec<Star> {
    (0..star_count(field))
        .map(|_| {
            let radius = if field.device.is_mobile() {
                rng.gen::<f32>() + 0.5
            } else {
                rng.gen::<f32>() * 2.0 + 1.0
            };
            Star {
                x: random_offset(rng, field.width),
                y: random_offset(rng, field.height),
                radius,
                speed: rng.gen::<f32>() * 0.5 + 0.1,
            }
        })
        .collect()
}

// ── Input-driven state transitions (pure) ─────────────────────────────────────

pub fn set_velocity(state: &GameState, velocity: Velocity) -> GameState {
    GameState {
        velocity,
        ..state.clone()
    }
}

/// Fire one bullet from the player's top-centre.
pub fn player_shoot(state: &GameState) -> GameState {
    let size = bullet_size(&state.field);
    let p = &state.player;
    let mut bullets = state.bullets.clone();
    bullets.push(Bullet {
        x: p.x + p.width / 2.0 - size / 2.0,
        y: p.y,
        width: size,
        height: size * 2.5,
    });
    GameState {
        bullets,
        ..state.clone()
    }
}

// ── Collision ─────────────────────────────────────────────────────────────────

/// True iff the two bounding boxes intersect with nonzero area.
pub fn overlaps(a: &impl Bounds, b: &impl Bounds) -> bool {
    let a = a.rect();
    let b = b.rect();
    a.x < b.x + b.width && a.x + a.width > b.x && a.y < b.y + b.height && a.y + a.height > b.y
}

// ── Per-tick steps ────────────────────────────────────────────────────────────

/// Move player, stars, enemies and bullets one tick, dropping anything
/// that has left the field.
pub fn move_entities(state: &GameState, rng: &mut impl Rng) -> GameState {
    let field = &state.field;

    let p = &state.player;
    let max_x = (field.width - p.width).max(0.0);
    let max_y = (field.height - p.height).max(0.0);
    let player = Player {
        x: (p.x + f32::from(state.velocity.dx) * PLAYER_SPEED).clamp(0.0, max_x),
        y: (p.y + f32::from(state.velocity.dy) * PLAYER_SPEED).clamp(0.0, max_y),
        ..p.clone()
    };

    let stars = state
        .stars
        .iter()
        .map(|s| {
            let y = s.y + s.speed;
            if y > field.height {
                Star {
                    x: random_offset(rng, field.width),
                    y: 0.0,
                    ..s.clone()
                }
            } else {
                Star { y, ..s.clone() }
            }
        })
        .collect();

    let enemies = state
        .enemies
        .iter()
        .map(|e| Enemy {
            y: e.y + ENEMY_SPEED,
            ..e.clone()
        })
        .filter(|e| e.y < field.height)
        .collect();

    let bullets = state
        .bullets
        .iter()
        .map(|b| Bullet {
            y: b.y - BULLET_SPEED,
            ..b.clone()
        })
        .filter(|b| b.y + b.height > 0.0)
        .collect();

    GameState {
        player,
        stars,
        enemies,
        bullets,
        ..state.clone()
    }
}

/// Resolve bullet hits, then player contact.
///
/// A bullet is spent on its first hit: enemies are scanned in collection
/// order and the first one it overlaps is destroyed together with it.
/// Any enemy touching the player ends the session (`status` becomes Idle).
pub fn resolve_collisions(state: &GameState) -> GameState {
    let mut enemies = state.enemies.clone();
    let mut bullets = Vec::with_capacity(state.bullets.len());
    let mut score = state.score;

    for bullet in &state.bullets {
        match enemies.iter().position(|e| overlaps(bullet, e)) {
            Some(hit) => {
                enemies.remove(hit);
                score += 1;
            }
            None => bullets.push(bullet.clone()),
        }
    }

    let status = if enemies.iter().any(|e| overlaps(&state.player, e)) {
        GameStatus::Idle
    } else {
        state.status
    };

    GameState {
        enemies,
        bullets,
        score,
        high_score: state.high_score.max(score),
        status,
        ..state.clone()
    }
}

/// Maybe add one enemy just above the top edge.
pub fn spawn_enemies(state: &GameState, rng: &mut impl Rng) -> GameState {
    if state.enemies.len() >= MAX_ENEMIES || rng.gen::<f64>() >= SPAWN_PROBABILITY {
        return state.clone();
    }
    let size = enemy_size(&state.field);
    let kind = EnemyKind::ALL[rng.gen_range(0..EnemyKind::ALL.len())];
    let mut enemies = state.enemies.clone();
    enemies.push(Enemy {
        x: random_offset(rng, state.field.width - size),
        y: -size,
        width: size,
        height: size,
        kind,
    });
    GameState {
        enemies,
        ..state.clone()
    }
}

// ── Per-tick driver (nearly pure; RNG is injected) ────────────────────────────

/// Advance a running session by one tick: motion, collisions, spawning.
/// An idle state is returned unchanged.  A tick that ends the session
/// skips spawning so the final frame shows the moment of contact.
pub fn tick(state: &GameState, rng: &mut impl Rng) -> GameState {
    if state.status != GameStatus::Running {
        return state.clone();
    }

    let moved = move_entities(state, rng);
    let resolved = resolve_collisions(&moved);
    let next = if resolved.status == GameStatus::Running {
        spawn_enemies(&resolved, rng)
    } else {
        resolved
    };

    GameState {
        frame: state.frame + 1,
        ..next
    }
}
