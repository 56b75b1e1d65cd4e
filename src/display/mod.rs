//! Rendering layer.
//!
//! [`render`] paints a `GameState` onto any [`Surface`]; it performs no game
//! logic and never mutates state.  [`canvas`] holds the in-memory raster
//! and [`terminal`] turns that raster, plus the text surfaces, into
//! terminal output.

pub mod canvas;
pub mod terminal;

use crate::entities::{Bounds, EnemyKind, GameState, Rect};

pub use canvas::Canvas;
pub use terminal::{present, Hud};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Perceived brightness, 0..=255.
    pub fn luma(&self) -> u8 {
        let Rgb(r, g, b) = *self;
        ((u32::from(r) * 299 + u32::from(g) * 587 + u32::from(b) * 114) / 1000) as u8
    }
}

// ── Colour palette ────────────────────────────────────────────────────────────

pub const BACKGROUND_COLOR: Rgb = Rgb(0, 0, 0);
pub const STAR_COLOR: Rgb = Rgb(255, 255, 255);
pub const BULLET_COLOR: Rgb = Rgb(0, 255, 255);

// ── Bitmaps ───────────────────────────────────────────────────────────────────

/// Full-colour bitmap.  Each character is one pixel looked up in the
/// sprite palette; `.` is transparent.
#[derive(Clone, Copy, Debug)]
pub struct Image {
    pub rows: &'static [&'static str],
}

impl Image {
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, |r| r.len())
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        match self.rows.get(y)?.as_bytes().get(x)? {
            b'W' => Some(Rgb(235, 235, 245)),
            b'C' => Some(Rgb(0, 200, 255)),
            b'G' => Some(Rgb(120, 130, 150)),
            b'R' => Some(Rgb(255, 90, 30)),
            _ => None,
        }
    }
}

/// Single-colour glyph; `#` is ink, anything else transparent.
#[derive(Clone, Copy, Debug)]
pub struct Glyph {
    pub rows: &'static [&'static str],
    pub color: Rgb,
}

impl Glyph {
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, |r| r.len())
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn is_set(&self, x: usize, y: usize) -> bool {
        self.rows
            .get(y)
            .and_then(|r| r.as_bytes().get(x))
            .is_some_and(|&c| c == b'#')
    }
}

pub const SPACESHIP: Image = Image {
    rows: &[
        "....W....",
        "...WWW...",
        "...WCW...",
        "..WWCWW..",
        "..WWWWW..",
        ".GWWWWWG.",
        "GGWWWWWGG",
        "GG.WWW.GG",
        "G..R.R..G",
        "...R.R...",
    ],
};

const INVADER: Glyph = Glyph {
    rows: &[
        "..#..#..",
        "...##...",
        "..####..",
        ".##..##.",
        "########",
        "#.####.#",
        "#.#..#.#",
        "..#..#..",
    ],
    color: Rgb(190, 80, 255),
};

const ALIEN: Glyph = Glyph {
    rows: &[
        "..####..",
        ".######.",
        "########",
        "#..##..#",
        "########",
        ".######.",
        "..#..#..",
        "...##...",
    ],
    color: Rgb(90, 230, 90),
};

const SAUCER: Glyph = Glyph {
    rows: &[
        "........",
        "...##...",
        "..####..",
        ".######.",
        "########",
        ".#.##.#.",
        "..#..#..",
        ".#....#.",
    ],
    color: Rgb(200, 200, 210),
};

pub fn enemy_glyph(kind: EnemyKind) -> &'static Glyph {
    match kind {
        EnemyKind::Invader => &INVADER,
        EnemyKind::Alien => &ALIEN,
        EnemyKind::Saucer => &SAUCER,
    }
}

// ── Collaborator interfaces ───────────────────────────────────────────────────

/// A drawable raster.  Coordinates are play-field pixels.
pub trait Surface {
    /// Reset `rect` to fully dark.
    fn clear_rect(&mut self, rect: Rect);
    fn fill_rect(&mut self, rect: Rect, color: Rgb);
    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgb);
    /// Draw `glyph` stretched to fill `rect`.
    fn draw_glyph(&mut self, glyph: &Glyph, rect: Rect);
    /// Draw `image` stretched to fill `rect`.
    fn draw_scaled_image(&mut self, image: &Image, rect: Rect);
}

/// The score line and status message shown around the play-field.
pub trait TextSurfaces {
    fn set_score(&mut self, score: u32);
    fn set_high_score(&mut self, high_score: u32);
    fn show_message(&mut self, text: &str);
    fn hide_message(&mut self);
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Paint one complete frame.
pub fn render(surface: &mut impl Surface, state: &GameState) {
    let full = Rect::new(0.0, 0.0, state.field.width, state.field.height);
    surface.clear_rect(full);
    surface.fill_rect(full, BACKGROUND_COLOR);

    for star in &state.stars {
        surface.fill_circle(star.x, star.y, star.radius, STAR_COLOR);
    }

    surface.draw_scaled_image(&SPACESHIP, state.player.rect());

    for enemy in &state.enemies {
        surface.draw_glyph(enemy_glyph(enemy.kind), enemy.rect());
    }
    for bullet in &state.bullets {
        surface.fill_rect(bullet.rect(), BULLET_COLOR);
    }
}
