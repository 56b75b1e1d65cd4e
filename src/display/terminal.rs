//! Terminal output: all crossterm I/O lives here.
//!
//! The raster is shown two pixel-rows per character cell using the upper
//! half block, foreground for the top half and background for the bottom.
//! Each half-cell covers an 8×8 block of canvas pixels and takes the
//! colour of its brightest pixel, so thin bullets and small stars survive
//! the downsampling.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use super::{Canvas, Rgb, TextSurfaces};
use crate::environment::{Layout, CELL_HEIGHT_PX, CELL_WIDTH_PX};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_TITLE: Color = Color::Cyan;
const C_SCORE: Color = Color::Yellow;
const C_HIGH_SCORE: Color = Color::Magenta;
const C_MESSAGE: Color = Color::White;
const C_MESSAGE_FRAME: Color = Color::Red;
const C_BUTTON: Color = Color::Cyan;
const C_HINT: Color = Color::DarkGrey;

// ── Text surfaces ─────────────────────────────────────────────────────────────

/// Scoreboard and status message as last pushed by the game.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Hud {
    score: u32,
    high_score: u32,
    message: Option<String>,
}

impl Hud {
    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl TextSurfaces for Hud {
    fn set_score(&mut self, score: u32) {
        self.score = score;
    }

    fn set_high_score(&mut self, high_score: u32) {
        self.high_score = high_score;
    }

    fn show_message(&mut self, text: &str) {
        self.message = Some(text.to_string());
    }

    fn hide_message(&mut self) {
        self.message = None;
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Write one complete frame.
pub fn present<W: Write>(
    out: &mut W,
    canvas: &Canvas,
    hud: &Hud,
    layout: &Layout,
) -> std::io::Result<()> {
    draw_title(out, layout)?;
    draw_scoreboard(out, hud, layout)?;
    draw_field(out, canvas, layout)?;
    if let Some(message) = hud.message() {
        draw_message(out, message, layout)?;
    }
    draw_controls(out, layout)?;
    draw_footer(out, layout)?;

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, layout.footer_row()))?;
    out.flush()?;
    Ok(())
}

fn centred(layout: &Layout, text: &str) -> u16 {
    (layout.cols / 2).saturating_sub(text.chars().count() as u16 / 2)
}

// ── Chrome ────────────────────────────────────────────────────────────────────

fn draw_title<W: Write>(out: &mut W, layout: &Layout) -> std::io::Result<()> {
    let title = "★  GALAXY  RETRO  ★";
    out.queue(cursor::MoveTo(0, layout.title_row()))?;
    out.queue(terminal::Clear(terminal::ClearType::CurrentLine))?;
    out.queue(cursor::MoveTo(centred(layout, title), layout.title_row()))?;
    out.queue(style::SetForegroundColor(C_TITLE))?;
    out.queue(Print(title))?;
    Ok(())
}

fn draw_scoreboard<W: Write>(out: &mut W, hud: &Hud, layout: &Layout) -> std::io::Result<()> {
    let row = layout.scoreboard_row();
    out.queue(cursor::MoveTo(0, row))?;
    out.queue(terminal::Clear(terminal::ClearType::CurrentLine))?;

    out.queue(cursor::MoveTo(1, row))?;
    out.queue(style::SetForegroundColor(C_SCORE))?;
    out.queue(Print(format!("Score: {}", hud.score())))?;

    let high = format!("High Score: {}", hud.high_score());
    let col = layout.cols.saturating_sub(high.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(C_HIGH_SCORE))?;
    out.queue(Print(high))?;
    Ok(())
}

fn draw_footer<W: Write>(out: &mut W, layout: &Layout) -> std::io::Result<()> {
    let hint = if layout.device.is_mobile() {
        "Tap arrows to move   FIRE : Shoot   Q : Quit"
    } else {
        "← ↑ → ↓ : Move   SPACE : Start / Shoot   Q : Quit"
    };
    out.queue(cursor::MoveTo(0, layout.footer_row()))?;
    out.queue(terminal::Clear(terminal::ClearType::CurrentLine))?;
    out.queue(cursor::MoveTo(1, layout.footer_row()))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;
    Ok(())
}

fn draw_controls<W: Write>(out: &mut W, layout: &Layout) -> std::io::Result<()> {
    let Some(panel) = &layout.controls else {
        return Ok(());
    };
    for row in layout.field_top + layout.field_rows..layout.footer_row() {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(terminal::Clear(terminal::ClearType::CurrentLine))?;
    }
    out.queue(style::SetForegroundColor(C_BUTTON))?;
    for button in &panel.buttons {
        out.queue(cursor::MoveTo(button.col, button.row))?;
        out.queue(Print(button.control.label()))?;
    }
    Ok(())
}

// ── Play-field ────────────────────────────────────────────────────────────────

/// Brightest pixel of the block starting at `(x0, y0)`.
fn block_colour(canvas: &Canvas, x0: usize, y0: usize, w: usize, h: usize) -> Rgb {
    let mut best = Rgb::default();
    for y in y0..y0 + h {
        for x in x0..x0 + w {
            if let Some(px) = canvas.pixel(x, y) {
                if px.luma() > best.luma() {
                    best = px;
                }
            }
        }
    }
    best
}

fn to_color(Rgb(r, g, b): Rgb) -> Color {
    Color::Rgb { r, g, b }
}

fn draw_field<W: Write>(out: &mut W, canvas: &Canvas, layout: &Layout) -> std::io::Result<()> {
    let cell_w = usize::from(CELL_WIDTH_PX);
    let half_h = usize::from(CELL_HEIGHT_PX) / 2;

    for row in 0..layout.field_rows {
        out.queue(cursor::MoveTo(0, layout.field_top + row))?;
        let y = usize::from(row) * half_h * 2;
        let mut last: Option<(Rgb, Rgb)> = None;
        for col in 0..usize::from(layout.cols) {
            let x = col * cell_w;
            let top = block_colour(canvas, x, y, cell_w, half_h);
            let bottom = block_colour(canvas, x, y + half_h, cell_w, half_h);
            if last != Some((top, bottom)) {
                out.queue(style::SetForegroundColor(to_color(top)))?;
                out.queue(style::SetBackgroundColor(to_color(bottom)))?;
                last = Some((top, bottom));
            }
            out.queue(Print('▀'))?;
        }
        out.queue(style::ResetColor)?;
    }
    Ok(())
}

// ── Status message overlay ────────────────────────────────────────────────────

fn draw_message<W: Write>(out: &mut W, message: &str, layout: &Layout) -> std::io::Result<()> {
    let inner = message.chars().count() + 4;
    let border = "═".repeat(inner);
    let body = format!("║  {}  ║", message);
    let lines: [(String, Color); 3] = [
        (format!("╔{}╗", border), C_MESSAGE_FRAME),
        (body, C_MESSAGE),
        (format!("╚{}╝", border), C_MESSAGE_FRAME),
    ];

    let start_row = (layout.field_top + layout.field_rows / 2).saturating_sub(1);
    out.queue(style::SetBackgroundColor(Color::Black))?;
    for (i, (line, color)) in lines.iter().enumerate() {
        out.queue(cursor::MoveTo(centred(layout, line), start_row + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(line))?;
    }
    out.queue(style::ResetColor)?;
    Ok(())
}
