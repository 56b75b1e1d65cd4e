//! Screen layout and play-field sizing.
//!
//! The terminal viewport is measured in character cells; the play-field is
//! measured in virtual pixels, [`CELL_WIDTH_PX`] × [`CELL_HEIGHT_PX`] per
//! cell, so entity sizes and speeds behave the same as on a pixel display.
//!
//! ```text
//!  row 0            title
//!  row 1            scoreboard
//!  rows 2..         play-field
//!  (mobile only)    control panel, 3 rows
//!  last row         footer hint
//! ```

use crate::entities::{DeviceClass, Field};
use crate::input::TouchControl;

pub const CELL_WIDTH_PX: u16 = 8;
pub const CELL_HEIGHT_PX: u16 = 16;

pub const HEADER_ROWS: u16 = 1;
pub const SCOREBOARD_ROWS: u16 = 1;
pub const FOOTER_ROWS: u16 = 1;
pub const CONTROL_PANEL_ROWS: u16 = 3;

/// Supplies the play-field the simulation runs in.
pub trait EnvironmentProvider {
    fn field(&self) -> Field;
}

// ── Control panel ─────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Button {
    pub control: TouchControl,
    pub col: u16,
    pub row: u16,
    pub width: u16,
}

impl Button {
    fn new(control: TouchControl, col: u16, row: u16) -> Self {
        Self {
            control,
            col,
            row,
            width: control.label().chars().count() as u16,
        }
    }

    fn contains(&self, col: u16, row: u16) -> bool {
        row == self.row && col >= self.col && col < self.col + self.width
    }
}

/// On-screen buttons for touch devices: a d-pad on the left, fire on the
/// right.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ControlPanel {
    pub buttons: Vec<Button>,
}

impl ControlPanel {
    pub fn new(top: u16, cols: u16) -> Self {
        let pad = 2;
        let step = 6;
        let fire_col = cols.saturating_sub(TouchControl::Fire.label().chars().count() as u16 + pad);
        let buttons = TouchControl::ALL
            .iter()
            .map(|&control| match control {
                TouchControl::Up => Button::new(control, pad + step, top),
                TouchControl::Left => Button::new(control, pad, top + 1),
                TouchControl::Right => Button::new(control, pad + step * 2, top + 1),
                TouchControl::Down => Button::new(control, pad + step, top + 2),
                TouchControl::Fire => Button::new(control, fire_col, top + 1),
            })
            .collect();
        Self { buttons }
    }

    /// The button under a pointer at `(col, row)`, if any.
    pub fn hit_test(&self, col: u16, row: u16) -> Option<TouchControl> {
        self.buttons
            .iter()
            .find(|b| b.contains(col, row))
            .map(|b| b.control)
    }
}

// ── Layout ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    pub cols: u16,
    pub rows: u16,
    pub device: DeviceClass,
    /// First terminal row of the play-field.
    pub field_top: u16,
    /// Play-field height in terminal rows.
    pub field_rows: u16,
    pub controls: Option<ControlPanel>,
}

impl Layout {
    pub fn new(cols: u16, rows: u16, device: DeviceClass) -> Self {
        let mut chrome = HEADER_ROWS + SCOREBOARD_ROWS + FOOTER_ROWS;
        if device.is_mobile() {
            chrome += CONTROL_PANEL_ROWS;
        }
        let field_top = HEADER_ROWS + SCOREBOARD_ROWS;
        let field_rows = rows.saturating_sub(chrome).max(1);
        let controls = device
            .is_mobile()
            .then(|| ControlPanel::new(field_top + field_rows, cols));
        Self {
            cols,
            rows,
            device,
            field_top,
            field_rows,
            controls,
        }
    }

    /// Measure the current terminal.
    pub fn from_terminal(device: DeviceClass) -> std::io::Result<Self> {
        let (cols, rows) = crossterm::terminal::size()?;
        Ok(Self::new(cols, rows, device))
    }

    pub fn title_row(&self) -> u16 {
        0
    }

    pub fn scoreboard_row(&self) -> u16 {
        HEADER_ROWS
    }

    pub fn footer_row(&self) -> u16 {
        self.rows.saturating_sub(FOOTER_ROWS)
    }

    /// Play-field size in virtual pixels.
    pub fn field_px(&self) -> (usize, usize) {
        (
            usize::from(self.cols) * usize::from(CELL_WIDTH_PX),
            usize::from(self.field_rows) * usize::from(CELL_HEIGHT_PX),
        )
    }
}

impl EnvironmentProvider for Layout {
    fn field(&self) -> Field {
        let (width, height) = self.field_px();
        Field::new(width as f32, height as f32, self.device)
    }
}
