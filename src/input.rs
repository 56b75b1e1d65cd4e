//! Input adapter: keyboard and touch events in, game commands out.
//!
//! Both device classes funnel into [`InputEvent`], so the driver never
//! knows which one produced a command.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::entities::Velocity;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit velocity along the single axis this direction steers.
    pub fn velocity(self) -> Velocity {
        match self {
            Direction::Up => Velocity::new(0, -1),
            Direction::Down => Velocity::new(0, 1),
            Direction::Left => Velocity::new(-1, 0),
            Direction::Right => Velocity::new(1, 0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    DirectionStart(Direction),
    /// Steering released: velocity drops to zero.
    DirectionEnd,
    Fire,
}

// ── Keyboard ──────────────────────────────────────────────────────────────────

fn key_direction(code: &KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up => Some(Direction::Up),
        KeyCode::Down => Some(Direction::Down),
        KeyCode::Left => Some(Direction::Left),
        KeyCode::Right => Some(Direction::Right),
        _ => None,
    }
}

/// Map a key event to a game command.  Unrecognised keys yield `None`.
///
/// Release events only arrive from terminals that support keyboard
/// enhancement; elsewhere the ship keeps its heading until another
/// arrow is pressed.
pub fn map_key(event: &KeyEvent) -> Option<InputEvent> {
    match event.kind {
        KeyEventKind::Press | KeyEventKind::Repeat => match event.code {
            KeyCode::Char(' ') => Some(InputEvent::Fire),
            ref code => key_direction(code).map(InputEvent::DirectionStart),
        },
        KeyEventKind::Release => key_direction(&event.code).map(|_| InputEvent::DirectionEnd),
    }
}

/// `q`, `Esc` or Ctrl-C.
pub fn is_quit(event: &KeyEvent) -> bool {
    if event.kind == KeyEventKind::Release {
        return false;
    }
    match event.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => event.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

// ── Touch ─────────────────────────────────────────────────────────────────────

/// One button of the on-screen control panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchControl {
    Up,
    Down,
    Left,
    Right,
    Fire,
}

impl TouchControl {
    pub const ALL: [TouchControl; 5] = [
        TouchControl::Up,
        TouchControl::Down,
        TouchControl::Left,
        TouchControl::Right,
        TouchControl::Fire,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TouchControl::Up => "[ ▲ ]",
            TouchControl::Down => "[ ▼ ]",
            TouchControl::Left => "[ ◀ ]",
            TouchControl::Right => "[ ▶ ]",
            TouchControl::Fire => "[FIRE]",
        }
    }

    fn direction(self) -> Option<Direction> {
        match self {
            TouchControl::Up => Some(Direction::Up),
            TouchControl::Down => Some(Direction::Down),
            TouchControl::Left => Some(Direction::Left),
            TouchControl::Right => Some(Direction::Right),
            TouchControl::Fire => None,
        }
    }
}

pub fn touch_start(control: TouchControl) -> InputEvent {
    match control.direction() {
        Some(direction) => InputEvent::DirectionStart(direction),
        None => InputEvent::Fire,
    }
}

/// Lifting a finger off a direction button stops the ship; lifting it off
/// fire does nothing.
pub fn touch_end(control: TouchControl) -> Option<InputEvent> {
    control.direction().map(|_| InputEvent::DirectionEnd)
}

/// Tracks the button currently held down, since a pointer release can
/// land anywhere on screen.
#[derive(Clone, Debug, Default)]
pub struct TouchState {
    held: Option<TouchControl>,
}

impl TouchState {
    pub fn held(&self) -> Option<TouchControl> {
        self.held
    }

    pub fn press(&mut self, control: TouchControl) -> InputEvent {
        self.held = Some(control);
        touch_start(control)
    }

    pub fn release(&mut self) -> Option<InputEvent> {
        self.held.take().and_then(touch_end)
    }
}
