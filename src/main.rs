use std::fs::OpenOptions;
use std::io::{stdout, BufWriter, Write};
use std::path::Path;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Instant;

use anyhow::Context;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyboardEnhancementFlags,
        MouseButton, MouseEvent, MouseEventKind, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand, QueueableCommand,
};
use rand::thread_rng;

use galaxy_retro::display::{self, Canvas, Hud};
use galaxy_retro::environment::{EnvironmentProvider, Layout};
use galaxy_retro::input::{self, InputEvent, TouchState};
use galaxy_retro::persistence::FileHighScoreStore;
use galaxy_retro::{Game, Settings};

type TerminalGame = Game<rand::rngs::ThreadRng, FileHighScoreStore, Hud>;

// ── Logging ───────────────────────────────────────────────────────────────────

/// Log to a file in the data directory; stdout belongs to the game screen.
/// Logging stays off if the file cannot be opened.
fn init_logging(dir: &Path) {
    if std::fs::create_dir_all(dir).is_err() {
        return;
    }
    let Ok(file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("galaxy_retro.log"))
    else {
        return;
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init();
}

// ── Event handling ────────────────────────────────────────────────────────────

enum Flow {
    Continue,
    Redraw,
    Quit,
}

struct Screen {
    layout: Layout,
    canvas: Canvas,
    touch: TouchState,
}

impl Screen {
    fn new(layout: Layout) -> Self {
        let canvas = Canvas::for_field(&layout.field());
        Self {
            layout,
            canvas,
            touch: TouchState::default(),
        }
    }

    fn draw<W: Write>(&mut self, out: &mut W, game: &TerminalGame) -> std::io::Result<()> {
        game.render(&mut self.canvas);
        display::present(out, &self.canvas, game.text(), &self.layout)
    }
}

fn touch_event(screen: &mut Screen, mouse: &MouseEvent) -> Option<InputEvent> {
    let panel = screen.layout.controls.as_ref()?;
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => panel
            .hit_test(mouse.column, mouse.row)
            .map(|control| screen.touch.press(control)),
        MouseEventKind::Up(MouseButton::Left) => screen.touch.release(),
        _ => None,
    }
}

fn handle_event<W: Write>(
    out: &mut W,
    event: Event,
    game: &mut TerminalGame,
    screen: &mut Screen,
) -> std::io::Result<Flow> {
    let command = match event {
        Event::Key(key) if input::is_quit(&key) => return Ok(Flow::Quit),
        Event::Key(key) => input::map_key(&key),
        Event::Mouse(mouse) => touch_event(screen, &mouse),
        Event::Resize(cols, rows) => {
            *screen = Screen::new(Layout::new(cols, rows, screen.layout.device));
            game.reset(screen.layout.field());
            out.queue(terminal::Clear(terminal::ClearType::All))?;
            return Ok(Flow::Redraw);
        }
        _ => None,
    };
    match command {
        Some(command) => {
            game.handle_input(command, Instant::now());
            Ok(Flow::Redraw)
        }
        None => Ok(Flow::Continue),
    }
}

// ── Main loop ─────────────────────────────────────────────────────────────────

/// Waits for input until the next tick is due (or indefinitely while idle),
/// applies it, runs whatever ticks have come due and redraws.
fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    settings: &Settings,
) -> anyhow::Result<()> {
    let layout = Layout::from_terminal(settings.device).context("reading terminal size")?;
    let store = FileHighScoreStore::new(settings.high_score_path());
    let mut screen = Screen::new(layout);
    let mut game = Game::new(screen.layout.field(), thread_rng(), store, Hud::default());

    out.queue(terminal::Clear(terminal::ClearType::All))?;
    screen.draw(out, &game)?;

    loop {
        let received = match game.time_until_next_tick(Instant::now()) {
            Some(wait) => match rx.recv_timeout(wait) {
                Ok(ev) => Some(ev),
                Err(RecvTimeoutError::Timeout) => None,
                Err(RecvTimeoutError::Disconnected) => break,
            },
            None => match rx.recv() {
                Ok(ev) => Some(ev),
                Err(_) => break,
            },
        };

        let mut redraw = false;
        let pending = received.into_iter().chain(std::iter::from_fn(|| rx.try_recv().ok()));
        for ev in pending {
            match handle_event(out, ev, &mut game, &mut screen)? {
                Flow::Quit => return Ok(()),
                Flow::Redraw => redraw = true,
                Flow::Continue => {}
            }
        }

        if game.advance(Instant::now()) > 0 {
            redraw = true;
        }
        if redraw {
            screen.draw(out, &game)?;
        }
    }
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    init_logging(&Settings::data_dir());
    let settings = Settings::load();
    log::info!("Galaxy Retro starting ({:?})", settings.device);

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode().context("enabling raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    if settings.device.is_mobile() {
        out.execute(EnableMouseCapture)?;
    }

    // Request key-release events; terminals without the kitty protocol
    // fall back to press-only.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicated thread for blocking reads; every event is forwarded to the
    // main loop, which owns all game state.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    let result = run(&mut out, &rx, &settings);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    if settings.device.is_mobile() {
        let _ = out.execute(DisableMouseCapture);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        log::error!("Exiting with error: {:#}", e);
    }
    result
}
