use std::time::{Duration, Instant};

use galaxy_retro::compute::MAX_ENEMIES;
use galaxy_retro::display::Hud;
use galaxy_retro::entities::*;
use galaxy_retro::input::{Direction, InputEvent};
use galaxy_retro::persistence::{HighScoreStore, MemoryHighScoreStore};
use galaxy_retro::Game;

use rand::rngs::mock::StepRng;
use rand::rngs::StdRng;
use rand::SeedableRng;

type TestGame<'a> = Game<StdRng, &'a mut MemoryHighScoreStore, Hud>;

fn desktop() -> Field {
    Field::new(400.0, 600.0, DeviceClass::Desktop)
}

fn new_game() -> Game<StdRng, MemoryHighScoreStore, Hud> {
    Game::new(
        desktop(),
        StdRng::seed_from_u64(7),
        MemoryHighScoreStore::default(),
        Hud::default(),
    )
}

fn enemy(x: f32, y: f32, w: f32, h: f32) -> Enemy {
    Enemy { x, y, width: w, height: h, kind: EnemyKind::Alien }
}

/// A running state with nothing in it but the player.
fn running_state(game: &Game<impl rand::Rng, impl HighScoreStore, Hud>) -> GameState {
    GameState {
        enemies: Vec::new(),
        bullets: Vec::new(),
        stars: Vec::new(),
        status: GameStatus::Running,
        ..game.state().clone()
    }
}

// ── Fresh session ─────────────────────────────────────────────────────────────

#[test]
fn fresh_session_is_idle_and_centred() {
    let game = new_game();
    let s = game.state();
    assert_eq!(s.status, GameStatus::Idle);
    assert!(!game.is_running());
    assert_eq!(s.score, 0);
    assert_eq!(s.player.x, 190.0);
    assert_eq!(s.player.y, 600.0 - 1.5 * 20.0);
    assert_eq!(game.text().message(), Some("Press Space to start"));
    assert_eq!(game.text().score(), 0);
    assert_eq!(game.text().high_score(), 0);
}

#[test]
fn mobile_idle_message() {
    let game = Game::new(
        Field::new(400.0, 600.0, DeviceClass::Mobile),
        StdRng::seed_from_u64(1),
        MemoryHighScoreStore::default(),
        Hud::default(),
    );
    assert_eq!(game.text().message(), Some("Tap arrows to start"));
}

#[test]
fn stored_high_score_is_loaded() {
    let game = Game::new(
        desktop(),
        StdRng::seed_from_u64(1),
        MemoryHighScoreStore::with_score(42),
        Hud::default(),
    );
    assert_eq!(game.state().high_score, 42);
    assert_eq!(game.text().high_score(), 42);
}

// ── Start / stop ──────────────────────────────────────────────────────────────

#[test]
fn fire_while_idle_starts() {
    let mut game = new_game();
    game.handle_input(InputEvent::Fire, Instant::now());
    assert!(game.is_running());
    assert_eq!(game.text().message(), None);
    assert!(game.state().bullets.is_empty(), "the start press does not shoot");
}

#[test]
fn fire_while_running_shoots() {
    let mut game = new_game();
    let now = Instant::now();
    game.handle_input(InputEvent::Fire, now);
    game.handle_input(InputEvent::Fire, now);
    game.handle_input(InputEvent::Fire, now);
    assert_eq!(game.state().bullets.len(), 2);
}

#[test]
fn start_is_idempotent() {
    let mut game = new_game();
    let now = Instant::now();
    assert!(game.start(now));
    game.handle_input(InputEvent::Fire, now);
    let before = game.state().clone();
    assert!(!game.start(now));
    assert_eq!(game.state(), &before, "starting a running session changes nothing");
}

#[test]
fn direction_while_idle_starts_with_velocity() {
    let mut game = new_game();
    game.handle_input(InputEvent::DirectionStart(Direction::Left), Instant::now());
    assert!(game.is_running());
    assert_eq!(game.state().velocity, Velocity::new(-1, 0));
}

#[test]
fn direction_end_stops_ship() {
    let mut game = new_game();
    let now = Instant::now();
    game.handle_input(InputEvent::DirectionStart(Direction::Up), now);
    game.handle_input(InputEvent::DirectionEnd, now);
    assert_eq!(game.state().velocity, Velocity::ZERO);
    assert!(game.is_running());
}

#[test]
fn direction_end_while_idle_does_not_start() {
    let mut game = new_game();
    game.handle_input(InputEvent::DirectionEnd, Instant::now());
    assert!(!game.is_running());
}

#[test]
fn stop_is_idempotent() {
    let mut game = new_game();
    game.start(Instant::now());
    game.step();

    game.stop();
    let once = game.state().clone();
    let message = game.text().clone();
    game.stop();
    assert_eq!(game.state(), &once);
    assert_eq!(game.text(), &message);
    assert!(!game.is_running());
    assert_eq!(game.time_until_next_tick(Instant::now()), None);
}

#[test]
fn restart_resets_session() {
    let mut game = new_game();
    let now = Instant::now();
    game.start(now);
    let mut state = running_state(&game);
    state.score = 5;
    state.high_score = 5;
    state.bullets.push(Bullet { x: 1.0, y: 1.0, width: 4.0, height: 10.0 });
    game.load_state(state, now);
    game.stop();

    game.handle_input(InputEvent::Fire, now);
    assert!(game.is_running());
    assert_eq!(game.state().score, 0);
    assert!(game.state().bullets.is_empty());
    assert_eq!(game.state().high_score, 5);
}

// ── Ticking ───────────────────────────────────────────────────────────────────

#[test]
fn step_while_idle_does_nothing() {
    let mut game = new_game();
    let before = game.state().clone();
    game.step();
    assert_eq!(game.state(), &before);
}

#[test]
fn bullet_hit_scores_and_persists() {
    let mut store = MemoryHighScoreStore::default();
    {
        let mut game: TestGame = Game::new(desktop(), StdRng::seed_from_u64(3), &mut store, Hud::default());
        let now = Instant::now();
        game.start(now);
        let mut state = running_state(&game);
        state.enemies = vec![enemy(100.0, 100.0, 20.0, 20.0)];
        state.bullets = vec![Bullet { x: 105.0, y: 105.0, width: 4.0, height: 10.0 }];
        game.load_state(state, now);

        game.step();
        assert_eq!(game.state().score, 1);
        assert!(game.state().enemies.iter().all(|e| e.y < 0.0), "only fresh spawns remain");
        assert_eq!(game.text().score(), 1);
        assert_eq!(game.text().high_score(), 1);
    }
    assert_eq!(store.get_high_score(), Some(1));
    assert_eq!(store.writes(), 1);
}

#[test]
fn high_score_is_not_rewritten_when_unchanged() {
    let mut game = new_game();
    game.start(Instant::now());
    for _ in 0..30 {
        game.step();
    }
    assert_eq!(game.store().writes(), 0);
}

#[test]
fn player_contact_is_game_over() {
    let mut game = new_game();
    let now = Instant::now();
    game.start(now);
    let mut state = running_state(&game);
    state.player = Player { x: 50.0, y: 50.0, width: 20.0, height: 30.0 };
    state.enemies = vec![enemy(60.0, 60.0, 20.0, 20.0)];
    game.load_state(state, now);
    assert!(game.is_running());

    game.step();
    assert!(!game.is_running());
    assert_eq!(game.state().status, GameStatus::Idle);
    assert_eq!(game.text().message(), Some("Game Over! Press Space to restart"));
    assert_eq!(game.time_until_next_tick(now), None);

    // Frozen: further steps change nothing.
    let frozen = game.state().clone();
    game.step();
    assert_eq!(game.state(), &frozen);
}

#[test]
fn enemy_cap_holds_over_long_run() {
    // StepRng(0, 0) makes every spawn roll succeed.
    let mut game = Game::new(
        desktop(),
        StepRng::new(0, 0),
        MemoryHighScoreStore::default(),
        Hud::default(),
    );
    game.start(Instant::now());
    for _ in 0..200 {
        game.step();
        assert!(game.state().enemies.len() <= MAX_ENEMIES);
    }
}

#[test]
fn advance_follows_the_clock() {
    let mut game = new_game();
    let t0 = Instant::now();
    assert_eq!(game.advance(t0 + Duration::from_secs(1)), 0, "idle never ticks");

    game.start(t0);
    let interval = game.time_until_next_tick(t0).expect("running");
    assert_eq!(game.advance(t0), 0);
    assert_eq!(game.advance(t0 + interval), 1);
    assert_eq!(game.state().frame, 1);
    assert_eq!(game.advance(t0 + interval * 3), 2);
    assert_eq!(game.state().frame, 3);
}

#[test]
fn reset_returns_to_idle() {
    let mut game = new_game();
    game.start(Instant::now());
    game.reset(Field::new(800.0, 320.0, DeviceClass::Desktop));
    assert!(!game.is_running());
    assert_eq!(game.state().field.width, 800.0);
    assert_eq!(game.text().message(), Some("Press Space to start"));
}

#[test]
fn high_score_survives_across_sessions() {
    let mut store = MemoryHighScoreStore::with_score(3);
    {
        let mut game: TestGame = Game::new(desktop(), StdRng::seed_from_u64(9), &mut store, Hud::default());
        let now = Instant::now();
        game.start(now);
        let mut state = running_state(&game);
        state.score = 3;
        state.enemies = vec![enemy(100.0, 100.0, 20.0, 20.0)];
        state.bullets = vec![Bullet { x: 105.0, y: 105.0, width: 4.0, height: 10.0 }];
        game.load_state(state, now);
        game.step();
        assert_eq!(game.state().score, 4);
    }
    assert_eq!(store.get_high_score(), Some(4));

    let game: TestGame = Game::new(desktop(), StdRng::seed_from_u64(9), &mut store, Hud::default());
    assert_eq!(game.state().high_score, 4);
    assert_eq!(game.state().score, 0);
}
