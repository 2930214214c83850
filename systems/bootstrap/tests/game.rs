use std::{collections::VecDeque, time::Duration};

use anyhow::{anyhow, Result as AnyResult};
use sword_arena_core::{CellCoord, Direction, Event, GameConfig};
use sword_arena_rendering::{DisplaySink, Frame, InputSource, BACKGROUND_GLYPH, ENEMY_GLYPH};
use sword_arena_system_bootstrap::Game;
use sword_arena_system_spawning::Config;
use sword_arena_world::query;

const TICK: Duration = Duration::from_millis(100);

fn game_with(config: GameConfig) -> Game {
    Game::new(config, Config::new(0x51a7))
}

fn step(game: &mut Game, key: Option<char>, dt: Duration) -> Frame {
    game.frame(key, dt).expect("invariants hold during play")
}

#[test]
fn swing_is_visible_until_its_display_window_closes() {
    let mut game = game_with(GameConfig::default());

    let frame = step(&mut game, Some('l'), TICK);
    assert_eq!(frame.glyph(CellCoord::new(6, 5)), Some('-'));
    assert_eq!(frame.glyph(CellCoord::new(8, 5)), Some('>'));

    let frame = step(&mut game, None, Duration::from_millis(499));
    assert!(query::swing(game.world()).is_some());
    assert_eq!(frame.glyph(CellCoord::new(8, 5)), Some('>'));

    let frame = step(&mut game, None, Duration::from_millis(1));
    assert!(query::swing(game.world()).is_none());
    assert_eq!(frame.glyph(CellCoord::new(8, 5)), Some(BACKGROUND_GLYPH));
}

#[test]
fn moving_hides_the_swing_immediately() {
    let mut game = game_with(GameConfig::default());

    let _ = step(&mut game, Some('k'), TICK);
    assert!(query::swing(game.world()).is_some());

    let frame = step(&mut game, Some('d'), TICK);
    assert!(query::swing(game.world()).is_none());
    assert_eq!(query::player_cell(game.world()), CellCoord::new(6, 5));
    assert_eq!(frame.glyph(CellCoord::new(5, 6)), Some(BACKGROUND_GLYPH));
}

#[test]
fn a_new_attack_replaces_the_visible_swing() {
    let mut game = game_with(GameConfig::default());

    let _ = step(&mut game, Some('l'), TICK);
    let frame = step(&mut game, Some('j'), TICK);

    assert_eq!(frame.glyph(CellCoord::new(8, 5)), Some(BACKGROUND_GLYPH));
    assert_eq!(frame.glyph(CellCoord::new(2, 5)), Some('<'));
}

#[test]
fn attacking_a_spawned_enemy_removes_it() {
    let mut game = game_with(GameConfig {
        player_start: CellCoord::new(1, 0),
        spawn_delay: 5,
        ..GameConfig::default()
    });

    for _ in 0..6 {
        let _ = step(&mut game, None, TICK);
    }
    let enemies = query::enemy_view(game.world()).into_vec();
    assert_eq!(enemies.len(), 1);
    assert_eq!(enemies[0].cell, CellCoord::new(0, 0));

    let frame = step(&mut game, Some('j'), TICK);
    assert!(query::enemy_view(game.world()).is_empty());
    assert_eq!(frame.glyph(CellCoord::new(0, 0)), Some('-'));
}

#[test]
fn enemies_only_advance_when_the_player_moves() {
    let mut game = game_with(GameConfig {
        spawn_delay: 5,
        ..GameConfig::default()
    });
    for _ in 0..6 {
        let _ = step(&mut game, None, TICK);
    }

    let _ = step(&mut game, Some('d'), TICK);
    assert_eq!(enemy_cell(&game), CellCoord::new(0, 0), "fresh enemy cools down");

    for _ in 0..3 {
        let _ = step(&mut game, None, TICK);
    }
    assert_eq!(enemy_cell(&game), CellCoord::new(0, 0));

    let frame = step(&mut game, Some('d'), TICK);
    assert_eq!(query::player_cell(game.world()), CellCoord::new(7, 5));
    assert_eq!(enemy_cell(&game), CellCoord::new(1, 1));
    assert_eq!(frame.glyph(CellCoord::new(1, 1)), Some(ENEMY_GLYPH));
}

#[test]
fn enemies_chase_the_cell_the_player_moved_to() {
    let mut game = game_with(GameConfig {
        player_start: CellCoord::new(1, 1),
        enemy_move_delay: 0,
        spawn_delay: 0,
        ..GameConfig::default()
    });
    let _ = step(&mut game, None, TICK);
    assert_eq!(enemy_cell(&game), CellCoord::new(0, 0));

    game.emit(&Event::Move {
        step: Direction::North.step(),
    });

    assert_eq!(query::player_cell(game.world()), CellCoord::new(1, 0));
    assert_eq!(
        enemy_cell(&game),
        CellCoord::new(1, 0),
        "chasing the old cell (1, 1) would have stepped diagonally"
    );
}

#[test]
fn unrecognised_keys_change_nothing() {
    let mut game = game_with(GameConfig::default());
    let before = step(&mut game, None, TICK);
    let after = step(&mut game, Some('x'), TICK);

    assert_eq!(before, after);
    assert_eq!(query::player_cell(game.world()), CellCoord::new(5, 5));
}

#[test]
fn identical_sessions_render_identical_frames() {
    let script = "dddwwlllkaaaasjjjiiddssk";
    let config = GameConfig {
        spawner_relocation_delay: 3,
        spawn_delay: 2,
        ..GameConfig::default()
    };

    let run = |config: GameConfig| -> Vec<Frame> {
        let mut game = game_with(config);
        script
            .chars()
            .cycle()
            .take(120)
            .map(|key| step(&mut game, Some(key), TICK))
            .collect()
    };

    assert_eq!(run(config), run(config));
}

#[test]
fn run_frame_moves_frames_from_input_to_display() {
    let mut game = game_with(GameConfig::default());
    let mut input = ScriptedInput::new("ds");
    let mut display = RecordingDisplay::default();

    for _ in 0..3 {
        game.run_frame(&mut input, &mut display, TICK)
            .expect("scripted frames succeed");
    }

    assert_eq!(display.frames.len(), 3);
    assert_eq!(query::player_cell(game.world()), CellCoord::new(6, 6));
}

#[test]
fn run_frame_surfaces_input_failures() {
    let mut game = game_with(GameConfig::default());
    let mut display = RecordingDisplay::default();

    let error = game
        .run_frame(&mut FailingInput, &mut display, TICK)
        .expect_err("input failure must propagate");

    assert!(error.to_string().contains("keyboard unplugged"));
    assert!(display.frames.is_empty());
}

fn enemy_cell(game: &Game) -> CellCoord {
    query::enemy_view(game.world()).into_vec()[0].cell
}

struct ScriptedInput {
    keys: VecDeque<char>,
}

impl ScriptedInput {
    fn new(script: &str) -> Self {
        Self {
            keys: script.chars().collect(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn poll_key(&mut self) -> AnyResult<Option<char>> {
        Ok(self.keys.pop_front())
    }
}

struct FailingInput;

impl InputSource for FailingInput {
    fn poll_key(&mut self) -> AnyResult<Option<char>> {
        Err(anyhow!("keyboard unplugged"))
    }
}

#[derive(Default)]
struct RecordingDisplay {
    frames: Vec<Frame>,
}

impl DisplaySink for RecordingDisplay {
    fn present(&mut self, frame: &Frame) -> AnyResult<()> {
        self.frames.push(frame.clone());
        Ok(())
    }
}
