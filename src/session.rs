//! Game session: level setup, difficulty selection, and the per-tick
//! orchestration loop — update order, pellet and power-pellet
//! consumption, player–ghost collision resolution, win/lose evaluation.
//!
//! The session performs no timing and no I/O. The host drives it with
//! elapsed milliseconds per tick and receives gameplay notifications
//! through an injected [`EventSink`].

use std::collections::HashSet;

use rand::Rng;

use crate::difficulty::{Difficulty, DifficultySettings};
use crate::ghost::{Ghost, Mode};
use crate::maze::{Cell, Maze};
use crate::player::Player;

// ── Board and scoring constants ───────────────────────────────────────────────

/// Default board: 32 × 24 cells of 25px.
pub const GRID_COLS: usize = 32;
pub const GRID_ROWS: usize = 24;
pub const CELL_SIZE: f32 = 25.0;

const PELLET_SCORE: u32 = 10;
const POWER_PELLET_SCORE: u32 = 50;
const GHOST_SCORE: u32 = 200;

/// Per-cell inclusion chances for the pellet scatter. The power roll
/// comes first and excludes the plain-pellet roll for that cell.
const POWER_PELLET_CHANCE: f64 = 0.03;
const PELLET_CHANCE: f64 = 0.75;

/// Ghost contact distance as a fraction of the cell size.
const CATCH_RADIUS_FACTOR: f32 = 0.8;

// ── Events ────────────────────────────────────────────────────────────────────

/// Gameplay notifications for host-side feedback (sound, vibration,
/// overlay flashes). The core never talks to such collaborators
/// directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    PelletEaten,
    PowerPelletEaten,
    GhostEaten,
    PlayerCaught,
    LevelCleared,
    GameOver,
}

/// Injected capability for receiving [`GameEvent`]s.
pub trait EventSink {
    fn notify(&mut self, event: GameEvent);
}

/// Sink that drops everything, for hosts that don't care.
pub struct NullSink;

impl EventSink for NullSink {
    fn notify(&mut self, _event: GameEvent) {}
}

impl EventSink for Vec<GameEvent> {
    fn notify(&mut self, event: GameEvent) {
        self.push(event);
    }
}

// ── Session ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    SelectingDifficulty,
    Menu,
    Playing,
    Paused,
    GameOver,
    Win,
}

#[derive(Clone, Debug)]
pub struct Session {
    pub state: SessionState,
    pub difficulty: Difficulty,
    pub settings: DifficultySettings,
    pub maze: Maze,
    pub player: Player,
    pub ghosts: Vec<Ghost>,
    pub pellets: HashSet<(i32, i32)>,
    pub power_pellets: HashSet<(i32, i32)>,
    pub score: u32,
    pub lives: u32,
    pub level: u32,
    pub power_mode: bool,
    pub power_timer_ms: f32,
}

impl Session {
    /// A dormant session in the difficulty-selection state, with the
    /// `human` bundle staged until the host picks one.
    pub fn new() -> Self {
        let difficulty = Difficulty::Human;
        let settings = difficulty.settings();
        let maze = Maze::new(GRID_COLS, GRID_ROWS, CELL_SIZE, settings.wall_density);
        let (px, py) = maze.player_start_position();
        let player = Player::new(&maze, px, py, settings.player_speed);
        Session {
            state: SessionState::SelectingDifficulty,
            difficulty,
            settings,
            maze,
            player,
            ghosts: Vec::new(),
            pellets: HashSet::new(),
            power_pellets: HashSet::new(),
            score: 0,
            lives: settings.starting_lives,
            level: 1,
            power_mode: false,
            power_timer_ms: 0.0,
        }
    }

    /// Pick the parameter bundle. Only honored before play begins —
    /// the bundle is immutable for the rest of the session once a run
    /// starts.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        match self.state {
            SessionState::SelectingDifficulty | SessionState::Menu => {
                self.difficulty = difficulty;
                self.settings = difficulty.settings();
                self.state = SessionState::Menu;
            }
            _ => {}
        }
    }

    /// Start play. From the menu or game-over this begins a fresh run
    /// (score 0, level 1, full lives); from a win it sets up the next
    /// level keeping score and lives. Ignored while playing or paused
    /// and before a difficulty has been confirmed.
    pub fn start_game(&mut self, rng: &mut impl Rng) {
        match self.state {
            SessionState::Menu | SessionState::GameOver => {
                self.score = 0;
                self.level = 1;
                self.lives = self.settings.starting_lives;
            }
            SessionState::Win => {}
            _ => return,
        }
        self.setup_level(rng);
        self.state = SessionState::Playing;
    }

    pub fn toggle_pause(&mut self) {
        self.state = match self.state {
            SessionState::Playing => SessionState::Paused,
            SessionState::Paused => SessionState::Playing,
            other => other,
        };
    }

    /// Regenerate the maze and respawn everything for the current level.
    fn setup_level(&mut self, rng: &mut impl Rng) {
        self.maze = Maze::new(GRID_COLS, GRID_ROWS, CELL_SIZE, self.settings.wall_density);
        self.maze.generate(rng);

        let (px, py) = self.maze.player_start_position();
        self.player = Player::new(&self.maze, px, py, self.settings.player_speed);

        self.ghosts = self
            .maze
            .ghost_start_positions()
            .into_iter()
            .map(|(gx, gy)| {
                Ghost::new(
                    &self.maze,
                    gx,
                    gy,
                    self.settings.ghost_speed,
                    self.settings.ghost_scared_speed,
                    self.settings.ghost_aggression,
                )
            })
            .collect();

        self.scatter_pellets(rng);
        self.power_mode = false;
        self.power_timer_ms = 0.0;
    }

    /// Independent random inclusion over every walkable non-marker cell.
    fn scatter_pellets(&mut self, rng: &mut impl Rng) {
        self.pellets.clear();
        self.power_pellets.clear();
        for y in 0..self.maze.rows as i32 {
            for x in 0..self.maze.cols as i32 {
                if !self.maze.is_walkable(x, y) {
                    continue;
                }
                match self.maze.grid[y as usize][x as usize] {
                    Cell::PlayerStart | Cell::GhostStart => continue,
                    _ => {}
                }
                if rng.gen_bool(POWER_PELLET_CHANCE) {
                    self.power_pellets.insert((x, y));
                } else if rng.gen_bool(PELLET_CHANCE) {
                    self.pellets.insert((x, y));
                }
            }
        }
    }

    // ── Per-tick update ───────────────────────────────────────────────────────

    /// One tick. The order is load-bearing: power timer, player, ghosts,
    /// collisions, then the win check. Does nothing outside play.
    pub fn update(&mut self, dt_ms: f32, rng: &mut impl Rng, sink: &mut impl EventSink) {
        if self.state != SessionState::Playing {
            return;
        }

        if self.power_mode {
            self.power_timer_ms -= dt_ms;
            if self.power_timer_ms <= 0.0 {
                self.end_power_mode();
            }
        }

        self.player.update(dt_ms, &self.maze);
        for ghost in &mut self.ghosts {
            ghost.update(dt_ms, &self.maze, &self.player, rng);
        }

        self.resolve_collisions(sink);

        if self.state == SessionState::Playing
            && self.pellets.is_empty()
            && self.power_pellets.is_empty()
        {
            self.state = SessionState::Win;
            self.level += 1;
            sink.notify(GameEvent::LevelCleared);
        }
    }

    /// Timer expiry: every ghost still scared reverts to chase. Ghosts
    /// eaten during the window were already reset and stay as they are.
    fn end_power_mode(&mut self) {
        self.power_mode = false;
        self.power_timer_ms = 0.0;
        for ghost in &mut self.ghosts {
            if ghost.mode == Mode::Scared {
                ghost.set_scared(false);
            }
        }
    }

    /// Pellets before power pellets before ghost contacts. Pellet
    /// matches use the player's derived grid cell; ghost contact uses
    /// continuous Euclidean distance. A capture ends contact processing
    /// for the tick.
    fn resolve_collisions(&mut self, sink: &mut impl EventSink) {
        let cell = self.player.grid_position();

        if self.pellets.remove(&cell) {
            self.score += PELLET_SCORE;
            sink.notify(GameEvent::PelletEaten);
        }

        if self.power_pellets.remove(&cell) {
            self.score += POWER_PELLET_SCORE;
            self.power_mode = true;
            self.power_timer_ms = self.settings.power_duration_ms;
            for ghost in &mut self.ghosts {
                ghost.set_scared(true);
            }
            sink.notify(GameEvent::PowerPelletEaten);
        }

        let catch_radius = self.maze.cell_size * CATCH_RADIUS_FACTOR;
        for i in 0..self.ghosts.len() {
            let dx = self.ghosts[i].mover.x - self.player.mover.x;
            let dy = self.ghosts[i].mover.y - self.player.mover.y;
            if dx * dx + dy * dy >= catch_radius * catch_radius {
                continue;
            }
            if self.power_mode && self.ghosts[i].mode == Mode::Scared {
                self.score += GHOST_SCORE;
                self.ghosts[i].reset(&self.maze);
                sink.notify(GameEvent::GhostEaten);
            } else {
                self.player_caught(sink);
                break;
            }
        }
    }

    /// Life lost. With lives remaining, player and ghosts reset in place
    /// and power mode force-clears; at zero lives the session is over.
    fn player_caught(&mut self, sink: &mut impl EventSink) {
        sink.notify(GameEvent::PlayerCaught);
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.state = SessionState::GameOver;
            sink.notify(GameEvent::GameOver);
            return;
        }

        let (px, py) = self.maze.player_start_position();
        self.player.reset(&self.maze, px, py);
        for ghost in &mut self.ghosts {
            ghost.reset(&self.maze);
        }
        self.power_mode = false;
        self.power_timer_ms = 0.0;
    }
}
