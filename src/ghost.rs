//! Ghost AI: the chase/scared/returning mode machine, target selection,
//! depth-bounded breadth-first pathfinding, path following, and the
//! random-walk fallback used when no path is available.

use std::collections::{HashMap, HashSet, VecDeque};

use rand::seq::SliceRandom;
use rand::Rng;

use crate::maze::{Maze, NEIGHBORS};
use crate::mover::Mover;
use crate::player::Player;

// ── Tuning ────────────────────────────────────────────────────────────────────

/// Cooldown between random-walk direction changes.
const DIRECTION_CHANGE_MS: f32 = 200.0;

/// Distance at which a path waypoint counts as reached.
const WAYPOINT_SNAP_PX: f32 = 5.0;

/// BFS abandons any branch whose path grows past this many steps.
const PATH_DEPTH_LIMIT: usize = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Chase,
    Scared,
    Returning,
}

#[derive(Clone, Debug)]
pub struct Ghost {
    pub mover: Mover,
    pub mode: Mode,
    /// Speed while scared; the normal speed lives in `mover.speed`.
    pub scared_speed: f32,
    /// In [0,1]. Scales prediction distance, flee distance, and how
    /// often the path is recomputed.
    pub aggression: f32,
    /// Spawn cell — the returning-mode target and the reset location.
    pub start: (i32, i32),
    /// Current target cell. Flee vectors may push it out of bounds, in
    /// which case pathfinding simply comes back empty.
    pub target: (i32, i32),
    /// Cached path (excludes the current cell, ends at the target) and
    /// the cursor into it.
    pub path: Vec<(i32, i32)>,
    pub path_index: usize,
    pub since_direction_change_ms: f32,
    pub since_path_calc_ms: f32,
}

impl Ghost {
    pub fn new(
        maze: &Maze,
        gx: i32,
        gy: i32,
        speed: f32,
        scared_speed: f32,
        aggression: f32,
    ) -> Self {
        Ghost {
            mover: Mover::at_cell(maze, gx, gy, speed),
            mode: Mode::Chase,
            scared_speed,
            aggression,
            start: (gx, gy),
            target: (gx, gy),
            path: Vec::new(),
            path_index: 0,
            since_direction_change_ms: 0.0,
            since_path_calc_ms: 0.0,
        }
    }

    pub fn grid_position(&self) -> (i32, i32) {
        self.mover.grid_position()
    }

    /// Speed in effect for the current mode.
    pub fn current_speed(&self) -> f32 {
        if self.mode == Mode::Scared {
            self.scared_speed
        } else {
            self.mover.speed
        }
    }

    /// Path recomputation interval. High aggression recomputes more
    /// often; an aggression of zero never recomputes at all (the ghost
    /// degenerates to a pure random walker).
    pub fn recalc_interval_ms(&self) -> f32 {
        (500.0 / self.aggression).floor()
    }

    /// Entering scared reverses the direction on the spot, legal or not —
    /// the next movement step's collision check forces a reselection if
    /// needed. Leaving scared only ever happens from outside (timer
    /// expiry or capture); the ghost never exits on its own.
    pub fn set_scared(&mut self, scared: bool) {
        if scared {
            self.mode = Mode::Scared;
            self.mover.dir_x = -self.mover.dir_x;
            self.mover.dir_y = -self.mover.dir_y;
        } else if self.mode == Mode::Scared {
            self.mode = Mode::Chase;
        }
    }

    /// Back to the spawn cell in chase mode with the path cleared — used
    /// both when this ghost is eaten and when the player is caught.
    pub fn reset(&mut self, maze: &Maze) {
        self.mover.place_at_cell(maze, self.start.0, self.start.1);
        self.mode = Mode::Chase;
        self.path.clear();
        self.path_index = 0;
        self.since_direction_change_ms = 0.0;
        self.since_path_calc_ms = 0.0;
    }

    // ── Per-tick update ───────────────────────────────────────────────────────

    /// Advance by `dt_ms`: refresh the target, recompute the path when
    /// the interval allows, move, wrap.
    pub fn update(&mut self, dt_ms: f32, maze: &Maze, player: &Player, rng: &mut impl Rng) {
        self.since_direction_change_ms += dt_ms;
        self.since_path_calc_ms += dt_ms;

        self.update_target(player);
        if self.since_path_calc_ms >= self.recalc_interval_ms() {
            self.path = find_path(maze, self.grid_position(), self.target);
            self.path_index = 0;
            self.since_path_calc_ms = 0.0;
        }

        self.advance(dt_ms, maze, rng);
        self.mover.wrap_horizontal(maze);
    }

    /// Target selection per mode. Note the scared flee distance shrinks
    /// as aggression grows — intentional tuning: an aggressive ghost
    /// flees in short erratic hops rather than long retreats.
    fn update_target(&mut self, player: &Player) {
        let (px, py) = player.grid_position();
        let (gx, gy) = self.grid_position();
        self.target = match self.mode {
            Mode::Chase => {
                let lead = (4.0 * self.aggression).floor();
                let (dx, dy) = player.direction();
                (
                    (px as f32 + dx * lead) as i32,
                    (py as f32 + dy * lead) as i32,
                )
            }
            Mode::Scared => {
                let flee = (6.0 * (1.0 - self.aggression)).floor() as i32;
                (gx + (gx - px) * flee, gy + (gy - py) * flee)
            }
            Mode::Returning => self.start,
        };
    }

    /// Follow the cached path while it lasts; wander otherwise.
    fn advance(&mut self, dt_ms: f32, maze: &Maze, rng: &mut impl Rng) {
        let dist = Mover::displacement(self.current_speed(), dt_ms);

        if self.path_index < self.path.len() {
            let (wx, wy) = self.path[self.path_index];
            let (cx, cy) = maze.cell_center(wx, wy);
            let dx = cx - self.mover.x;
            let dy = cy - self.mover.y;
            let d = (dx * dx + dy * dy).sqrt();

            if d < WAYPOINT_SNAP_PX {
                // Consume the waypoint: land exactly on its center.
                self.mover.x = cx;
                self.mover.y = cy;
                self.path_index += 1;
            } else {
                self.mover.dir_x = dx / d;
                self.mover.dir_y = dy / d;
                self.mover.x += self.mover.dir_x * dist;
                self.mover.y += self.mover.dir_y * dist;
            }
        } else {
            self.random_walk(dist, maze, rng);
        }
    }

    /// Wander: re-pick a direction when the cooldown expires or the way
    /// ahead is blocked, then take the step if the bounding box stays on
    /// walkable cells. A blocked step also forces a re-pick.
    fn random_walk(&mut self, dist: f32, maze: &Maze, rng: &mut impl Rng) {
        if self.since_direction_change_ms >= DIRECTION_CHANGE_MS
            || !self.can_move_in_direction(maze, self.mover.dir_x, self.mover.dir_y)
        {
            self.choose_new_direction(maze, rng);
            self.since_direction_change_ms = 0.0;
        }

        let nx = self.mover.x + self.mover.dir_x * dist;
        let ny = self.mover.y + self.mover.dir_y * dist;
        if self.mover.box_walkable(maze, nx, ny) {
            self.mover.x = nx;
            self.mover.y = ny;
        } else {
            self.choose_new_direction(maze, rng);
        }
    }

    /// Probe half a cell ahead in the given direction.
    fn can_move_in_direction(&self, maze: &Maze, dx: f32, dy: f32) -> bool {
        let probe = self.mover.cell_size / 2.0;
        self.mover
            .box_walkable(maze, self.mover.x + dx * probe, self.mover.y + dy * probe)
    }

    /// Uniform pick among the legal axis directions, treating reversal
    /// as a last resort: it is only taken when it is the sole option.
    fn choose_new_direction(&mut self, maze: &Maze, rng: &mut impl Rng) {
        let legal: Vec<(f32, f32)> = NEIGHBORS
            .iter()
            .map(|&(dx, dy)| (dx as f32, dy as f32))
            .filter(|&(dx, dy)| self.can_move_in_direction(maze, dx, dy))
            .collect();
        if legal.is_empty() {
            return;
        }
        let forward: Vec<(f32, f32)> = legal
            .iter()
            .copied()
            .filter(|&(dx, dy)| !(dx == -self.mover.dir_x && dy == -self.mover.dir_y))
            .collect();
        let pool = if forward.is_empty() { &legal } else { &forward };
        if let Some(&(dx, dy)) = pool.choose(rng) {
            self.mover.dir_x = dx;
            self.mover.dir_y = dy;
        }
    }
}

// ── Pathfinding ───────────────────────────────────────────────────────────────

/// Breadth-first search over 4-connected walkable cells.
///
/// Returns the cell sequence leading from just after `start` up to and
/// including `goal`, or an empty vector when the goal cannot be reached.
/// A popped node whose path already exceeds [`PATH_DEPTH_LIMIT`] steps is
/// not expanded — that branch is abandoned while the rest of the
/// frontier continues. Neighbors expand in up/right/down/left order, so
/// equal-length paths resolve deterministically.
pub fn find_path(maze: &Maze, start: (i32, i32), goal: (i32, i32)) -> Vec<(i32, i32)> {
    let mut queue: VecDeque<(i32, i32)> = VecDeque::new();
    let mut came_from: HashMap<(i32, i32), (i32, i32)> = HashMap::new();
    let mut depth: HashMap<(i32, i32), usize> = HashMap::new();
    let mut visited: HashSet<(i32, i32)> = HashSet::new();

    queue.push_back(start);
    visited.insert(start);
    depth.insert(start, 0);

    while let Some(cell) = queue.pop_front() {
        if cell == goal {
            return rebuild_path(&came_from, start, goal);
        }
        if depth[&cell] > PATH_DEPTH_LIMIT {
            continue;
        }
        let next_depth = depth[&cell] + 1;

        for (dx, dy) in NEIGHBORS {
            let next = (cell.0 + dx, cell.1 + dy);
            if visited.contains(&next) || !maze.is_walkable(next.0, next.1) {
                continue;
            }
            visited.insert(next);
            came_from.insert(next, cell);
            depth.insert(next, next_depth);
            queue.push_back(next);
        }
    }
    Vec::new()
}

fn rebuild_path(
    came_from: &HashMap<(i32, i32), (i32, i32)>,
    start: (i32, i32),
    goal: (i32, i32),
) -> Vec<(i32, i32)> {
    let mut path = Vec::new();
    let mut cell = goal;
    while cell != start {
        path.push(cell);
        cell = came_from[&cell];
    }
    path.reverse();
    path
}
