//! The player entity: a mover plus the buffered next-direction input
//! that hides input latency from the key handler.

use crate::maze::Maze;
use crate::mover::Mover;

#[derive(Clone, Debug)]
pub struct Player {
    pub mover: Mover,
    /// Most recent direction request, consumed at the next update tick.
    pub next_dir_x: f32,
    pub next_dir_y: f32,
}

impl Player {
    pub fn new(maze: &Maze, gx: i32, gy: i32, speed: f32) -> Self {
        Player {
            mover: Mover::at_cell(maze, gx, gy, speed),
            next_dir_x: 0.0,
            next_dir_y: 0.0,
        }
    }

    /// Buffer a direction request; it takes effect at the next update,
    /// not immediately.
    pub fn set_direction(&mut self, dx: f32, dy: f32) {
        self.next_dir_x = dx;
        self.next_dir_y = dy;
    }

    pub fn grid_position(&self) -> (i32, i32) {
        self.mover.grid_position()
    }

    pub fn direction(&self) -> (f32, f32) {
        self.mover.direction()
    }

    /// Consume any buffered direction, then attempt the frame's
    /// displacement. A non-zero buffer replaces the current direction
    /// unconditionally — steering into a wall just means no movement
    /// this tick, never a rejected turn. There is no corridor-alignment
    /// gating.
    pub fn update(&mut self, dt_ms: f32, maze: &Maze) {
        if self.next_dir_x != 0.0 || self.next_dir_y != 0.0 {
            self.mover.dir_x = self.next_dir_x;
            self.mover.dir_y = self.next_dir_y;
            self.next_dir_x = 0.0;
            self.next_dir_y = 0.0;
        }

        let dist = Mover::displacement(self.mover.speed, dt_ms);
        let nx = self.mover.x + self.mover.dir_x * dist;
        let ny = self.mover.y + self.mover.dir_y * dist;
        if self.mover.center_walkable(maze, nx, ny) {
            self.mover.x = nx;
            self.mover.y = ny;
        }
        self.mover.wrap_horizontal(maze);
    }

    /// Back onto a spawn cell with direction and buffer cleared.
    pub fn reset(&mut self, maze: &Maze, gx: i32, gy: i32) {
        self.mover.place_at_cell(maze, gx, gy);
        self.next_dir_x = 0.0;
        self.next_dir_y = 0.0;
    }
}
