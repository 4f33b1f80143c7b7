//! Continuous-movement core shared by the player and the ghosts:
//! position, direction, per-frame displacement, horizontal wraparound,
//! and the two collision probes the entities use against the maze.

use crate::maze::Maze;

/// Entity radius as a fraction of the cell size.
pub const RADIUS_FACTOR: f32 = 0.4;

/// Inset applied to the corners of the bounding-box probe.
const BOX_MARGIN_PX: f32 = 2.0;

#[derive(Clone, Debug)]
pub struct Mover {
    /// Continuous pixel position of the entity center.
    pub x: f32,
    pub y: f32,
    /// Unit direction. Axis-aligned or zero for the player; transiently
    /// fractional for a ghost steering onto a waypoint.
    pub dir_x: f32,
    pub dir_y: f32,
    /// Pixels per second.
    pub speed: f32,
    pub radius: f32,
    pub cell_size: f32,
}

impl Mover {
    /// A mover parked at the center of a grid cell with zero direction.
    pub fn at_cell(maze: &Maze, gx: i32, gy: i32, speed: f32) -> Self {
        let (x, y) = maze.cell_center(gx, gy);
        Mover {
            x,
            y,
            dir_x: 0.0,
            dir_y: 0.0,
            speed,
            radius: maze.cell_size * RADIUS_FACTOR,
            cell_size: maze.cell_size,
        }
    }

    /// Grid cell holding the entity center, by floor division — the only
    /// way a discrete position is ever derived from the continuous one.
    pub fn grid_position(&self) -> (i32, i32) {
        (
            (self.x / self.cell_size).floor() as i32,
            (self.y / self.cell_size).floor() as i32,
        )
    }

    pub fn direction(&self) -> (f32, f32) {
        (self.dir_x, self.dir_y)
    }

    /// Distance covered in `dt_ms` at `speed` pixels per second.
    pub fn displacement(speed: f32, dt_ms: f32) -> f32 {
        speed * dt_ms / 1000.0
    }

    /// Re-park on a cell center and clear the direction.
    pub fn place_at_cell(&mut self, maze: &Maze, gx: i32, gy: i32) {
        let (x, y) = maze.cell_center(gx, gy);
        self.x = x;
        self.y = y;
        self.dir_x = 0.0;
        self.dir_y = 0.0;
    }

    // ── Collision probes ──────────────────────────────────────────────────────

    /// Player variant: only the cell under the single center point.
    pub fn center_walkable(&self, maze: &Maze, x: f32, y: f32) -> bool {
        let gx = (x / self.cell_size).floor() as i32;
        let gy = (y / self.cell_size).floor() as i32;
        maze.is_walkable(gx, gy)
    }

    /// Ghost variant: all four corners of the bounding box, inset by the
    /// 2px margin, must land on walkable cells. Deliberately stricter
    /// than the player's single-point test.
    pub fn box_walkable(&self, maze: &Maze, x: f32, y: f32) -> bool {
        let margin = self.radius - BOX_MARGIN_PX;
        let corners = [
            (x - margin, y - margin),
            (x + margin, y - margin),
            (x - margin, y + margin),
            (x + margin, y + margin),
        ];
        corners.iter().all(|&(px, py)| {
            let gx = (px / self.cell_size).floor() as i32;
            let gy = (py / self.cell_size).floor() as i32;
            maze.is_walkable(gx, gy)
        })
    }

    // ── Wraparound ────────────────────────────────────────────────────────────

    /// Horizontal wrap once the entity is fully past an edge (more than
    /// its radius out). The shift is the whole wrap span — grid width
    /// plus a radius on each side — so the overshoot is preserved and a
    /// left-then-right round trip lands back on the original coordinate.
    pub fn wrap_horizontal(&mut self, maze: &Maze) {
        let span = maze.pixel_width() + 2.0 * self.radius;
        if self.x < -self.radius {
            self.x += span;
        } else if self.x > maze.pixel_width() + self.radius {
            self.x -= span;
        }
    }
}
