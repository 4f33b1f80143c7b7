//! Maze grid: procedural generation, connectivity repair, and
//! walkability queries.
//!
//! A maze is regenerated whole for every level and is static afterwards.
//! Coordinates at the query boundary are signed so out-of-bounds probes
//! from entity code get an answer instead of a panic.

use rand::Rng;

// ── Cells ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Wall,
    PlayerStart,
    GhostStart,
}

/// 4-neighbor offsets in the order used by generation, pathfinding and
/// the random walk: up, right, down, left.
pub const NEIGHBORS: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

// ── Maze ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Maze {
    pub cols: usize,
    pub rows: usize,
    /// Pixels per grid unit — used only for coordinate conversion.
    pub cell_size: f32,
    /// Density knob in [0,1] driving room and lane-wall placement.
    pub wall_density: f32,
    /// Row-major: `grid[y][x]`.
    pub grid: Vec<Vec<Cell>>,
}

impl Maze {
    /// An ungenerated maze — every cell EMPTY. Call [`Maze::generate`]
    /// to build the actual level layout.
    pub fn new(cols: usize, rows: usize, cell_size: f32, wall_density: f32) -> Self {
        Maze {
            cols,
            rows,
            cell_size,
            wall_density,
            grid: vec![vec![Cell::Empty; cols]; rows],
        }
    }

    // ── Generation ────────────────────────────────────────────────────────────

    /// Build a fresh layout: border ring, random rooms and lane walls,
    /// the ghost house, a connectivity repair pass, then start markers.
    pub fn generate(&mut self, rng: &mut impl Rng) {
        self.grid = vec![vec![Cell::Empty; self.cols]; self.rows];
        self.place_border();
        self.place_rooms(rng);
        self.place_lane_walls(rng);
        self.carve_ghost_house();
        self.repair_connectivity();
        self.place_start_markers();
    }

    fn place_border(&mut self) {
        for x in 0..self.cols {
            self.grid[0][x] = Cell::Wall;
            self.grid[self.rows - 1][x] = Cell::Wall;
        }
        for row in self.grid.iter_mut() {
            row[0] = Cell::Wall;
            row[self.cols - 1] = Cell::Wall;
        }
    }

    /// Small square wall blocks on a coarse lattice. Higher density means
    /// both a tighter lattice and a higher inclusion chance.
    fn place_rooms(&mut self, rng: &mut impl Rng) {
        let spacing = ((12.0 - self.wall_density * 8.0).floor().max(6.0)) as usize;
        let size = ((3.0 - self.wall_density * 2.0).floor().max(1.0)) as usize;
        let chance = (self.wall_density * 2.0).min(1.0) as f64;

        for y in (3..self.rows.saturating_sub(3)).step_by(spacing) {
            for x in (3..self.cols.saturating_sub(3)).step_by(spacing) {
                if !rng.gen_bool(chance) {
                    continue;
                }
                for dy in 0..size {
                    for dx in 0..size {
                        let (bx, by) = (x + dx, y + dy);
                        if bx < self.cols - 1 && by < self.rows - 1 {
                            self.grid[by][bx] = Cell::Wall;
                        }
                    }
                }
            }
        }
    }

    /// Scattered single-cell walls along sparse horizontal and vertical
    /// lanes, each included with probability `wall_density`.
    fn place_lane_walls(&mut self, rng: &mut impl Rng) {
        let lane_gap = ((16.0 - self.wall_density * 8.0).floor().max(8.0)) as usize;
        let chance = self.wall_density as f64;

        for y in (8..self.rows.saturating_sub(8)).step_by(lane_gap) {
            for x in (5..self.cols.saturating_sub(5)).step_by(3) {
                if rng.gen_bool(chance) {
                    self.grid[y][x] = Cell::Wall;
                }
            }
        }
        for x in (8..self.cols.saturating_sub(8)).step_by(lane_gap) {
            for y in (5..self.rows.saturating_sub(5)).step_by(3) {
                if rng.gen_bool(chance) {
                    self.grid[y][x] = Cell::Wall;
                }
            }
        }
    }

    /// Fixed hollow rectangle centered in the grid with a single opening
    /// at the top. Overwrites anything the random passes put there.
    fn carve_ghost_house(&mut self) {
        let (cx, cy) = self.center();
        for y in cy - 2..=cy + 2 {
            for x in cx - 3..=cx + 3 {
                if !self.in_bounds(x, y) {
                    continue;
                }
                let on_ring = y == cy - 2 || y == cy + 2 || x == cx - 3 || x == cx + 3;
                self.grid[y as usize][x as usize] =
                    if on_ring { Cell::Wall } else { Cell::Empty };
            }
        }
        if self.in_bounds(cx, cy - 2) {
            self.grid[(cy - 2) as usize][cx as usize] = Cell::Empty;
        }
    }

    /// Connectivity repair: one in-place pass turning every interior WALL
    /// with exactly one EMPTY 4-neighbor (a cap trapping a single cell)
    /// into EMPTY. A local heuristic — it removes one-cell traps, it does
    /// not prove the maze connected.
    pub fn repair_connectivity(&mut self) {
        for y in 1..self.rows.saturating_sub(1) {
            for x in 1..self.cols.saturating_sub(1) {
                if self.grid[y][x] != Cell::Wall {
                    continue;
                }
                let empty_neighbors = NEIGHBORS
                    .iter()
                    .filter(|&&(dx, dy)| {
                        let (nx, ny) = (x as i32 + dx, y as i32 + dy);
                        self.in_bounds(nx, ny)
                            && self.grid[ny as usize][nx as usize] == Cell::Empty
                    })
                    .count();
                if empty_neighbors == 1 {
                    self.grid[y][x] = Cell::Empty;
                }
            }
        }
    }

    /// Player start near (10% width, 80% height) with its neighborhood
    /// force-cleared; four ghost starts adjacent to the grid center,
    /// inside the house.
    fn place_start_markers(&mut self) {
        let px = (self.cols as f32 * 0.1).floor() as i32;
        let py = (self.rows as f32 * 0.8).floor() as i32;
        self.clear_area(px, py, 3);
        if self.in_bounds(px, py) {
            self.grid[py as usize][px as usize] = Cell::PlayerStart;
        }

        let (cx, cy) = self.center();
        for (dx, dy) in NEIGHBORS {
            let (gx, gy) = (cx + dx, cy + dy);
            if self.in_bounds(gx, gy) {
                self.grid[gy as usize][gx as usize] = Cell::GhostStart;
            }
        }
    }

    /// Turn walls back into floor in the square radius around (cx, cy).
    /// The border ring is never touched.
    fn clear_area(&mut self, cx: i32, cy: i32, radius: i32) {
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                let (x, y) = (cx + dx, cy + dy);
                if x >= 1
                    && y >= 1
                    && x < self.cols as i32 - 1
                    && y < self.rows as i32 - 1
                    && self.grid[y as usize][x as usize] == Cell::Wall
                {
                    self.grid[y as usize][x as usize] = Cell::Empty;
                }
            }
        }
    }

    fn center(&self) -> (i32, i32) {
        (self.cols as i32 / 2, self.rows as i32 / 2)
    }

    // ── Queries ───────────────────────────────────────────────────────────────

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.cols && (y as usize) < self.rows
    }

    /// Start markers count as walkable; only walls and out-of-bounds
    /// cells do not.
    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.in_bounds(x, y) && self.grid[y as usize][x as usize] != Cell::Wall
    }

    /// Pixel coordinates of a cell's center.
    pub fn cell_center(&self, x: i32, y: i32) -> (f32, f32) {
        (
            x as f32 * self.cell_size + self.cell_size / 2.0,
            y as f32 * self.cell_size + self.cell_size / 2.0,
        )
    }

    pub fn pixel_width(&self) -> f32 {
        self.cols as f32 * self.cell_size
    }

    pub fn pixel_height(&self) -> f32 {
        self.rows as f32 * self.cell_size
    }

    /// Scan for the PLAYER_START marker, falling back to the default
    /// spawn cell if generation never placed one.
    pub fn player_start_position(&self) -> (i32, i32) {
        for (y, row) in self.grid.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                if *cell == Cell::PlayerStart {
                    return (x as i32, y as i32);
                }
            }
        }
        (
            (self.cols as f32 * 0.1).floor() as i32,
            (self.rows as f32 * 0.8).floor() as i32,
        )
    }

    /// Scan for GHOST_START markers, falling back to the four cells
    /// around the grid center if none were placed.
    pub fn ghost_start_positions(&self) -> Vec<(i32, i32)> {
        let mut starts = Vec::new();
        for (y, row) in self.grid.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                if *cell == Cell::GhostStart {
                    starts.push((x as i32, y as i32));
                }
            }
        }
        if starts.is_empty() {
            let (cx, cy) = self.center();
            starts.extend(NEIGHBORS.iter().map(|&(dx, dy)| (cx + dx, cy + dy)));
        }
        starts
    }
}
