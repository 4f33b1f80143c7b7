use maze_muncher::maze::{Cell, Maze};
use maze_muncher::mover::Mover;
use maze_muncher::player::Player;

/// Ungenerated board: every in-bounds cell is open floor, which keeps
/// movement assertions free of layout noise.
fn open_maze() -> Maze {
    Maze::new(32, 24, 25.0, 0.0)
}

// ── direction buffering ───────────────────────────────────────────────────────

#[test]
fn buffered_direction_applies_on_update() {
    let maze = open_maze();
    let mut player = Player::new(&maze, 5, 5, 100.0);
    player.set_direction(1.0, 0.0);

    // Buffer is pending, not yet the live direction
    assert_eq!(player.direction(), (0.0, 0.0));

    player.update(16.0, &maze);
    assert_eq!(player.direction(), (1.0, 0.0));
    assert!((player.mover.x - 139.1).abs() < 1e-3); // 137.5 + 100 * 0.016
    assert!((player.mover.y - 137.5).abs() < 1e-3);
    assert_eq!(player.next_dir_x, 0.0);
    assert_eq!(player.next_dir_y, 0.0);
}

#[test]
fn direction_persists_without_new_input() {
    let maze = open_maze();
    let mut player = Player::new(&maze, 5, 5, 100.0);
    player.set_direction(1.0, 0.0);
    player.update(16.0, &maze);
    player.update(16.0, &maze);

    assert_eq!(player.direction(), (1.0, 0.0));
    assert!((player.mover.x - 140.7).abs() < 1e-3);
}

#[test]
fn displacement_is_speed_times_seconds() {
    assert!((Mover::displacement(100.0, 16.0) - 1.6).abs() < 1e-6);
    assert!((Mover::displacement(80.0, 500.0) - 40.0).abs() < 1e-6);
    assert_eq!(Mover::displacement(100.0, 0.0), 0.0);
}

// ── collision ─────────────────────────────────────────────────────────────────

#[test]
fn wall_ahead_blocks_the_step() {
    let mut maze = open_maze();
    maze.grid[5][6] = Cell::Wall;
    let mut player = Player::new(&maze, 5, 5, 100.0);
    player.set_direction(1.0, 0.0);

    // 20px step would land the center inside the wall cell
    player.update(200.0, &maze);
    assert!((player.mover.x - 137.5).abs() < 1e-3);
    assert_eq!(player.direction(), (1.0, 0.0)); // turn taken, movement denied
}

#[test]
fn illegal_turn_halts_instead_of_being_rejected() {
    let mut maze = open_maze();
    maze.grid[4][5] = Cell::Wall; // cell above the player
    let mut player = Player::new(&maze, 5, 5, 100.0);
    player.mover.dir_x = 1.0;

    player.set_direction(0.0, -1.0);
    player.update(200.0, &maze);

    // The buffered turn replaced the old direction unconditionally, so
    // the player points at the wall and simply does not move.
    assert_eq!(player.direction(), (0.0, -1.0));
    assert!((player.mover.x - 137.5).abs() < 1e-3);
    assert!((player.mover.y - 137.5).abs() < 1e-3);
}

// ── grid position ─────────────────────────────────────────────────────────────

#[test]
fn grid_position_floor_divides_the_center() {
    let maze = open_maze();
    let mut player = Player::new(&maze, 0, 0, 100.0);

    player.mover.x = 74.9;
    player.mover.y = 12.5;
    assert_eq!(player.grid_position(), (2, 0));

    player.mover.x = 75.0;
    assert_eq!(player.grid_position(), (3, 0));

    player.mover.x = -0.1; // past the edge rounds down, not toward zero
    assert_eq!(player.grid_position(), (-1, 0));
}

// ── spawn and reset ───────────────────────────────────────────────────────────

#[test]
fn new_player_is_parked_on_the_cell_center() {
    let maze = open_maze();
    let player = Player::new(&maze, 3, 19, 100.0);
    assert!((player.mover.x - 87.5).abs() < 1e-3);
    assert!((player.mover.y - 487.5).abs() < 1e-3);
    assert_eq!(player.mover.radius, 10.0); // 0.4 × cell size
    assert_eq!(player.direction(), (0.0, 0.0));
}

#[test]
fn reset_clears_motion_and_buffer() {
    let maze = open_maze();
    let mut player = Player::new(&maze, 5, 5, 100.0);
    player.set_direction(1.0, 0.0);
    player.update(16.0, &maze);
    player.set_direction(0.0, 1.0);

    player.reset(&maze, 3, 19);
    assert!((player.mover.x - 87.5).abs() < 1e-3);
    assert!((player.mover.y - 487.5).abs() < 1e-3);
    assert_eq!(player.direction(), (0.0, 0.0));
    assert_eq!((player.next_dir_x, player.next_dir_y), (0.0, 0.0));
}

// ── wraparound ────────────────────────────────────────────────────────────────

#[test]
fn wrap_left_reappears_with_the_mirrored_offset() {
    let maze = open_maze(); // 800px wide, entity radius 10
    let mut mover = Mover::at_cell(&maze, 0, 5, 100.0);

    mover.x = -10.5; // half a pixel past the wrap threshold
    mover.wrap_horizontal(&maze);
    assert!((mover.x - 809.5).abs() < 1e-3); // same overshoot, right edge
}

#[test]
fn wrap_round_trip_preserves_the_trajectory() {
    let maze = open_maze();
    let mut mover = Mover::at_cell(&maze, 0, 5, 100.0);

    mover.x = -10.5;
    mover.wrap_horizontal(&maze);
    mover.x += 1.0; // keep drifting right past the right threshold
    mover.wrap_horizontal(&maze);

    // Identical to never having wrapped: -10.5 + 1.0
    assert!((mover.x - (-9.5)).abs() < 1e-3);
}

#[test]
fn wrap_ignores_positions_inside_the_span() {
    let maze = open_maze();
    let mut mover = Mover::at_cell(&maze, 0, 5, 100.0);

    mover.x = -9.9; // not yet fully past the edge
    mover.wrap_horizontal(&maze);
    assert!((mover.x - (-9.9)).abs() < 1e-3);

    mover.x = 400.0;
    mover.wrap_horizontal(&maze);
    assert!((mover.x - 400.0).abs() < 1e-3);
}
