use maze_muncher::ghost::{find_path, Ghost, Mode};
use maze_muncher::maze::{Cell, Maze};
use maze_muncher::player::Player;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// Ungenerated board: open floor everywhere, no walls at all.
fn open_maze() -> Maze {
    Maze::new(32, 24, 25.0, 0.0)
}

/// Border ring only, interior fully open.
fn bordered_maze() -> Maze {
    let mut maze = Maze::new(32, 24, 25.0, 0.0);
    for x in 0..32 {
        maze.grid[0][x] = Cell::Wall;
        maze.grid[23][x] = Cell::Wall;
    }
    for y in 0..24 {
        maze.grid[y][0] = Cell::Wall;
        maze.grid[y][31] = Cell::Wall;
    }
    maze
}

// ── find_path ─────────────────────────────────────────────────────────────────

#[test]
fn path_length_equals_manhattan_distance_in_the_open() {
    let maze = bordered_maze();
    let path = find_path(&maze, (1, 1), (5, 4));

    assert_eq!(path.len(), 7); // |5-1| + |4-1|, no detours available
    assert_eq!(*path.last().unwrap(), (5, 4));
    assert_ne!(path[0], (1, 1)); // start cell is not part of the path
}

#[test]
fn equal_cost_ties_resolve_deterministically() {
    // Neighbors expand up, right, down, left, so the first discovery
    // of the goal always comes through the same predecessor.
    let maze = bordered_maze();
    let path = find_path(&maze, (1, 1), (3, 3));
    assert_eq!(path, vec![(2, 1), (3, 1), (3, 2), (3, 3)]);
}

#[test]
fn finds_goals_up_to_twenty_one_steps_away() {
    let maze = bordered_maze();
    let path = find_path(&maze, (1, 1), (22, 1));
    assert_eq!(path.len(), 21);
}

#[test]
fn abandons_goals_past_the_search_horizon() {
    let maze = bordered_maze();
    assert!(find_path(&maze, (1, 1), (23, 1)).is_empty());
    assert!(find_path(&maze, (1, 1), (29, 21)).is_empty());
}

#[test]
fn unreachable_goal_yields_an_empty_path() {
    let mut maze = bordered_maze();
    maze.grid[10][9] = Cell::Wall;
    maze.grid[10][11] = Cell::Wall;
    maze.grid[9][10] = Cell::Wall;
    maze.grid[11][10] = Cell::Wall;

    assert!(find_path(&maze, (1, 1), (10, 10)).is_empty());
}

#[test]
fn start_equals_goal_yields_an_empty_path() {
    let maze = bordered_maze();
    assert!(find_path(&maze, (5, 5), (5, 5)).is_empty());
}

// ── target selection ──────────────────────────────────────────────────────────

#[test]
fn chase_predicts_ahead_of_the_player() {
    let maze = open_maze();
    let mut ghost = Ghost::new(&maze, 10, 10, 80.0, 50.0, 0.6);
    let mut player = Player::new(&maze, 12, 10, 100.0);
    player.mover.dir_x = -1.0;

    // A zero-length tick refreshes the target without moving anything
    ghost.update(0.0, &maze, &player, &mut seeded_rng());

    // lead = floor(4 × 0.6) = 2 cells along the player's direction
    assert_eq!(ghost.target, (10, 10));
}

#[test]
fn scared_flees_away_from_the_player() {
    let maze = open_maze();
    let mut ghost = Ghost::new(&maze, 10, 10, 80.0, 50.0, 0.6);
    let player = Player::new(&maze, 12, 10, 100.0);

    ghost.set_scared(true);
    ghost.update(0.0, &maze, &player, &mut seeded_rng());

    // flee = floor(6 × (1 − 0.6)) = 2, applied to the (own − player) vector
    assert_eq!(ghost.mode, Mode::Scared);
    assert_eq!(ghost.target, (6, 10));
}

#[test]
fn returning_targets_the_start_cell() {
    let maze = open_maze();
    let mut ghost = Ghost::new(&maze, 10, 10, 80.0, 50.0, 0.6);
    let player = Player::new(&maze, 12, 10, 100.0);

    let (x, y) = maze.cell_center(5, 5);
    ghost.mover.x = x;
    ghost.mover.y = y;
    ghost.mode = Mode::Returning;
    ghost.update(0.0, &maze, &player, &mut seeded_rng());

    assert_eq!(ghost.target, (10, 10));
}

// ── mode transitions ──────────────────────────────────────────────────────────

#[test]
fn entering_scared_reverses_direction_on_the_spot() {
    let maze = open_maze();
    let mut ghost = Ghost::new(&maze, 10, 10, 80.0, 50.0, 0.6);
    ghost.mover.dir_x = 1.0;
    ghost.mover.dir_y = 0.0;

    ghost.set_scared(true);
    assert_eq!(ghost.mode, Mode::Scared);
    assert_eq!((ghost.mover.dir_x, ghost.mover.dir_y), (-1.0, 0.0));

    // Leaving scared does not reverse again
    ghost.set_scared(false);
    assert_eq!(ghost.mode, Mode::Chase);
    assert_eq!((ghost.mover.dir_x, ghost.mover.dir_y), (-1.0, 0.0));
}

#[test]
fn clearing_scared_leaves_other_modes_alone() {
    let maze = open_maze();
    let mut ghost = Ghost::new(&maze, 10, 10, 80.0, 50.0, 0.6);
    ghost.mode = Mode::Returning;

    ghost.set_scared(false);
    assert_eq!(ghost.mode, Mode::Returning);
}

#[test]
fn scared_mode_swaps_the_speed() {
    let maze = open_maze();
    let mut ghost = Ghost::new(&maze, 10, 10, 80.0, 50.0, 0.6);
    assert_eq!(ghost.current_speed(), 80.0);
    ghost.set_scared(true);
    assert_eq!(ghost.current_speed(), 50.0);
    ghost.set_scared(false);
    assert_eq!(ghost.current_speed(), 80.0);
}

#[test]
fn reset_restores_the_spawn_state() {
    let maze = open_maze();
    let mut ghost = Ghost::new(&maze, 10, 10, 80.0, 50.0, 0.6);
    ghost.mover.x = 500.0;
    ghost.mover.y = 300.0;
    ghost.mover.dir_x = 1.0;
    ghost.mode = Mode::Scared;
    ghost.path = vec![(1, 1)];
    ghost.path_index = 1;

    ghost.reset(&maze);

    let (sx, sy) = maze.cell_center(10, 10);
    assert!((ghost.mover.x - sx).abs() < 1e-3);
    assert!((ghost.mover.y - sy).abs() < 1e-3);
    assert_eq!((ghost.mover.dir_x, ghost.mover.dir_y), (0.0, 0.0));
    assert_eq!(ghost.mode, Mode::Chase);
    assert!(ghost.path.is_empty());
    assert_eq!(ghost.path_index, 0);
}

// ── path recomputation ────────────────────────────────────────────────────────

#[test]
fn recalc_interval_scales_inversely_with_aggression() {
    let maze = open_maze();
    let eager = Ghost::new(&maze, 10, 10, 80.0, 50.0, 1.0);
    let casual = Ghost::new(&maze, 10, 10, 80.0, 50.0, 0.6);
    assert_eq!(eager.recalc_interval_ms(), 500.0);
    assert_eq!(casual.recalc_interval_ms(), 833.0);
}

#[test]
fn path_recomputes_once_the_interval_elapses() {
    let maze = open_maze();
    let mut ghost = Ghost::new(&maze, 10, 10, 80.0, 50.0, 1.0);
    let player = Player::new(&maze, 12, 10, 100.0); // stationary target

    ghost.update(500.0, &maze, &player, &mut seeded_rng());

    assert_eq!(ghost.path, vec![(11, 10), (12, 10)]);
    assert_eq!(ghost.since_path_calc_ms, 0.0);
    // The same tick already starts following the fresh path
    assert_eq!((ghost.mover.dir_x, ghost.mover.dir_y), (1.0, 0.0));
    assert!((ghost.mover.x - 302.5).abs() < 1e-3); // 262.5 + 80 × 0.5
}

#[test]
fn zero_aggression_ghost_never_paths() {
    let maze = open_maze();
    let mut ghost = Ghost::new(&maze, 10, 10, 80.0, 50.0, 0.0);
    let player = Player::new(&maze, 12, 10, 100.0);

    assert!(ghost.recalc_interval_ms().is_infinite());
    ghost.update(10_000.0, &maze, &player, &mut seeded_rng());
    assert!(ghost.path.is_empty());
}

// ── movement ──────────────────────────────────────────────────────────────────

#[test]
fn follows_waypoints_and_snaps_onto_them() {
    let maze = open_maze();
    // Low aggression keeps the hand-planted path from being recomputed
    let mut ghost = Ghost::new(&maze, 5, 5, 80.0, 50.0, 0.05);
    let player = Player::new(&maze, 20, 5, 100.0);
    ghost.path = vec![(6, 5), (7, 5)];
    ghost.path_index = 0;

    // 8px per tick toward the (162.5, 137.5) waypoint; the fourth tick
    // closes within the snap distance and lands exactly on the center.
    for _ in 0..4 {
        ghost.update(100.0, &maze, &player, &mut seeded_rng());
    }

    assert!((ghost.mover.x - 162.5).abs() < 1e-3);
    assert!((ghost.mover.y - 137.5).abs() < 1e-3);
    assert_eq!(ghost.path_index, 1);
}

#[test]
fn wander_prefers_not_to_reverse() {
    let mut maze = open_maze();
    // Horizontal corridor: open ahead and behind, walls above and below
    maze.grid[4][5] = Cell::Wall;
    maze.grid[6][5] = Cell::Wall;
    let mut ghost = Ghost::new(&maze, 5, 5, 80.0, 50.0, 0.05);
    ghost.mover.dir_x = 1.0;
    let player = Player::new(&maze, 20, 5, 100.0);

    // Cooldown expired with two legal directions; the reversal is
    // filtered out, so the ghost keeps going forward.
    ghost.update(200.0, &maze, &player, &mut seeded_rng());

    assert_eq!((ghost.mover.dir_x, ghost.mover.dir_y), (1.0, 0.0));
    assert!((ghost.mover.x - 153.5).abs() < 1e-3); // 137.5 + 80 × 0.2
}

#[test]
fn wander_reverses_only_in_a_dead_end() {
    let mut maze = open_maze();
    // Dead end: the corridor continues only behind the ghost
    maze.grid[4][5] = Cell::Wall;
    maze.grid[6][5] = Cell::Wall;
    maze.grid[5][6] = Cell::Wall;
    let mut ghost = Ghost::new(&maze, 5, 5, 80.0, 50.0, 0.05);
    ghost.mover.dir_x = 1.0;
    let player = Player::new(&maze, 20, 5, 100.0);

    // Well before the cooldown, but the way ahead is blocked — that
    // alone forces a re-pick, and reversing is the sole legal option.
    ghost.update(50.0, &maze, &player, &mut seeded_rng());

    assert_eq!((ghost.mover.dir_x, ghost.mover.dir_y), (-1.0, 0.0));
    assert!((ghost.mover.x - 133.5).abs() < 1e-3); // 137.5 - 80 × 0.05
}

#[test]
fn wander_commits_to_the_only_open_corridor() {
    let mut maze = open_maze();
    // Box the ghost in on three sides; only rightward stays legal
    maze.grid[5][4] = Cell::Wall;
    maze.grid[4][5] = Cell::Wall;
    maze.grid[6][5] = Cell::Wall;
    let mut ghost = Ghost::new(&maze, 5, 5, 80.0, 50.0, 0.05);
    let player = Player::new(&maze, 20, 5, 100.0);

    // Cooldown elapsed, no path cached: the wander picks a direction,
    // and the bounding-box probe rules out everything but right.
    ghost.update(200.0, &maze, &player, &mut seeded_rng());

    assert_eq!((ghost.mover.dir_x, ghost.mover.dir_y), (1.0, 0.0));
    assert!((ghost.mover.x - 153.5).abs() < 1e-3); // 137.5 + 80 × 0.2
    assert!((ghost.mover.y - 137.5).abs() < 1e-3);
}
