//! Core of a terminal maze-chase arcade game: procedural maze
//! generation with connectivity repair, continuous-coordinate movement,
//! ghost AI with breadth-first pathfinding, and the session loop that
//! ties them together.
//!
//! Everything here is host-agnostic: no timing, no I/O, and all
//! randomness flows through injected [`rand::Rng`] handles, so a seeded
//! generator reproduces a level (and a whole run) exactly. The binary
//! in `main.rs` wraps this in a crossterm front end.

pub mod difficulty;
pub mod ghost;
pub mod maze;
pub mod mover;
pub mod player;
pub mod session;
