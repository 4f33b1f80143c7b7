//! Difficulty parameterization: a static table keyed `heaven` / `human`
//! / `hell`. A session picks one bundle up front and never changes it.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Difficulty {
    Heaven,
    Human,
    Hell,
}

/// The seven knobs a difficulty fixes for the whole session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DifficultySettings {
    /// Ghost speed in px/sec while chasing or returning.
    pub ghost_speed: f32,
    /// Ghost speed in px/sec while scared.
    pub ghost_scared_speed: f32,
    pub player_speed: f32,
    /// Maze wall-density parameter in [0,1].
    pub wall_density: f32,
    pub power_duration_ms: f32,
    pub starting_lives: u32,
    /// Ghost aggression in [0,1]; see the ghost module for what it
    /// scales.
    pub ghost_aggression: f32,
}

impl Difficulty {
    /// Resolve a difficulty key. The only stringly-typed entry point;
    /// unknown names are a caller error answered with `None`, never a
    /// panic.
    pub fn from_name(name: &str) -> Option<Difficulty> {
        match name {
            "heaven" => Some(Difficulty::Heaven),
            "human" => Some(Difficulty::Human),
            "hell" => Some(Difficulty::Hell),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Heaven => "heaven",
            Difficulty::Human => "human",
            Difficulty::Hell => "hell",
        }
    }

    pub fn settings(&self) -> DifficultySettings {
        match self {
            Difficulty::Heaven => DifficultySettings {
                ghost_speed: 60.0,
                ghost_scared_speed: 40.0,
                player_speed: 110.0,
                wall_density: 0.15,
                power_duration_ms: 12_000.0,
                starting_lives: 5,
                ghost_aggression: 0.3,
            },
            Difficulty::Human => DifficultySettings {
                ghost_speed: 80.0,
                ghost_scared_speed: 50.0,
                player_speed: 100.0,
                wall_density: 0.2,
                power_duration_ms: 10_000.0,
                starting_lives: 3,
                ghost_aggression: 0.6,
            },
            Difficulty::Hell => DifficultySettings {
                ghost_speed: 100.0,
                ghost_scared_speed: 55.0,
                player_speed: 95.0,
                wall_density: 0.3,
                power_duration_ms: 6_000.0,
                starting_lives: 2,
                ghost_aggression: 0.9,
            },
        }
    }
}
