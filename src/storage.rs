//! High-score persistence — one best score per difficulty, stored as
//! JSON under the platform data directory. Loading degrades to defaults
//! on any error; writes go through a temp file and rename so a crash
//! never leaves a torn file behind.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use maze_muncher::difficulty::Difficulty;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub(crate) struct HighScores {
    pub(crate) heaven: u32,
    pub(crate) human: u32,
    pub(crate) hell: u32,
}

impl HighScores {
    pub(crate) fn get(&self, difficulty: Difficulty) -> u32 {
        match difficulty {
            Difficulty::Heaven => self.heaven,
            Difficulty::Human => self.human,
            Difficulty::Hell => self.hell,
        }
    }

    /// Record a finished run; returns true if it beat the stored best.
    pub(crate) fn record(&mut self, difficulty: Difficulty, score: u32) -> bool {
        let slot = match difficulty {
            Difficulty::Heaven => &mut self.heaven,
            Difficulty::Human => &mut self.human,
            Difficulty::Hell => &mut self.hell,
        };
        if score > *slot {
            *slot = score;
            true
        } else {
            false
        }
    }
}

pub(crate) fn scores_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from("com", "maze-muncher", "MazeMuncher")
        .context("could not resolve project directories")?;
    let dir = proj.data_local_dir().to_path_buf();
    fs::create_dir_all(&dir).ok();
    Ok(dir.join("scores.json"))
}

pub(crate) fn load_scores(path: &Path) -> HighScores {
    if let Ok(s) = fs::read_to_string(path) {
        if let Ok(v) = serde_json::from_str::<HighScores>(&s) {
            return v;
        }
    }
    HighScores::default()
}

pub(crate) fn save_scores_atomic(path: &Path, scores: &HighScores) -> Result<()> {
    let tmp = path.with_extension("json.tmp");
    let data = serde_json::to_vec_pretty(scores)?;
    fs::write(&tmp, data)?;
    atomic_rename(&tmp, path)?;
    Ok(())
}

// Best-effort atomic replace on the same filesystem.
fn atomic_rename(from: &Path, to: &Path) -> Result<()> {
    if to.exists() {
        let _ = fs::remove_file(to);
    }
    fs::rename(from, to)?;
    Ok(())
}
