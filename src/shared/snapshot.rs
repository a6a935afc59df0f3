//! Render snapshots.
//!
//! Snapshots are immutable captures of session state handed to the draw pass.
//! This decouples game logic from rendering.

use crate::models::engine::{LANE_COUNT, LyricLine, Note};
use crate::models::stats::Judgement;

/// What the screen shows this frame.
#[derive(Clone, Debug)]
pub enum RenderState {
    /// Active gameplay.
    Playing(GameplaySnapshot),
    /// Pause overlay; gameplay is frozen underneath.
    Paused(GameplaySnapshot),
    /// Post-song result screen.
    Results(SongResult),
}

/// Snapshot of gameplay state for rendering.
#[derive(Clone, Debug, Default)]
pub struct GameplaySnapshot {
    /// Session time in ms, pauses excluded.
    pub passed_time: u32,
    /// Notes on the highway, oldest first.
    pub notes: Vec<Note>,
    /// Per-lane key held state.
    pub keys_held: [bool; LANE_COUNT],

    pub score: u32,
    pub streak: u32,
    pub multiplier: u32,
    pub star: u32,
    /// Notes hit so far.
    pub accuracy: u32,
    pub highest_streak: u32,
    pub note_count: usize,

    /// Last judgement (for flash display).
    pub last_judgement: Option<Judgement>,
    /// Caption on display, if any.
    pub lyric: Option<LyricLine>,
}

/// Outcome of a completed song.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SongResult {
    pub title: String,
    pub score: u32,
    pub stars: u32,
    /// Notes hit.
    pub accuracy: u32,
    pub note_count: usize,
    pub accuracy_percent: u32,
    pub highest_streak: u32,
    pub full_combo: bool,
    /// Score beat the previous best of the table.
    pub new_best: bool,
    /// Zero-based rank in the high-score table, if it qualified.
    pub rank: Option<usize>,
}
