//! Core gameplay engine.
//!
//! The `GameEngine` owns the per-frame scroll and judgment state of one
//! chart:
//! - admission of chart notes into the active window
//! - note positions derived from the session clock
//! - key-down/key-up judgment, score and streak
//!
//! Time always comes from the caller as the session's `passed_time` in ms;
//! the engine never reads a clock itself.

mod input;
mod notes;
mod snapshot;

use crate::models::engine::{Chart, HitWindow, LANE_COUNT, Lane, Note, PlayfieldConfig};
use crate::models::settings::{EngineConfig, ScoringConfig};
use crate::models::stats::SessionStats;
use std::collections::VecDeque;

pub struct GameEngine {
    /// The loaded chart. Its notes are never mutated; judgment state lives in
    /// the copies held by `active`.
    pub chart: Chart,
    /// Index of the next chart note to admit.
    pub(crate) cursor: usize,
    /// Admitted notes, oldest first.
    pub(crate) active: VecDeque<Note>,

    pub stats: SessionStats,
    /// Lanes whose key is physically down.
    pub keys_held: [bool; LANE_COUNT],
    /// Session time of the last tick or judgment.
    pub(crate) passed_time: u32,

    pub hit_window: HitWindow,
    pub(crate) playfield: PlayfieldConfig,
    pub(crate) scoring: ScoringConfig,
    pub(crate) star_thresholds: Vec<f64>,
}

impl GameEngine {
    pub fn new(chart: Chart, config: &EngineConfig) -> Self {
        log::debug!(
            "ENGINE: {} notes, {:.1} px/ms, hit window {}..={}",
            chart.note_count(),
            chart.pixels_per_ms,
            config.playfield.hit_window_top(),
            config.playfield.judgment_line_y
        );
        Self {
            chart,
            cursor: 0,
            active: VecDeque::new(),
            stats: SessionStats::new(),
            keys_held: [false; LANE_COUNT],
            passed_time: 0,
            hit_window: HitWindow::from_playfield(&config.playfield),
            playfield: config.playfield.clone(),
            scoring: config.scoring.clone(),
            star_thresholds: config.timing.star_thresholds.clone(),
        }
    }

    /// Advances the scroll state to `passed_time` (session ms).
    pub fn update(&mut self, passed_time: u32) {
        self.passed_time = passed_time;
        self.admit_notes(passed_time);
        self.update_notes(passed_time);
        self.evict_notes();
        self.refresh_stars();
    }

    /// Notes currently on the highway, oldest first.
    pub fn active_notes(&self) -> impl Iterator<Item = &Note> {
        self.active.iter()
    }

    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    pub fn multiplier(&self) -> u32 {
        self.stats.multiplier(&self.scoring)
    }

    pub fn is_lane_held(&self, lane: Lane) -> bool {
        self.keys_held[lane.index()]
    }

    /// Whether every chart note has been admitted and left the highway.
    pub fn is_chart_exhausted(&self) -> bool {
        self.cursor >= self.chart.note_count() && self.active.is_empty()
    }

    pub(crate) fn refresh_stars(&mut self) {
        self.stats
            .update_stars(self.chart.no_multiplier_score, &self.star_thresholds);
    }
}
