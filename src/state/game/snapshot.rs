//! Snapshot creation for GameEngine.

use super::GameEngine;
use crate::shared::snapshot::GameplaySnapshot;
use crate::state::traits::Snapshot;

impl Snapshot for GameEngine {
    type Output = GameplaySnapshot;

    /// Captures the highway and HUD counters. The caption is filled in by the
    /// session, which owns the lyrics.
    fn create_snapshot(&self) -> GameplaySnapshot {
        GameplaySnapshot {
            passed_time: self.passed_time,
            notes: self.active.iter().cloned().collect(),
            keys_held: self.keys_held,
            score: self.stats.score,
            streak: self.stats.streak,
            multiplier: self.multiplier(),
            star: self.stats.star,
            accuracy: self.stats.accuracy,
            highest_streak: self.stats.highest_streak,
            note_count: self.chart.note_count(),
            last_judgement: self.stats.last_judgement,
            lyric: None,
        }
    }
}
