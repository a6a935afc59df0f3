//! Judgment of lane key-down and key-up events.

use super::GameEngine;
use crate::models::engine::Lane;
use crate::models::stats::Judgement;

impl GameEngine {
    /// Judges a key-down in `lane` at session time `passed_time`.
    ///
    /// Returns `None` for key-repeat events, which only keep the lane lit.
    pub fn press(&mut self, lane: Lane, passed_time: u32, repeat: bool) -> Option<Judgement> {
        self.keys_held[lane.index()] = true;
        if repeat {
            return None;
        }

        let Some(idx) = self
            .active
            .iter()
            .position(|n| n.lane == lane && n.is_pending())
        else {
            self.stats.record_ghost_press();
            log::debug!("ENGINE: ghost press on {} at {} ms", lane, passed_time);
            return Some(Judgement::GhostPress);
        };

        let pos = self.active[idx].current_pos_y;
        if !self.hit_window.contains(pos) {
            self.stats.record_miss();
            log::debug!("ENGINE: {} pressed outside the window (y = {})", lane, pos);
            return Some(Judgement::Miss);
        }

        if self.active[idx].is_held {
            let note = &mut self.active[idx];
            note.pressed = true;
            note.held_start_time = passed_time;
        } else {
            let gained = self.stats.award(self.scoring.tap_score, &self.scoring);
            self.active.remove(idx);
            log::debug!("ENGINE: {} tap hit at y = {} (+{})", lane, pos, gained);
        }
        self.stats.record_hit();
        self.refresh_stars();
        Some(Judgement::Hit)
    }

    /// Handles a key-up in `lane`, scoring the sustain being held there.
    /// Returns the points awarded.
    pub fn release(&mut self, lane: Lane, passed_time: u32) -> Option<u32> {
        self.keys_held[lane.index()] = false;

        let note = self
            .active
            .iter_mut()
            .find(|n| n.lane == lane && n.awaits_release())?;
        note.released = true;
        let held_for = passed_time
            .saturating_sub(note.held_start_time)
            .min(note.held_time);
        let base = held_for / self.scoring.hold_divisor.max(1);

        let gained = self.stats.award(base, &self.scoring);
        log::debug!("ENGINE: {} sustain released after {} ms (+{})", lane, held_for, gained);
        self.refresh_stars();
        Some(gained)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use crate::models::engine::Lane;
    use crate::models::stats::Judgement;

    #[test]
    fn tap_hit_when_song_reaches_entry_time() {
        let mut engine = engine(FAST, 0, &[(1000, 0, 0)]);
        let now = 1000 + engine.chart.music_start;
        engine.update(now);

        assert_eq!(engine.press(Lane::Green, now, false), Some(Judgement::Hit));
        assert_eq!(engine.stats.score, 50);
        assert_eq!(engine.stats.accuracy, 1);
        assert_eq!(engine.stats.streak, 1);
        assert_eq!(engine.active_len(), 0);
    }

    #[test]
    fn window_is_inclusive_on_both_edges() {
        let mut engine = engine(FAST, 0, &[(0, 0, 0), (200, 0, 0)]);
        engine.update(625); // first note at 526
        assert_eq!(engine.press(Lane::Green, 625, false), Some(Judgement::Hit));

        engine.update(893); // second note at 594
        assert_eq!(engine.press(Lane::Green, 893, false), Some(Judgement::Hit));
        assert_eq!(engine.stats.accuracy, 2);
    }

    #[test]
    fn early_press_misses_and_keeps_the_note() {
        let mut engine = engine(FAST, 0, &[(0, 0, 0)]);
        engine.stats.streak = 4;
        engine.update(624); // y = 525
        assert_eq!(engine.press(Lane::Green, 624, false), Some(Judgement::Miss));
        assert_eq!(engine.stats.streak, 0);
        assert_eq!(engine.active_len(), 1);

        engine.update(650);
        assert_eq!(engine.press(Lane::Green, 650, false), Some(Judgement::Hit));
    }

    #[test]
    fn ghost_press_resets_streak() {
        let mut engine = engine(FAST, 0, &[(0, 1, 0)]);
        engine.update(625);
        engine.stats.streak = 12;
        assert_eq!(engine.press(Lane::Green, 625, false), Some(Judgement::GhostPress));
        assert_eq!(engine.stats.streak, 0);
        assert_eq!(engine.stats.ghost_presses, 1);
        assert!(engine.keys_held[0]);
    }

    #[test]
    fn key_repeat_is_ignored() {
        let mut engine = engine(FAST, 0, &[(0, 0, 0)]);
        engine.update(625);
        engine.stats.streak = 3;
        assert_eq!(engine.press(Lane::Green, 625, true), None);
        assert_eq!(engine.stats.streak, 3);
        assert_eq!(engine.active_len(), 1);
        assert!(engine.keys_held[0]);
    }

    #[test]
    fn earliest_note_in_lane_is_judged_first() {
        let mut engine = engine(FAST, 0, &[(0, 2, 0), (30, 2, 0)]);
        engine.update(660); // 561 and 531, both inside the window
        assert_eq!(engine.press(Lane::Yellow, 660, false), Some(Judgement::Hit));
        assert_eq!(engine.active_len(), 1);
        assert_eq!(engine.active[0].entry_time, 30);
    }

    #[test]
    fn multiplier_applies_before_the_streak_increment() {
        let mut engine = engine(FAST, 0, &[(0, 0, 0)]);
        engine.stats.streak = 10;
        engine.update(625);
        engine.press(Lane::Green, 625, false);
        assert_eq!(engine.stats.score, 50);
        assert_eq!(engine.stats.streak, 11);
        assert_eq!(engine.multiplier(), 2);
    }

    #[test]
    fn sustain_pays_held_time_capped_at_its_length() {
        let mut engine = engine(FAST, 0, &[(2000, 3, 500)]);
        let start = engine.chart.music_start;

        engine.update(2000 + start);
        assert_eq!(engine.press(Lane::Blue, 2000 + start, false), Some(Judgement::Hit));
        assert_eq!(engine.stats.score, 0);
        assert_eq!(engine.stats.accuracy, 1);
        assert_eq!(engine.active_len(), 1);

        engine.update(2600 + start);
        assert_eq!(engine.release(Lane::Blue, 2600 + start), Some(50));
        assert_eq!(engine.stats.score, 50);
        assert!(engine.active[0].released);
        assert!(!engine.keys_held[3]);

        // A second release finds nothing to score.
        assert_eq!(engine.release(Lane::Blue, 2700 + start), None);
    }

    #[test]
    fn early_release_pays_partial_hold() {
        let mut engine = engine(FAST, 0, &[(0, 4, 1000)]);
        engine.stats.streak = 25;
        engine.update(625);
        engine.press(Lane::Orange, 625, false);
        // Streak 26 → 3x
        assert_eq!(engine.release(Lane::Orange, 925), Some(30 * 3));
    }

    #[test]
    fn pressed_sustain_is_not_missed_and_not_retargeted() {
        let mut engine = engine(FAST, 0, &[(0, 0, 400)]);
        engine.update(625);
        engine.press(Lane::Green, 625, false);
        engine.update(800);
        assert_eq!(engine.stats.misses, 0);
        assert_eq!(engine.stats.streak, 1);

        assert_eq!(engine.press(Lane::Green, 800, false), Some(Judgement::GhostPress));
    }

    #[test]
    fn stars_follow_score() {
        let mut engine = engine(FAST, 100, &[(0, 0, 0), (0, 1, 0)]);
        engine.update(625);
        engine.press(Lane::Green, 625, false);
        assert_eq!(engine.stats.star, 1);
        engine.press(Lane::Red, 625, false);
        assert_eq!(engine.stats.star, 2);
        engine.update(626);
        assert_eq!(engine.stats.star, 2);
    }

    #[test]
    fn release_without_sustain_clears_the_lane() {
        let mut engine = engine(FAST, 0, &[]);
        engine.press(Lane::Red, 10, false);
        assert!(engine.keys_held[1]);
        assert_eq!(engine.release(Lane::Red, 20), None);
        assert!(!engine.keys_held[1]);
    }
}
