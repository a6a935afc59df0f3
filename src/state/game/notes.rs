//! Note processing: admission, scrolling, tail freezing, misses and eviction.

use super::GameEngine;

impl GameEngine {
    /// Pushes every chart note whose entry time has been reached.
    pub(crate) fn admit_notes(&mut self, passed_time: u32) {
        while self.chart.entry_time(self.cursor) <= passed_time {
            let Some(note) = self.chart.notes.get(self.cursor) else {
                break;
            };
            self.active.push_back(note.clone());
            self.cursor += 1;
        }
    }

    /// Recomputes positions, freezes sustain tails and flags notes that
    /// crossed the judgment line unpressed.
    pub(crate) fn update_notes(&mut self, passed_time: u32) {
        let pixels_per_ms = self.chart.pixels_per_ms;
        let spawn_offset = self.playfield.spawn_offset;
        let mut newly_missed = 0;

        for note in self.active.iter_mut() {
            let elapsed = passed_time.saturating_sub(note.entry_time);
            note.current_pos_y = (elapsed as f64 * pixels_per_ms) as i32 - spawn_offset;

            if note.is_held && !note.held_end_check && passed_time >= note.end_time() {
                note.held_length = note.current_pos_y;
                note.held_end_check = true;
            }

            if !note.pressed && !note.missed && self.hit_window.is_past(note.current_pos_y) {
                note.missed = true;
                newly_missed += 1;
                log::debug!(
                    "ENGINE: missed {} note at {} ms",
                    note.lane,
                    note.entry_time
                );
            }
        }

        for _ in 0..newly_missed {
            self.stats.record_miss();
        }
    }

    /// Drops every note fully below the screen. A sustain is only dropped
    /// after its tail has been frozen, and never holds back the notes behind it.
    pub(crate) fn evict_notes(&mut self) {
        let offscreen_y = self.playfield.offscreen_y;
        let before = self.active.len();
        self.active
            .retain(|n| !n.trailing_pos_y().is_some_and(|y| y > offscreen_y));
        if self.active.len() < before {
            log::trace!("ENGINE: evicted {} notes", before - self.active.len());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use crate::models::engine::Lane;
    use crate::models::stats::Judgement;

    #[test]
    fn admits_notes_in_time_order() {
        let mut engine = engine(FAST, 0, &[(100, 0, 0), (100, 3, 0), (250, 1, 0), (900, 2, 0)]);
        engine.update(99);
        assert_eq!(engine.active_len(), 0);

        engine.update(100);
        assert_eq!(engine.active_len(), 2);

        engine.update(300);
        let entries: Vec<u32> = engine.active_notes().map(|n| n.entry_time).collect();
        assert_eq!(entries, vec![100, 100, 250]);
        assert!(entries.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn position_follows_elapsed_time() {
        let mut engine = engine(4, 0, &[(0, 0, 0)]);
        engine.update(0);
        assert_eq!(engine.active[0].current_pos_y, -99);
        engine.update(1000);
        // 0.5 px/ms
        assert_eq!(engine.active[0].current_pos_y, 401);
    }

    #[test]
    fn note_reaches_window_when_music_reaches_entry_time() {
        for speed in [2, 4, 9] {
            let mut engine = engine(speed, 0, &[(1000, 0, 0)]);
            let music_start = engine.chart.music_start;
            engine.update(1000 + music_start);
            let pos = engine.active[0].current_pos_y;
            assert!(engine.hit_window.contains(pos), "speed {speed}: pos {pos}");
        }
    }

    #[test]
    fn missed_note_resets_streak_exactly_once() {
        let mut engine = engine(FAST, 0, &[(0, 0, 0)]);
        engine.stats.streak = 7;

        engine.update(693); // pos 594, still on the line
        assert_eq!(engine.stats.streak, 7);

        engine.update(694);
        assert_eq!(engine.stats.streak, 0);
        assert_eq!(engine.stats.misses, 1);
        assert_eq!(engine.stats.last_judgement, Some(Judgement::Miss));

        engine.stats.streak = 3;
        engine.update(700);
        assert_eq!(engine.stats.streak, 3);
        assert_eq!(engine.stats.misses, 1);
    }

    #[test]
    fn taps_evicted_only_below_the_screen() {
        let mut engine = engine(FAST, 0, &[(0, 0, 0), (50, 1, 0)]);
        engine.update(729); // pos 630
        assert_eq!(engine.active_len(), 2);
        engine.update(730); // pos 631
        assert_eq!(engine.active_len(), 1);
        assert_eq!(engine.active[0].entry_time, 50);
    }

    #[test]
    fn sustain_tail_freezes_once() {
        let mut engine = engine(FAST, 0, &[(0, 0, 300)]);
        engine.update(299);
        assert!(!engine.active[0].held_end_check);

        engine.update(300);
        assert!(engine.active[0].held_end_check);
        assert_eq!(engine.active[0].held_length, 201);

        engine.update(400);
        assert_eq!(engine.active[0].held_length, 201);
        assert_eq!(engine.active[0].trailing_pos_y(), Some(100));
    }

    #[test]
    fn sustain_stays_until_its_tail_leaves() {
        let mut engine = engine(FAST, 0, &[(0, 0, 300), (10, 1, 0)]);
        engine.update(300);
        // Head well below the screen, tail (head - 201) still at 630.
        engine.update(930);
        assert_eq!(engine.active_len(), 1);
        assert_eq!(engine.active[0].entry_time, 0);
        engine.update(931);
        assert_eq!(engine.active_len(), 0);
    }

    #[test]
    fn long_sustain_not_evicted_before_tail_spawns() {
        let mut engine = engine(FAST, 0, &[(0, 0, 5000)]);
        engine.update(2000);
        assert!(engine.active[0].current_pos_y > 630);
        assert_eq!(engine.active_len(), 1);
    }

    #[test]
    fn long_sustain_does_not_hold_back_later_notes() {
        let mut engine = engine(FAST, 0, &[(0, 0, 5000), (100, 1, 0), (500, 1, 0)]);
        for t in (0..=1150).step_by(5) {
            engine.update(t);
        }

        let entries: Vec<u32> = engine.active_notes().map(|n| n.entry_time).collect();
        assert_eq!(entries, vec![0, 500]);
        assert_eq!(engine.active[1].current_pos_y, 551);

        assert_eq!(engine.press(Lane::Red, 1150, false), Some(Judgement::Hit));
        assert_eq!(engine.stats.streak, 1);
    }
}
