//! Score, streak and star bookkeeping.
//!
//! The multiplier is never stored: it is derived from the current streak each
//! time it is needed.

use crate::models::settings::ScoringConfig;

/// Outcome of a single judgment, kept for the HUD flash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Judgement {
    /// Key-down inside the hit window.
    Hit,
    /// Key-down outside the hit window, or a note that scrolled past unpressed.
    Miss,
    /// Key-down with no pending note in the lane.
    GhostPress,
}

impl Judgement {
    pub fn breaks_streak(self) -> bool {
        !matches!(self, Judgement::Hit)
    }
}

/// Step function of the streak: `steps` are the inclusive upper bounds of the
/// 1x, 2x, 3x... tiers.
pub fn multiplier_for(streak: u32, steps: &[u32]) -> u32 {
    1 + steps.iter().filter(|&&bound| streak > bound).count() as u32
}

/// Default policy: `<= 10 → 1`, `<= 20 → 2`, `<= 30 → 3`, else 4.
pub fn multiplier(streak: u32) -> u32 {
    multiplier_for(streak, &ScoringConfig::default().multiplier_steps)
}

/// Running counters of one play session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub score: u32,
    pub streak: u32,
    pub highest_streak: u32,
    /// Notes judged as hits.
    pub accuracy: u32,
    pub star: u32,
    pub misses: u32,
    pub ghost_presses: u32,
    pub last_judgement: Option<Judgement>,
}

impl SessionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn multiplier(&self, scoring: &ScoringConfig) -> u32 {
        multiplier_for(self.streak, &scoring.multiplier_steps)
    }

    /// Adds `base * multiplier` using the multiplier of the current streak.
    pub fn award(&mut self, base: u32, scoring: &ScoringConfig) -> u32 {
        let gained = base.saturating_mul(self.multiplier(scoring));
        self.score = self.score.saturating_add(gained);
        gained
    }

    pub fn record_hit(&mut self) {
        self.accuracy += 1;
        self.streak += 1;
        self.highest_streak = self.highest_streak.max(self.streak);
        self.last_judgement = Some(Judgement::Hit);
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
        self.streak = 0;
        self.last_judgement = Some(Judgement::Miss);
    }

    pub fn record_ghost_press(&mut self) {
        self.ghost_presses += 1;
        self.streak = 0;
        self.last_judgement = Some(Judgement::GhostPress);
    }

    /// Counts every star threshold the score has crossed. Monotonic and
    /// idempotent; charts without a score threshold award no stars.
    pub fn update_stars(&mut self, no_multiplier_score: u32, thresholds: &[f64]) {
        if no_multiplier_score == 0 {
            return;
        }
        while let Some(&factor) = thresholds.get(self.star as usize) {
            if (self.score as f64) < no_multiplier_score as f64 * factor {
                break;
            }
            self.star += 1;
        }
    }

    /// Integer hit percentage over the chart's notes.
    pub fn accuracy_percent(&self, note_count: usize) -> u32 {
        if note_count == 0 {
            return 0;
        }
        (self.accuracy as u64 * 100 / note_count as u64) as u32
    }
}
