//! Lanes and the notes that scroll down them.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const LANE_COUNT: usize = 5;

/// Effectively "never": returned once a timed sequence is exhausted.
pub const NEVER: u32 = 100_000_000;

/// One of the five fret lanes, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lane {
    Green,
    Red,
    Yellow,
    Blue,
    Orange,
}

impl Lane {
    pub const ALL: [Lane; LANE_COUNT] = [
        Lane::Green,
        Lane::Red,
        Lane::Yellow,
        Lane::Blue,
        Lane::Orange,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Lane::Green => "green",
            Lane::Red => "red",
            Lane::Yellow => "yellow",
            Lane::Blue => "blue",
            Lane::Orange => "orange",
        };
        f.write_str(name)
    }
}

/// A single chart note plus its judgment state.
///
/// `entry_time` is when the note spawns on the session clock. The track starts
/// `music_start` ms into the session, so in song time the same value is the
/// moment the note reaches the hit window.
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub entry_time: u32,
    pub lane: Lane,
    pub is_held: bool,
    /// Required hold duration in ms, 0 for taps.
    pub held_time: u32,

    pub pressed: bool,
    pub released: bool,
    pub held_start_time: u32,
    /// Trail length in pixels, frozen once the tail has spawned.
    pub held_length: i32,
    pub held_end_check: bool,
    /// Set when the note crossed the judgment line unpressed.
    pub missed: bool,
    pub current_pos_y: i32,
}

impl Note {
    pub fn tap(entry_time: u32, lane: Lane) -> Self {
        Self::new(entry_time, lane, 0)
    }

    pub fn hold(entry_time: u32, lane: Lane, held_time: u32) -> Self {
        Self::new(entry_time, lane, held_time)
    }

    /// `held_time == 0` makes a tap note.
    pub fn new(entry_time: u32, lane: Lane, held_time: u32) -> Self {
        Self {
            entry_time,
            lane,
            is_held: held_time > 0,
            held_time,
            pressed: false,
            released: false,
            held_start_time: 0,
            held_length: 0,
            held_end_check: false,
            missed: false,
            current_pos_y: 0,
        }
    }

    pub fn end_time(&self) -> u32 {
        self.entry_time.saturating_add(self.held_time)
    }

    /// Score the note is worth without any multiplier.
    pub fn base_score(&self, tap_score: u32, hold_divisor: u32) -> u32 {
        if self.is_held {
            self.held_time / hold_divisor.max(1)
        } else {
            tap_score
        }
    }

    /// Whether a key-down in this lane can still judge the note.
    pub fn is_pending(&self) -> bool {
        !self.pressed
    }

    /// Whether a key-up in this lane finishes the sustain.
    pub fn awaits_release(&self) -> bool {
        self.is_held && self.pressed && !self.released
    }

    /// Position of the lowest pixel still on the highway: the tail for a
    /// frozen sustain, the head otherwise.
    pub fn trailing_pos_y(&self) -> Option<i32> {
        if !self.is_held {
            Some(self.current_pos_y)
        } else if self.held_end_check {
            Some(self.current_pos_y - self.held_length)
        } else {
            None
        }
    }
}
