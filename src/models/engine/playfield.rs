//! Playfield geometry: hit line, hit box, lane columns and sprite sizes.

use super::note::Lane;
use serde::{Deserialize, Serialize};

/// Layout of the five-lane highway, in screen pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayfieldConfig {
    pub screen_width: i32,
    pub screen_height: i32,
    /// Y of the judgment line (bottom edge of the hit window).
    pub judgment_line_y: i32,
    /// Height of the hit window above the judgment line.
    pub hit_box: i32,
    /// Notes spawn this many pixels above the top of the screen.
    pub spawn_offset: i32,
    /// Notes are evicted once they scroll below this Y.
    pub offscreen_y: i32,
    pub lane_origin_x: i32,
    pub lane_spacing: i32,
    pub note_size: i32,
    pub trail_offset_x: i32,
    pub trail_size: i32,
    /// Vertical distance between two trail segments.
    pub trail_step: i32,
    /// Extra pixels drawn past the frozen end of a trail.
    pub trail_tail_padding: i32,
    pub button_y: i32,
    pub button_size: i32,
}

impl Default for PlayfieldConfig {
    fn default() -> Self {
        Self {
            screen_width: 1120,
            screen_height: 630,
            judgment_line_y: 594,
            hit_box: 68,
            spawn_offset: 99,
            offscreen_y: 630,
            lane_origin_x: 150,
            lane_spacing: 60,
            note_size: 49,
            trail_offset_x: 21,
            trail_size: 7,
            trail_step: 3,
            trail_tail_padding: 44,
            button_y: 568,
            button_size: 53,
        }
    }
}

impl PlayfieldConfig {
    /// Top edge of the hit window.
    pub fn hit_window_top(&self) -> i32 {
        self.judgment_line_y - self.hit_box
    }

    /// Scroll distance a note covers between spawning and entering the hit window.
    pub fn travel_distance(&self) -> i32 {
        self.hit_window_top() + self.spawn_offset
    }

    pub fn lane_x(&self, lane: Lane) -> i32 {
        self.lane_origin_x + self.lane_spacing * lane.index() as i32
    }

    pub fn trail_x(&self, lane: Lane) -> i32 {
        self.lane_x(lane) + self.trail_offset_x
    }
}
