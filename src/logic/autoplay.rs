//! Scripted perfect player.
//!
//! Presses every note when it reaches the middle of the hit window and holds
//! sustains for their full length.

use crate::input::{Action, InputEvent, KeyBindings};
use crate::models::engine::{Chart, PlayfieldConfig};
use crate::system::{Clock, InputSource, ScriptedInput};

/// How long a tap key stays down.
const TAP_HOLD_MS: u64 = 40;

/// Input source that plays a chart perfectly.
///
/// Event times are fixed when the player is built, so it assumes the session
/// starts at `session_start` on the same clock and is never paused.
pub struct AutoplayInput<C: Clock> {
    script: ScriptedInput<C>,
}

impl<C: Clock> AutoplayInput<C> {
    pub fn new(
        clock: C,
        session_start: u64,
        chart: &Chart,
        field: &PlayfieldConfig,
        bindings: &KeyBindings,
    ) -> Self {
        let mut script = ScriptedInput::new(clock);
        let lead = hit_lead_ms(chart, field);

        for note in &chart.notes {
            let Some(code) = bindings.key_for(Action::Lane(note.lane)) else {
                log::warn!("AUTOPLAY: No key bound to the {} lane", note.lane);
                continue;
            };
            let press_at = session_start + note.entry_time as u64 + lead;
            let hold_for = if note.is_held {
                note.held_time as u64
            } else {
                TAP_HOLD_MS
            };
            script
                .key_down(press_at, code)
                .key_up(press_at + hold_for, code);
        }

        log::info!("AUTOPLAY: Scripted {} key events", script.remaining());
        Self { script }
    }
}

/// Session ms after admission at which a note sits mid-window.
fn hit_lead_ms(chart: &Chart, field: &PlayfieldConfig) -> u64 {
    let target = field.hit_window_top() + field.hit_box / 2 + field.spawn_offset;
    (target.max(0) as f64 / chart.pixels_per_ms).ceil() as u64
}

impl<C: Clock> InputSource for AutoplayInput<C> {
    fn poll_event(&mut self) -> Option<InputEvent> {
        self.script.poll_event()
    }
}
