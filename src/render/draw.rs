//! Translates a [`RenderState`] into renderer calls.

use crate::models::engine::{Lane, Note, PlayfieldConfig};
use crate::shared::snapshot::{GameplaySnapshot, RenderState, SongResult};
use crate::system::render::{Rect, Renderer, Sprite};

/// Fixed screen positions of the HUD and the caption lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HudLayout {
    pub highway: Rect,
    pub score_panel: Rect,
    pub lyric_first: (i32, i32),
    pub lyric_second: (i32, i32),
    pub score: (i32, i32),
    pub streak: (i32, i32),
    pub multiplier: (i32, i32),
    pub star: (i32, i32),
    /// Left margin and first row of the result screen.
    pub results_origin: (i32, i32),
    pub results_row_height: i32,
}

pub const HUD: HudLayout = HudLayout {
    highway: Rect::new(134, 0, 321, 630),
    score_panel: Rect::new(620, 410, 380, 140),
    lyric_first: (480, 100),
    lyric_second: (480, 150),
    score: (642, 435),
    streak: (715, 492),
    multiplier: (480, 330),
    star: (907, 441),
    results_origin: (70, 70),
    results_row_height: 50,
};

/// Top of a sustain trail whose tail has not spawned yet.
const TRAIL_TOP_Y: i32 = -4;

/// Draws one complete frame.
pub fn draw_frame(renderer: &mut dyn Renderer, state: &RenderState, field: &PlayfieldConfig) {
    renderer.clear();
    match state {
        RenderState::Playing(snapshot) => draw_gameplay(renderer, snapshot, field),
        RenderState::Paused(_) => renderer.draw_sprite(
            Sprite::PauseScreen,
            Rect::new(0, 0, field.screen_width, field.screen_height),
            None,
        ),
        RenderState::Results(result) => draw_results(renderer, result, field),
    }
    renderer.present();
}

fn draw_gameplay(renderer: &mut dyn Renderer, snapshot: &GameplaySnapshot, field: &PlayfieldConfig) {
    renderer.draw_sprite(Sprite::Highway, HUD.highway, None);
    renderer.draw_sprite(Sprite::ScorePanel, HUD.score_panel, None);

    for note in &snapshot.notes {
        draw_note(renderer, note, field);
    }

    if let Some(lyric) = &snapshot.lyric {
        renderer.draw_text(&lyric.first, HUD.lyric_first.0, HUD.lyric_first.1);
        if let Some(second) = &lyric.second {
            renderer.draw_text(second, HUD.lyric_second.0, HUD.lyric_second.1);
        }
    }

    renderer.draw_text(&snapshot.score.to_string(), HUD.score.0, HUD.score.1);
    renderer.draw_text(&snapshot.streak.to_string(), HUD.streak.0, HUD.streak.1);
    renderer.draw_text(
        &format!("x {}", snapshot.multiplier),
        HUD.multiplier.0,
        HUD.multiplier.1,
    );
    renderer.draw_text(&snapshot.star.to_string(), HUD.star.0, HUD.star.1);

    let size = field.button_size;
    for lane in Lane::ALL {
        if snapshot.keys_held[lane.index()] {
            renderer.draw_sprite(
                Sprite::PressedButton,
                Rect::new(field.lane_x(lane) - 2, field.button_y, size, size),
                Some(sheet_clip(lane, size)),
            );
        }
    }
}

fn draw_note(renderer: &mut dyn Renderer, note: &Note, field: &PlayfieldConfig) {
    let y = note.current_pos_y;
    let holding = note.pressed && !note.released;

    // A held gem disappears into the fret; its trail keeps scrolling.
    if !(note.is_held && note.pressed) {
        let size = field.note_size;
        renderer.draw_sprite(
            Sprite::Note,
            Rect::new(field.lane_x(note.lane), y, size, size),
            Some(sheet_clip(note.lane, size)),
        );
    }

    if !note.is_held {
        return;
    }

    let top = if note.held_end_check {
        y - note.held_length - field.trail_tail_padding
    } else {
        TRAIL_TOP_Y
    };
    let bottom = if holding { field.judgment_line_y } else { y };
    let size = field.trail_size;
    let clip = sheet_clip(note.lane, size);
    let x = field.trail_x(note.lane);

    let mut segment_y = bottom;
    while segment_y >= top {
        renderer.draw_sprite(Sprite::HoldTrail, Rect::new(x, segment_y, size, size), Some(clip));
        segment_y -= field.trail_step.max(1);
    }
}

/// Lane sprites are laid out left to right on one row of the sheet.
fn sheet_clip(lane: Lane, size: i32) -> Rect {
    Rect::new(size * lane.index() as i32, 0, size, size)
}

fn draw_results(renderer: &mut dyn Renderer, result: &SongResult, field: &PlayfieldConfig) {
    renderer.draw_sprite(
        Sprite::ResultBackground,
        Rect::new(0, 0, field.screen_width, field.screen_height),
        None,
    );

    let (x, mut y) = HUD.results_origin;
    for line in result_lines(result) {
        renderer.draw_text(&line, x, y);
        y += HUD.results_row_height;
    }
}

/// Text rows of the result screen.
pub fn result_lines(result: &SongResult) -> Vec<String> {
    let mut headline = format!("Score: {}", result.score);
    if result.new_best {
        headline.push_str("   New high score!");
    }

    let mut lines = vec![
        headline,
        format!("Stars: {}", result.stars),
        format!(
            "Accuracy: {}/{} ({}%)",
            result.accuracy, result.note_count, result.accuracy_percent
        ),
        format!("Highest streak: {}", result.highest_streak),
    ];
    if result.full_combo {
        lines.push("Full combo!".to_string());
    }
    if let Some(rank) = result.rank {
        lines.push(format!("Rank #{} on {}", rank + 1, result.title));
    }
    lines
}
