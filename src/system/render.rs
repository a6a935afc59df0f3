//! Drawing backends.

use std::cell::RefCell;
use std::rc::Rc;

/// Screen rectangle in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }
}

/// Textures the game draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    /// Guitar neck behind the lanes.
    Highway,
    /// Note gems, one clip per lane.
    Note,
    /// Sustain trail segments, one clip per lane.
    HoldTrail,
    /// Lit fret buttons, one clip per lane.
    PressedButton,
    /// HUD panel holding score and stars.
    ScorePanel,
    PauseScreen,
    ResultBackground,
}

/// Abstraction over drawing backends.
/// Implementations: LogRenderer (debug log), NullRenderer and RecordingRenderer (testing).
pub trait Renderer {
    fn clear(&mut self);
    /// Draws `clip` of `sprite` (the whole texture when `None`) at `dest`.
    fn draw_sprite(&mut self, sprite: Sprite, dest: Rect, clip: Option<Rect>);
    fn draw_text(&mut self, text: &str, x: i32, y: i32);
    fn present(&mut self);
}

/// Discards everything.
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn clear(&mut self) {}
    fn draw_sprite(&mut self, _sprite: Sprite, _dest: Rect, _clip: Option<Rect>) {}
    fn draw_text(&mut self, _text: &str, _x: i32, _y: i32) {}
    fn present(&mut self) {}
}

/// Summarises each presented frame on the debug log.
#[derive(Debug, Default)]
pub struct LogRenderer {
    frame: u64,
    sprites: usize,
    texts: Vec<String>,
}

impl LogRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Renderer for LogRenderer {
    fn clear(&mut self) {
        self.sprites = 0;
        self.texts.clear();
    }

    fn draw_sprite(&mut self, _sprite: Sprite, _dest: Rect, _clip: Option<Rect>) {
        self.sprites += 1;
    }

    fn draw_text(&mut self, text: &str, _x: i32, _y: i32) {
        self.texts.push(text.to_string());
    }

    fn present(&mut self) {
        self.frame += 1;
        log::debug!(
            "RENDER: frame {} ({} sprites) {}",
            self.frame,
            self.sprites,
            self.texts.join(" | ")
        );
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCall {
    Sprite {
        sprite: Sprite,
        dest: Rect,
        clip: Option<Rect>,
    },
    Text {
        text: String,
        x: i32,
        y: i32,
    },
}

/// Keeps the draw calls of the last presented frame. Clones share the record.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    pending: Vec<DrawCall>,
    presented: Rc<RefCell<Vec<DrawCall>>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_frame(&self) -> Vec<DrawCall> {
        self.presented.borrow().clone()
    }

    /// Texts drawn in the last presented frame.
    pub fn texts(&self) -> Vec<String> {
        self.presented
            .borrow()
            .iter()
            .filter_map(|c| match c {
                DrawCall::Text { text, .. } => Some(text.clone()),
                DrawCall::Sprite { .. } => None,
            })
            .collect()
    }

    pub fn sprites(&self, sprite: Sprite) -> Vec<Rect> {
        self.presented
            .borrow()
            .iter()
            .filter_map(|c| match c {
                DrawCall::Sprite { sprite: s, dest, .. } if *s == sprite => Some(*dest),
                _ => None,
            })
            .collect()
    }
}

impl Renderer for RecordingRenderer {
    fn clear(&mut self) {
        self.pending.clear();
    }

    fn draw_sprite(&mut self, sprite: Sprite, dest: Rect, clip: Option<Rect>) {
        self.pending.push(DrawCall::Sprite { sprite, dest, clip });
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32) {
        self.pending.push(DrawCall::Text {
            text: text.to_string(),
            x,
            y,
        });
    }

    fn present(&mut self) {
        *self.presented.borrow_mut() = std::mem::take(&mut self.pending);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_keeps_only_presented_frames() {
        let mut renderer = RecordingRenderer::new();
        let handle = renderer.clone();

        renderer.clear();
        renderer.draw_text("score", 1, 2);
        assert!(handle.last_frame().is_empty());

        renderer.present();
        assert_eq!(handle.texts(), vec!["score".to_string()]);

        renderer.clear();
        renderer.draw_sprite(Sprite::Note, Rect::new(0, 0, 49, 49), None);
        renderer.present();
        assert!(handle.texts().is_empty());
        assert_eq!(handle.sprites(Sprite::Note), vec![Rect::new(0, 0, 49, 49)]);
    }
}
