//! Collaborators the session talks to: time, music, input and drawing.

pub mod audio;
pub mod clock;
pub mod input;
pub mod render;

pub use audio::{MusicPlayer, RodioPlayer, SilentPlayer};
pub use clock::{Clock, ManualClock, SystemClock};
pub use input::{InputSource, ScriptedInput};
pub use render::{DrawCall, LogRenderer, NullRenderer, Rect, RecordingRenderer, Renderer, Sprite};
