pub mod chart;
pub mod hit_window;
pub mod lyrics;
pub mod note;
pub mod playfield;

pub use chart::Chart;
pub use hit_window::HitWindow;
pub use lyrics::{LyricCursor, LyricLine, Lyrics};
pub use note::{LANE_COUNT, Lane, NEVER, Note};
pub use playfield::PlayfieldConfig;
