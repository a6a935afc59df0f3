//! Five-lane keyboard rhythm game engine.
//!
//! Notes from a timestamped chart scroll down five lanes in sync with a
//! backing track; key presses are judged against their arrival at the hit
//! line, producing a score, a streak multiplier and a star rating, and each
//! finished song is ranked in a per-chart top-10 table.

pub mod error;
pub mod input;
pub mod logic;
pub mod models;
pub mod render;
pub mod shared;
pub mod state;
pub mod system;

pub use error::{EngineError, Result};
