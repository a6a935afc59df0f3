//! Data loaded from disk or config, and the counters derived from it.

pub mod engine;
pub mod highscore;
pub mod settings;
pub mod stats;
