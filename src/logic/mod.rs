//! Session orchestration.
//!
//! A [`session::Session`] advances one level frame by frame, coordinating the
//! gameplay engine with the clock, music, input and renderer collaborators.

pub mod autoplay;
pub mod session;

pub use autoplay::AutoplayInput;
pub use session::{Collaborators, LevelContent, Session, SessionOutcome, SessionState};
