//! Gameplay state.
//!
//! - `GameEngine` - scroll and judgment state of the chart being played
//!
//! Stateful types expose their render view through [`Snapshot`].

pub mod game;
pub mod traits;

pub use game::GameEngine;
pub use traits::Snapshot;
