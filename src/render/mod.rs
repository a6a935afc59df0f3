//! Draw pass over render snapshots.

pub mod draw;
