//! Traits shared by the stateful parts of a session.

/// Trait for creating render-ready snapshots.
///
/// Snapshots are immutable captures of state handed to the draw pass.
pub trait Snapshot {
    /// The snapshot type produced.
    type Output;

    /// Creates an immutable snapshot for rendering.
    fn create_snapshot(&self) -> Self::Output;
}
