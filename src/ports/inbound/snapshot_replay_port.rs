use crate::application::dto::{ReplayRequest, ReplayResponse};
use crate::shared::Result;

/// SnapshotReplayPort - Inbound port for replaying recorded dependency changes
///
/// This port defines the interface that external adapters (CLI, tests, etc.)
/// use to drive the snapshot engine from a change log.
pub trait SnapshotReplayPort {
    /// Replays every batch of the change log named in `request`
    ///
    /// # Errors
    /// Returns an error if:
    /// - The change log cannot be read or parsed
    /// - A disabled filter name is unknown
    /// - A batch violates a snapshot invariant (e.g. the active target
    ///   framework is dropped from the target set)
    fn replay(&self, request: ReplayRequest) -> Result<ReplayResponse>;
}
