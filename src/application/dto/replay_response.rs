use crate::snapshot_engine::domain::DependenciesSnapshot;
use std::sync::Arc;

/// ReplayResponse - Result of replaying a change log
///
/// Carries the final aggregate snapshot; formatting is left to adapters.
#[derive(Debug, Clone)]
pub struct ReplayResponse {
    pub snapshot: Arc<DependenciesSnapshot>,
    /// Batches read from the change log and applied
    pub batches_applied: usize,
    /// Batches that produced a new aggregate snapshot instead of the previous one
    pub snapshots_published: usize,
}

impl ReplayResponse {
    pub fn new(
        snapshot: Arc<DependenciesSnapshot>,
        batches_applied: usize,
        snapshots_published: usize,
    ) -> Self {
        Self {
            snapshot,
            batches_applied,
            snapshots_published,
        }
    }

    /// Used to determine the exit code for CI integration
    pub fn has_visible_unresolved_dependency(&self) -> bool {
        self.snapshot.has_visible_unresolved_dependency()
    }
}
