use crate::application::read_models::SnapshotReadModel;
use crate::shared::Result;

/// SnapshotFormatter port for rendering a dependency snapshot
pub trait SnapshotFormatter {
    /// Formats the snapshot read model
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, model: &SnapshotReadModel) -> Result<String>;
}
