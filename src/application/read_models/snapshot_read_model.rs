//! Snapshot read model for rendering
//!
//! A denormalized view of a `DependenciesSnapshot`: targets, grouped by
//! provider type, with the icon and resolution state each node displays.

use super::report_metadata::ReportMetadata;
use crate::snapshot_engine::domain::ImageMoniker;
use serde::Serialize;
use std::collections::BTreeMap;
use uuid::Uuid;

/// Main read model for snapshot data
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotReadModel {
    pub metadata: ReportMetadata,
    pub project_path: String,
    pub active_target_framework: Option<String>,
    pub has_visible_unresolved_dependency: bool,
    pub targets: Vec<TargetView>,
}

/// Dependencies of one target framework
#[derive(Debug, Clone, Serialize)]
pub struct TargetView {
    pub target_framework: String,
    pub full_name: String,
    pub is_active: bool,
    pub has_visible_unresolved_dependency: bool,
    pub groups: Vec<ProviderGroupView>,
}

/// Dependencies sharing a provider type, headed by the provider's root node
#[derive(Debug, Clone, Serialize)]
pub struct ProviderGroupView {
    pub provider_type: String,
    pub caption: String,
    pub icon: IconView,
    /// True if a visible dependency of this group is unresolved
    pub has_unresolved: bool,
    pub dependencies: Vec<DependencyNodeView>,
}

/// A single dependency as the tree shows it
#[derive(Debug, Clone, Serialize)]
pub struct DependencyNodeView {
    pub id: String,
    pub caption: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub schema_name: String,
    pub priority: i32,
    pub resolved: bool,
    /// Unresolved itself or through a visible descendant
    pub appears_unresolved: bool,
    pub implicit: bool,
    pub visible: bool,
    pub icon: IconView,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<String>,
}

/// Serializable form of an image moniker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IconView {
    pub guid: Uuid,
    pub id: i32,
}

impl From<ImageMoniker> for IconView {
    fn from(moniker: ImageMoniker) -> Self {
        Self {
            guid: moniker.guid,
            id: moniker.id,
        }
    }
}
