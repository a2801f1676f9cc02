use super::subtree_provider::SubtreeProviderRegistry;
use super::target_framework::TargetFramework;
use crate::snapshot_engine::filters::{FilterPipeline, FilterScope};
use std::collections::HashSet;

/// Collaborators a snapshot build consults besides its inputs
#[derive(Debug, Clone, Copy)]
pub struct SnapshotEnvironment<'a> {
    pub filters: &'a FilterPipeline,
    pub subtree_providers: &'a SubtreeProviderRegistry,
    /// Item specs declared in the project file; `None` when not yet evaluated
    pub project_item_specs: Option<&'a HashSet<String>>,
}

impl<'a> SnapshotEnvironment<'a> {
    pub fn new(
        filters: &'a FilterPipeline,
        subtree_providers: &'a SubtreeProviderRegistry,
    ) -> Self {
        Self {
            filters,
            subtree_providers,
            project_item_specs: None,
        }
    }

    pub fn with_project_item_specs(
        mut self,
        project_item_specs: Option<&'a HashSet<String>>,
    ) -> Self {
        self.project_item_specs = project_item_specs;
        self
    }

    pub(crate) fn filter_scope<'s>(&self, target_framework: &'s TargetFramework) -> FilterScope<'s>
    where
        'a: 's,
    {
        FilterScope {
            target_framework,
            subtree_providers: self.subtree_providers,
            project_item_specs: self.project_item_specs,
        }
    }
}
