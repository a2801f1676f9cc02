//! Builder for constructing SnapshotReadModel from domain snapshots

use super::report_metadata::ReportMetadata;
use super::snapshot_read_model::{
    DependencyNodeView, ProviderGroupView, SnapshotReadModel, TargetView,
};
use crate::snapshot_engine::domain::{
    DependenciesSnapshot, Dependency, DependencyViewModel, KnownMonikers,
    SubtreeProviderRegistry, TargetedDependenciesSnapshot,
};
use crate::snapshot_engine::policies::StringComparers;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Builds the read model of a snapshot
///
/// Group headers come from each provider type's subtree provider; provider
/// types without one get a plain folder node sorted after all others.
pub struct SnapshotReadModelBuilder<'a> {
    subtree_providers: &'a SubtreeProviderRegistry,
    include_hidden: bool,
}

impl<'a> SnapshotReadModelBuilder<'a> {
    pub fn new(subtree_providers: &'a SubtreeProviderRegistry) -> Self {
        Self {
            subtree_providers,
            include_hidden: false,
        }
    }

    /// Also show dependencies marked invisible
    pub fn include_hidden(mut self, include_hidden: bool) -> Self {
        self.include_hidden = include_hidden;
        self
    }

    pub fn build(
        &self,
        snapshot: &DependenciesSnapshot,
        metadata: ReportMetadata,
    ) -> SnapshotReadModel {
        let active = snapshot.active_target_framework();
        let targets = snapshot
            .dependencies_by_target_framework()
            .iter()
            .map(|(target_framework, targeted)| {
                let is_active = !active.is_empty() && target_framework == active;
                self.build_target(targeted, is_active)
            })
            .collect();

        SnapshotReadModel {
            metadata,
            project_path: snapshot.project_path().to_string(),
            active_target_framework: (!active.is_empty()).then(|| active.to_string()),
            has_visible_unresolved_dependency: snapshot.has_visible_unresolved_dependency(),
            targets,
        }
    }

    fn build_target(&self, targeted: &TargetedDependenciesSnapshot, is_active: bool) -> TargetView {
        let mut by_provider: BTreeMap<String, Vec<&Arc<Dependency>>> = BTreeMap::new();
        for dependency in targeted.dependencies() {
            if !dependency.visible() && !self.include_hidden {
                continue;
            }
            let key = StringComparers::DEPENDENCY_PROVIDER_TYPES
                .normalize(dependency.provider_type())
                .into_owned();
            by_provider.entry(key).or_default().push(dependency);
        }

        let mut groups: Vec<(i32, ProviderGroupView)> = by_provider
            .into_values()
            .filter_map(|dependencies| {
                let provider_type = dependencies.first()?.provider_type().to_string();
                Some(self.build_group(targeted, &provider_type, dependencies))
            })
            .collect();
        groups.sort_by(|(left_priority, left), (right_priority, right)| {
            left_priority
                .cmp(right_priority)
                .then_with(|| left.caption.cmp(&right.caption))
        });

        TargetView {
            target_framework: targeted.target_framework().to_string(),
            full_name: targeted.target_framework().full_name().to_string(),
            is_active,
            has_visible_unresolved_dependency: targeted.has_visible_unresolved_dependency(),
            groups: groups.into_iter().map(|(_, group)| group).collect(),
        }
    }

    fn build_group(
        &self,
        targeted: &TargetedDependenciesSnapshot,
        provider_type: &str,
        mut dependencies: Vec<&Arc<Dependency>>,
    ) -> (i32, ProviderGroupView) {
        let root = self
            .subtree_providers
            .get(provider_type)
            .map(|provider| provider.create_root_dependency_node())
            .unwrap_or_else(|| {
                DependencyViewModel::group(
                    provider_type,
                    KnownMonikers::FOLDER_CLOSED,
                    KnownMonikers::FOLDER_OPENED,
                    i32::MAX,
                )
            });

        dependencies.sort_by(|left, right| {
            left.priority()
                .cmp(&right.priority())
                .then_with(|| left.caption().to_lowercase().cmp(&right.caption().to_lowercase()))
        });

        let nodes = dependencies
            .into_iter()
            .map(|dependency| Self::build_node(targeted, dependency))
            .collect();

        let group = ProviderGroupView {
            provider_type: provider_type.to_string(),
            caption: root.caption,
            icon: root.icon.into(),
            has_unresolved: targeted.check_for_unresolved_dependencies(provider_type),
            dependencies: nodes,
        };
        (root.priority, group)
    }

    fn build_node(
        targeted: &TargetedDependenciesSnapshot,
        dependency: &Dependency,
    ) -> DependencyNodeView {
        let view = dependency.to_view_model(targeted);
        DependencyNodeView {
            id: dependency.id().to_string(),
            caption: view.caption,
            path: view.file_path,
            schema_name: view.schema_name,
            priority: view.priority,
            resolved: dependency.resolved(),
            appears_unresolved: view.appears_unresolved,
            implicit: view.implicit,
            visible: dependency.visible(),
            icon: view.icon.into(),
            properties: view.properties,
            children: dependency
                .dependency_ids()
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::read_models::IconView;
    use crate::adapters::outbound::providers::builtin_registry;
    use crate::snapshot_engine::domain::{
        DependenciesChanges, DependencyModel, SnapshotEnvironment, TargetFramework,
    };
    use crate::snapshot_engine::filters::FilterPipeline;

    fn metadata() -> ReportMetadata {
        ReportMetadata::new(
            "2026-01-15T10:30:00Z".to_string(),
            "depsnap".to_string(),
            "0.4.0".to_string(),
            "urn:uuid:00000000-0000-0000-0000-000000000000".to_string(),
        )
    }

    fn snapshot(added: Vec<DependencyModel>) -> Arc<DependenciesSnapshot> {
        let filters = FilterPipeline::standard();
        let providers = builtin_registry();
        let environment = SnapshotEnvironment::new(&filters, &providers);
        let net6 = TargetFramework::new("net6.0");
        DependenciesSnapshot::from_changes(
            "/src/App/App.csproj",
            &Arc::new(DependenciesSnapshot::empty("/src/App/App.csproj")),
            &net6,
            Some(&DependenciesChanges::new(added, Vec::new())),
            None,
            None,
            Some(&net6),
            &environment,
        )
        .unwrap()
    }

    #[test]
    fn test_groups_follow_provider_priority() {
        let snapshot = snapshot(vec![
            DependencyModel::package("Newtonsoft.Json", Some("13.0.3"), true),
            DependencyModel::sdk("Microsoft.NET.Sdk", true),
            DependencyModel::new("ComDependency", "stdole"),
        ]);
        let providers = builtin_registry();

        let model = SnapshotReadModelBuilder::new(&providers).build(&snapshot, metadata());

        assert_eq!(model.active_target_framework.as_deref(), Some("net6.0"));
        let target = &model.targets[0];
        assert!(target.is_active);
        let captions: Vec<&str> = target.groups.iter().map(|g| g.caption.as_str()).collect();
        assert_eq!(captions, vec!["SDK", "Packages", "ComDependency"]);
        assert_eq!(target.groups[1].dependencies[0].caption, "Newtonsoft.Json (13.0.3)");
    }

    #[test]
    fn test_hidden_dependencies_are_excluded_by_default() {
        let snapshot = snapshot(vec![
            DependencyModel::package("Visible", None, true),
            DependencyModel::package("Hidden", None, true).with_visible(false),
        ]);
        let providers = builtin_registry();

        let model = SnapshotReadModelBuilder::new(&providers).build(&snapshot, metadata());
        assert_eq!(model.targets[0].groups[0].dependencies.len(), 1);

        let model = SnapshotReadModelBuilder::new(&providers)
            .include_hidden(true)
            .build(&snapshot, metadata());
        assert_eq!(model.targets[0].groups[0].dependencies.len(), 2);
    }

    #[test]
    fn test_unresolved_descendant_marks_parent() {
        let snapshot = snapshot(vec![
            DependencyModel::package("Parent", None, true).with_dependency_ids(["Child"]),
            DependencyModel::package("Child", None, false),
        ]);
        let providers = builtin_registry();

        let model = SnapshotReadModelBuilder::new(&providers).build(&snapshot, metadata());
        let group = &model.targets[0].groups[0];

        assert!(group.has_unresolved);
        assert!(model.has_visible_unresolved_dependency);
        let parent = group.dependencies.iter().find(|d| d.caption == "Parent").unwrap();
        assert!(parent.resolved);
        assert!(parent.appears_unresolved);
        assert_eq!(parent.icon, IconView::from(KnownMonikers::NUGET_WARNING));
        assert_eq!(parent.children.len(), 1);
    }

    #[test]
    fn test_dependencies_sorted_by_priority_then_caption() {
        let snapshot = snapshot(vec![
            DependencyModel::package("beta", None, true),
            DependencyModel::package("Alpha", None, false),
            DependencyModel::package("alpha2", None, true),
        ]);
        let providers = builtin_registry();

        let model = SnapshotReadModelBuilder::new(&providers).build(&snapshot, metadata());
        let captions: Vec<&str> = model.targets[0].groups[0]
            .dependencies
            .iter()
            .map(|d| d.caption.as_str())
            .collect();
        assert_eq!(captions, vec!["alpha2", "beta", "Alpha"]);
    }
}
