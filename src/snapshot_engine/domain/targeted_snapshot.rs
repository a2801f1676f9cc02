use super::catalog::ProjectCatalogSnapshot;
use super::changes::DependenciesChanges;
use super::dependency::Dependency;
use super::dependency_id::{get_id, DependencyId};
use super::environment::SnapshotEnvironment;
use super::target_framework::TargetFramework;
use crate::shared::{Result, SnapshotError};
use crate::snapshot_engine::filters::DependencyWorld;
use crate::snapshot_engine::policies::StringComparers;
use crate::snapshot_engine::services::UnresolvedDescendantSearch;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Immutable snapshot of the dependencies of one target framework
///
/// Everything derived from the dependency list (the id index, the
/// visible-unresolved flag and the set of dependencies with an unresolved
/// descendant) is computed once at construction.
#[derive(Debug)]
pub struct TargetedDependenciesSnapshot {
    project_path: String,
    target_framework: TargetFramework,
    catalogs: Option<Arc<ProjectCatalogSnapshot>>,
    dependencies: Vec<Arc<Dependency>>,
    by_id: HashMap<DependencyId, Arc<Dependency>>,
    has_visible_unresolved_dependency: bool,
    unresolved_descendants: HashSet<DependencyId>,
}

impl TargetedDependenciesSnapshot {
    /// Creates a snapshot from an explicit dependency list
    ///
    /// # Errors
    /// Returns `SnapshotError::DuplicateDependency` if two dependencies share an id
    pub fn new(
        project_path: impl Into<String>,
        target_framework: TargetFramework,
        catalogs: Option<Arc<ProjectCatalogSnapshot>>,
        dependencies: Vec<Arc<Dependency>>,
    ) -> Result<Self> {
        let mut seen = HashSet::with_capacity(dependencies.len());
        for dependency in &dependencies {
            if !seen.insert(dependency.id()) {
                return Err(SnapshotError::DuplicateDependency {
                    id: dependency.id().to_string(),
                    target_framework: target_framework.to_string(),
                }
                .into());
            }
        }
        Ok(Self::from_unique(
            project_path.into(),
            target_framework,
            catalogs,
            dependencies,
        ))
    }

    /// Snapshot without dependencies
    pub fn create_empty(
        project_path: impl Into<String>,
        target_framework: TargetFramework,
        catalogs: Option<Arc<ProjectCatalogSnapshot>>,
    ) -> Self {
        Self::from_unique(project_path.into(), target_framework, catalogs, Vec::new())
    }

    fn from_unique(
        project_path: String,
        target_framework: TargetFramework,
        catalogs: Option<Arc<ProjectCatalogSnapshot>>,
        dependencies: Vec<Arc<Dependency>>,
    ) -> Self {
        let by_id: HashMap<DependencyId, Arc<Dependency>> = dependencies
            .iter()
            .map(|d| (d.id().clone(), Arc::clone(d)))
            .collect();
        let has_visible_unresolved_dependency =
            dependencies.iter().any(|d| d.visible() && !d.resolved());
        let unresolved_descendants = UnresolvedDescendantSearch::new(&by_id).run_all();

        Self {
            project_path,
            target_framework,
            catalogs,
            dependencies,
            by_id,
            has_visible_unresolved_dependency,
            unresolved_descendants,
        }
    }

    /// Applies one batch of changes to `previous`
    ///
    /// Removals run before additions, each in input order and each through
    /// the filter pipeline. Removing an unknown id is ignored; adding a known
    /// id replaces the entry. Models that are not top-level are skipped.
    ///
    /// Returns `previous` itself (pointer-equal) when neither the
    /// dependencies, the project path nor the catalogs changed.
    pub fn from_changes(
        project_path: &str,
        previous: &Arc<Self>,
        changes: Option<&DependenciesChanges>,
        catalogs: Option<Arc<ProjectCatalogSnapshot>>,
        environment: &SnapshotEnvironment<'_>,
    ) -> Arc<Self> {
        let target_framework = &previous.target_framework;
        let scope = environment.filter_scope(target_framework);
        let mut world: DependencyWorld = previous
            .dependencies
            .iter()
            .map(|d| (d.id().clone(), Arc::clone(d)))
            .collect();
        let mut changed = false;

        if let Some(changes) = changes {
            for removed in changes.removed() {
                let id = get_id(target_framework, &removed.provider_type, &removed.id);
                let Some(existing) = world.get(&id).cloned() else {
                    tracing::trace!(id = %id, "Ignoring removal of unknown dependency");
                    continue;
                };

                let run = environment.filters.run_remove(scope, &mut world, &existing);
                changed |= run.world_edited;
                if run.allowed {
                    world.remove(&id);
                    changed = true;
                }
            }

            for added in changes.added() {
                if !added.top_level {
                    continue;
                }

                let candidate = Dependency::from_model(project_path, target_framework, added);
                let run = environment.filters.run_add(scope, &mut world, candidate);
                changed |= run.world_edited;
                if let Some(accepted) = run.accepted {
                    world.insert(accepted.id().clone(), Arc::new(accepted));
                    changed = true;
                }
            }
        }

        if !StringComparers::PATHS.equals(&previous.project_path, project_path)
            || previous.catalogs.as_deref() != catalogs.as_deref()
        {
            changed = true;
        }

        if !changed {
            return Arc::clone(previous);
        }

        tracing::debug!(
            target_framework = %target_framework,
            dependencies = world.len(),
            "Built new targeted snapshot"
        );
        Arc::new(Self::from_unique(
            project_path.to_string(),
            target_framework.clone(),
            catalogs,
            world.into_values().collect(),
        ))
    }

    pub fn project_path(&self) -> &str {
        &self.project_path
    }

    pub fn target_framework(&self) -> &TargetFramework {
        &self.target_framework
    }

    pub fn catalogs(&self) -> Option<&Arc<ProjectCatalogSnapshot>> {
        self.catalogs.as_ref()
    }

    pub fn dependencies(&self) -> &[Arc<Dependency>] {
        &self.dependencies
    }

    pub fn get(&self, id: &DependencyId) -> Option<&Arc<Dependency>> {
        self.by_id.get(id)
    }

    pub fn len(&self) -> usize {
        self.dependencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }

    /// True if any visible dependency is unresolved
    pub fn has_visible_unresolved_dependency(&self) -> bool {
        self.has_visible_unresolved_dependency
    }

    /// True if a visible dependency of `provider_type` is unresolved
    pub fn check_for_unresolved_dependencies(&self, provider_type: &str) -> bool {
        if !self.has_visible_unresolved_dependency {
            return false;
        }
        self.dependencies
            .iter()
            .any(|d| d.visible() && !d.resolved() && d.has_provider_type(provider_type))
    }

    /// True if some visible descendant of `dependency` is unresolved
    pub fn should_appear_unresolved(&self, dependency: &Dependency) -> bool {
        self.unresolved_descendants.contains(dependency.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot_engine::domain::{DependencyModel, SubtreeProviderRegistry};
    use crate::snapshot_engine::filters::FilterPipeline;

    const PROJECT: &str = "/src/App/App.csproj";

    fn net6() -> TargetFramework {
        TargetFramework::new("net6.0")
    }

    fn empty() -> Arc<TargetedDependenciesSnapshot> {
        Arc::new(TargetedDependenciesSnapshot::create_empty(PROJECT, net6(), None))
    }

    fn apply(
        previous: &Arc<TargetedDependenciesSnapshot>,
        added: Vec<DependencyModel>,
        removed: Vec<DependencyModel>,
    ) -> Arc<TargetedDependenciesSnapshot> {
        let filters = FilterPipeline::standard();
        let providers = SubtreeProviderRegistry::new();
        let environment = SnapshotEnvironment::new(&filters, &providers);
        let changes = DependenciesChanges::new(added, removed);
        TargetedDependenciesSnapshot::from_changes(
            PROJECT,
            previous,
            Some(&changes),
            None,
            &environment,
        )
    }

    fn captions(snapshot: &TargetedDependenciesSnapshot) -> Vec<&str> {
        snapshot.dependencies().iter().map(|d| d.caption()).collect()
    }

    #[test]
    fn test_new_rejects_duplicate_ids() {
        let tf = net6();
        let a = Arc::new(Dependency::from_model(
            PROJECT,
            &tf,
            &DependencyModel::package("A", None, true),
        ));
        let err = TargetedDependenciesSnapshot::new(PROJECT, tf, None, vec![Arc::clone(&a), a])
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SnapshotError>(),
            Some(SnapshotError::DuplicateDependency { .. })
        ));
    }

    #[test]
    fn test_no_changes_returns_same_instance() {
        let previous = apply(&empty(), vec![DependencyModel::package("A", None, true)], vec![]);
        let filters = FilterPipeline::standard();
        let providers = SubtreeProviderRegistry::new();
        let environment = SnapshotEnvironment::new(&filters, &providers);

        let next = TargetedDependenciesSnapshot::from_changes(
            PROJECT,
            &previous,
            None,
            None,
            &environment,
        );
        assert!(Arc::ptr_eq(&previous, &next));
    }

    #[test]
    fn test_removing_unknown_id_is_a_no_op() {
        let previous = apply(&empty(), vec![DependencyModel::package("A", None, true)], vec![]);
        let next = apply(&previous, vec![], vec![DependencyModel::package("Missing", None, true)]);
        assert!(Arc::ptr_eq(&previous, &next));
    }

    #[test]
    fn test_project_path_change_builds_new_snapshot() {
        let previous = empty();
        let filters = FilterPipeline::standard();
        let providers = SubtreeProviderRegistry::new();
        let environment = SnapshotEnvironment::new(&filters, &providers);

        let next = TargetedDependenciesSnapshot::from_changes(
            "/src/App/app.csproj",
            &previous,
            None,
            None,
            &environment,
        );

        assert!(!Arc::ptr_eq(&previous, &next));
        assert_eq!(next.project_path(), "/src/App/app.csproj");
    }

    #[test]
    fn test_catalog_change_builds_new_snapshot() {
        let catalogs =
            Arc::new(ProjectCatalogSnapshot::new().with_rule("PackageReference", ["Version"]));
        let previous = Arc::new(TargetedDependenciesSnapshot::create_empty(
            PROJECT,
            net6(),
            Some(Arc::clone(&catalogs)),
        ));
        let filters = FilterPipeline::standard();
        let providers = SubtreeProviderRegistry::new();
        let environment = SnapshotEnvironment::new(&filters, &providers);

        let equal = Some(Arc::new((*catalogs).clone()));
        let same = TargetedDependenciesSnapshot::from_changes(
            PROJECT,
            &previous,
            None,
            equal,
            &environment,
        );
        assert!(Arc::ptr_eq(&previous, &same));

        let different = TargetedDependenciesSnapshot::from_changes(
            PROJECT,
            &previous,
            None,
            None,
            &environment,
        );
        assert!(!Arc::ptr_eq(&previous, &different));
    }

    #[test]
    fn test_non_top_level_additions_are_skipped() {
        let next = apply(
            &empty(),
            vec![DependencyModel::package("A", None, true).with_top_level(false)],
            vec![],
        );
        assert!(next.is_empty());
    }

    #[test]
    fn test_readding_replaces_entry() {
        let first = apply(&empty(), vec![DependencyModel::package("A", Some("1.0"), true)], vec![]);
        let second = apply(&first, vec![DependencyModel::package("A", Some("2.0"), true)], vec![]);

        assert_eq!(second.len(), 1);
        assert_eq!(captions(&second), vec!["A (2.0)"]);
    }

    #[test]
    fn test_readding_same_models_keeps_ids() {
        let models = vec![
            DependencyModel::package("A", None, true),
            DependencyModel::sdk("S", true),
        ];
        let first = apply(&empty(), models.clone(), vec![]);
        let second = apply(&first, models, vec![]);

        let ids = |s: &TargetedDependenciesSnapshot| {
            s.dependencies()
                .iter()
                .map(|d| d.id().clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(ids(&first), ids(&second));
    }

    #[test]
    fn test_unresolved_guard_keeps_existing_entry() {
        let previous = apply(
            &empty(),
            vec![DependencyModel::package("A", Some("1.0"), true)],
            vec![],
        );
        let next = apply(&previous, vec![DependencyModel::package("A", None, false)], vec![]);

        assert!(Arc::ptr_eq(&previous, &next));
        assert!(next.dependencies()[0].resolved());
    }

    #[test]
    fn test_duplicate_captions_are_aliased() {
        let model = |id: &str| {
            DependencyModel::new("NuGetDependency", id)
                .with_caption("MyCaption")
                .with_original_item_spec(format!("{}ItemSpec", id))
        };
        let first = apply(&empty(), vec![model("mydependency1")], vec![]);
        let second = apply(&first, vec![model("mydependency2")], vec![]);

        assert_eq!(
            captions(&second),
            vec!["MyCaption (mydependency1ItemSpec)", "MyCaption (mydependency2ItemSpec)"]
        );
    }

    #[test]
    fn test_sdk_package_cross_link() {
        let tf = net6();
        let first = apply(&empty(), vec![DependencyModel::sdk("Sdk.A", false)], vec![]);
        let second = apply(
            &first,
            vec![DependencyModel::package("Sdk.A", None, true).with_dependency_ids(["a", "b"])],
            vec![],
        );

        let sdk = second.get(&get_id(&tf, "SdkDependency", "Sdk.A")).unwrap();
        assert!(sdk.resolved());
        assert_eq!(sdk.schema_name(), "ResolvedSdkReference");
        assert_eq!(
            sdk.dependency_ids(),
            &[get_id(&tf, "NuGetDependency", "a"), get_id(&tf, "NuGetDependency", "b")]
        );

        let third = apply(&second, vec![], vec![DependencyModel::package("Sdk.A", None, true)]);
        let sdk = third.get(&get_id(&tf, "SdkDependency", "Sdk.A")).unwrap();
        assert!(!sdk.resolved());
        assert!(sdk.dependency_ids().is_empty());
        assert_eq!(third.len(), 1);
    }

    #[test]
    fn test_dependencies_are_ordered_by_id() {
        let next = apply(
            &empty(),
            vec![
                DependencyModel::package("Zeta", None, true),
                DependencyModel::package("alpha", None, true),
            ],
            vec![],
        );
        assert_eq!(captions(&next), vec!["alpha", "Zeta"]);
    }

    #[test]
    fn test_unresolved_flags() {
        let next = apply(
            &empty(),
            vec![
                DependencyModel::package("Parent", None, true).with_dependency_ids(["Child"]),
                DependencyModel::package("Child", None, false),
                DependencyModel::sdk("Hidden", false).with_visible(false),
            ],
            vec![],
        );

        assert!(next.has_visible_unresolved_dependency());
        assert!(next.check_for_unresolved_dependencies("nugetdependency"));
        assert!(!next.check_for_unresolved_dependencies("SdkDependency"));

        let tf = net6();
        let parent = next.get(&get_id(&tf, "NuGetDependency", "Parent")).unwrap();
        let child = next.get(&get_id(&tf, "NuGetDependency", "Child")).unwrap();
        assert!(next.should_appear_unresolved(parent));
        assert!(!next.should_appear_unresolved(child));
        assert!(parent.to_view_model(&next).appears_unresolved);
    }

    #[test]
    fn test_empty_snapshot_has_no_unresolved() {
        let snapshot = empty();
        assert!(!snapshot.has_visible_unresolved_dependency());
        assert!(!snapshot.check_for_unresolved_dependencies("NuGetDependency"));
    }
}
