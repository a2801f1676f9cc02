use super::catalog::ProjectCatalogSnapshot;
use super::changes::DependenciesChanges;
use super::dependency::Dependency;
use super::dependency_id::DependencyId;
use super::environment::SnapshotEnvironment;
use super::target_framework::TargetFramework;
use super::targeted_snapshot::TargetedDependenciesSnapshot;
use crate::shared::{Result, SnapshotError};
use crate::snapshot_engine::policies::StringComparers;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Immutable snapshot of a project's dependencies across all target frameworks
#[derive(Debug)]
pub struct DependenciesSnapshot {
    project_path: String,
    active_target_framework: TargetFramework,
    dependencies_by_target_framework: BTreeMap<TargetFramework, Arc<TargetedDependenciesSnapshot>>,
}

impl DependenciesSnapshot {
    /// # Errors
    /// Returns `SnapshotError::ActiveTargetFrameworkMissing` if
    /// `active_target_framework` is not empty and has no entry in
    /// `dependencies_by_target_framework`
    pub fn new(
        project_path: impl Into<String>,
        active_target_framework: TargetFramework,
        dependencies_by_target_framework: BTreeMap<
            TargetFramework,
            Arc<TargetedDependenciesSnapshot>,
        >,
    ) -> Result<Self> {
        if !active_target_framework.is_empty()
            && !dependencies_by_target_framework.contains_key(&active_target_framework)
        {
            let known: Vec<String> = dependencies_by_target_framework
                .keys()
                .map(ToString::to_string)
                .collect();
            return Err(SnapshotError::ActiveTargetFrameworkMissing {
                target_framework: active_target_framework.to_string(),
                known: if known.is_empty() {
                    "(none)".to_string()
                } else {
                    known.join(", ")
                },
            }
            .into());
        }

        Ok(Self {
            project_path: project_path.into(),
            active_target_framework,
            dependencies_by_target_framework,
        })
    }

    /// Snapshot with no target frameworks and no active target
    pub fn empty(project_path: impl Into<String>) -> Self {
        Self {
            project_path: project_path.into(),
            active_target_framework: TargetFramework::empty(),
            dependencies_by_target_framework: BTreeMap::new(),
        }
    }

    /// Folds one batch of changes for `changed_target_framework` into `previous`
    ///
    /// `target_frameworks`, when supplied, is the complete set of configured
    /// targets: missing targets get empty snapshots and targets outside the
    /// set are dropped. `active_target_framework` defaults to the previous
    /// active target.
    ///
    /// Returns `previous` itself (pointer-equal) when nothing changed.
    ///
    /// # Errors
    /// Returns `SnapshotError::ActiveTargetFrameworkMissing` if the resulting
    /// active target has no snapshot
    #[allow(clippy::too_many_arguments)]
    pub fn from_changes(
        project_path: &str,
        previous: &Arc<Self>,
        changed_target_framework: &TargetFramework,
        changes: Option<&DependenciesChanges>,
        catalogs: Option<Arc<ProjectCatalogSnapshot>>,
        target_frameworks: Option<&[TargetFramework]>,
        active_target_framework: Option<&TargetFramework>,
        environment: &SnapshotEnvironment<'_>,
    ) -> Result<Arc<Self>> {
        let mut by_target = previous.dependencies_by_target_framework.clone();

        let previous_targeted = match by_target.get(changed_target_framework) {
            Some(existing) => Arc::clone(existing),
            None => {
                // a target seen for the first time always gets an entry
                let created = Arc::new(TargetedDependenciesSnapshot::create_empty(
                    project_path,
                    changed_target_framework.clone(),
                    catalogs.clone(),
                ));
                by_target.insert(changed_target_framework.clone(), Arc::clone(&created));
                created
            }
        };

        let targeted = TargetedDependenciesSnapshot::from_changes(
            project_path,
            &previous_targeted,
            changes,
            catalogs,
            environment,
        );
        if !Arc::ptr_eq(&previous_targeted, &targeted) {
            by_target.insert(changed_target_framework.clone(), targeted);
        }

        if let Some(target_frameworks) = target_frameworks {
            sync_target_frameworks(&mut by_target, target_frameworks, project_path);
        }

        let changed = targets_changed(&previous.dependencies_by_target_framework, &by_target);
        Self::finish(project_path, previous, by_target, active_target_framework, changed)
    }

    /// Reconciles `previous` with a new target-framework set without applying changes
    ///
    /// # Errors
    /// Returns `SnapshotError::ActiveTargetFrameworkMissing` if the resulting
    /// active target has no snapshot
    pub fn set_targets(
        previous: &Arc<Self>,
        target_frameworks: &[TargetFramework],
        active_target_framework: Option<&TargetFramework>,
    ) -> Result<Arc<Self>> {
        let mut by_target = previous.dependencies_by_target_framework.clone();
        sync_target_frameworks(&mut by_target, target_frameworks, &previous.project_path);
        let changed = targets_changed(&previous.dependencies_by_target_framework, &by_target);
        Self::finish(
            &previous.project_path,
            previous,
            by_target,
            active_target_framework,
            changed,
        )
    }

    fn finish(
        project_path: &str,
        previous: &Arc<Self>,
        by_target: BTreeMap<TargetFramework, Arc<TargetedDependenciesSnapshot>>,
        active_target_framework: Option<&TargetFramework>,
        changed: bool,
    ) -> Result<Arc<Self>> {
        let active = active_target_framework
            .cloned()
            .unwrap_or_else(|| previous.active_target_framework.clone());
        let active_changed = active != previous.active_target_framework
            || active.short_name() != previous.active_target_framework.short_name();
        let path_changed = !StringComparers::PATHS.equals(&previous.project_path, project_path);

        if !changed && !active_changed && !path_changed {
            return Ok(Arc::clone(previous));
        }

        tracing::debug!(
            active_target_framework = %active,
            targets = by_target.len(),
            "Built new dependencies snapshot"
        );
        Ok(Arc::new(Self::new(project_path, active, by_target)?))
    }

    pub fn project_path(&self) -> &str {
        &self.project_path
    }

    pub fn active_target_framework(&self) -> &TargetFramework {
        &self.active_target_framework
    }

    pub fn dependencies_by_target_framework(
        &self,
    ) -> &BTreeMap<TargetFramework, Arc<TargetedDependenciesSnapshot>> {
        &self.dependencies_by_target_framework
    }

    /// Snapshot of the active target framework, if there is one
    pub fn active_target(&self) -> Option<&Arc<TargetedDependenciesSnapshot>> {
        self.dependencies_by_target_framework
            .get(&self.active_target_framework)
    }

    pub fn target(
        &self,
        target_framework: &TargetFramework,
    ) -> Option<&Arc<TargetedDependenciesSnapshot>> {
        self.dependencies_by_target_framework.get(target_framework)
    }

    /// Looks `id` up in the snapshot of the target framework it belongs to
    pub fn find_dependency(&self, id: &DependencyId) -> Option<&Arc<Dependency>> {
        self.dependencies_by_target_framework
            .iter()
            .filter(|(target_framework, _)| id.is_for(target_framework))
            .find_map(|(_, targeted)| targeted.get(id))
    }

    /// True if any target framework has a visible unresolved dependency
    pub fn has_visible_unresolved_dependency(&self) -> bool {
        self.dependencies_by_target_framework
            .values()
            .any(|targeted| targeted.has_visible_unresolved_dependency())
    }
}

/// Makes the keys of `by_target` equal `target_frameworks`
///
/// Targets added here start empty and without catalogs.
fn sync_target_frameworks(
    by_target: &mut BTreeMap<TargetFramework, Arc<TargetedDependenciesSnapshot>>,
    target_frameworks: &[TargetFramework],
    project_path: &str,
) {
    for target_framework in target_frameworks {
        if !by_target.contains_key(target_framework) {
            by_target.insert(
                target_framework.clone(),
                Arc::new(TargetedDependenciesSnapshot::create_empty(
                    project_path,
                    target_framework.clone(),
                    None,
                )),
            );
        }
    }

    let before = by_target.len();
    by_target.retain(|target_framework, _| target_frameworks.contains(target_framework));
    if by_target.len() != before {
        tracing::debug!(
            dropped = before - by_target.len(),
            "Dropped stale target frameworks"
        );
    }
}

/// True if the key set differs or any retained target snapshot is a new instance
fn targets_changed(
    previous: &BTreeMap<TargetFramework, Arc<TargetedDependenciesSnapshot>>,
    current: &BTreeMap<TargetFramework, Arc<TargetedDependenciesSnapshot>>,
) -> bool {
    previous.len() != current.len()
        || current.iter().any(|(target_framework, targeted)| {
            previous
                .get(target_framework)
                .map_or(true, |existing| !Arc::ptr_eq(existing, targeted))
        })
}
