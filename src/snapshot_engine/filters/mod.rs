//! Snapshot filters run for every dependency added to or removed from a
//! targeted snapshot
//!
//! A filter never mutates shared state. It returns a [`FilterOutcome`]: its
//! decision about the candidate plus a list of [`WorldEdit`]s for other
//! entries of the working set. The [`FilterPipeline`] applies those edits
//! right after each filter, so later filters observe them.

mod deduplicate_captions;
mod implicit_top_level;
mod sdk_package_link;
mod unresolved_guard;

pub use deduplicate_captions::DeduplicateCaptionsFilter;
pub use implicit_top_level::ImplicitTopLevelFilter;
pub use sdk_package_link::SdkPackageLinkFilter;
pub use unresolved_guard::UnresolvedGuardFilter;

use crate::shared::{Result, SnapshotError};
use crate::snapshot_engine::domain::{
    Dependency, DependencyId, SubtreeProviderRegistry, TargetFramework,
};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::sync::Arc;

/// Working set of a snapshot build, keyed by dependency id
pub type DependencyWorld = BTreeMap<DependencyId, Arc<Dependency>>;

/// What happens to a dependency about to be added
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddDecision {
    /// Add this dependency, possibly a modified copy of the candidate
    Accept(Dependency),
    Reject,
}

/// What happens to a dependency about to be removed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveDecision {
    Allow,
    Veto,
}

/// A change a filter makes to some other entry of the working set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorldEdit {
    AddOrUpdate(Dependency),
    Remove(DependencyId),
}

/// Decision of one filter plus the edits it requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOutcome<D> {
    pub decision: D,
    pub edits: Vec<WorldEdit>,
}

impl<D> FilterOutcome<D> {
    pub fn with_edit(mut self, edit: WorldEdit) -> Self {
        self.edits.push(edit);
        self
    }
}

impl FilterOutcome<AddDecision> {
    pub fn accept(dependency: Dependency) -> Self {
        Self {
            decision: AddDecision::Accept(dependency),
            edits: Vec::new(),
        }
    }

    pub fn reject() -> Self {
        Self {
            decision: AddDecision::Reject,
            edits: Vec::new(),
        }
    }
}

impl FilterOutcome<RemoveDecision> {
    pub fn allow() -> Self {
        Self {
            decision: RemoveDecision::Allow,
            edits: Vec::new(),
        }
    }

    pub fn veto() -> Self {
        Self {
            decision: RemoveDecision::Veto,
            edits: Vec::new(),
        }
    }
}

/// Inputs of a snapshot build that stay fixed while filters run
#[derive(Debug, Clone, Copy)]
pub struct FilterScope<'a> {
    pub target_framework: &'a TargetFramework,
    pub subtree_providers: &'a SubtreeProviderRegistry,
    /// Item specs declared in the project file, when known
    pub project_item_specs: Option<&'a HashSet<String>>,
}

/// Read-only view handed to a filter
#[derive(Debug, Clone, Copy)]
pub struct FilterContext<'a> {
    scope: FilterScope<'a>,
    world: &'a DependencyWorld,
}

impl<'a> FilterContext<'a> {
    pub fn new(scope: FilterScope<'a>, world: &'a DependencyWorld) -> Self {
        Self { scope, world }
    }

    pub fn target_framework(&self) -> &'a TargetFramework {
        self.scope.target_framework
    }

    pub fn world(&self) -> &'a DependencyWorld {
        self.world
    }

    pub fn get(&self, id: &DependencyId) -> Option<&'a Arc<Dependency>> {
        self.world.get(id)
    }

    pub fn contains(&self, id: &DependencyId) -> bool {
        self.world.contains_key(id)
    }

    pub fn subtree_providers(&self) -> &'a SubtreeProviderRegistry {
        self.scope.subtree_providers
    }

    pub fn project_item_specs(&self) -> Option<&'a HashSet<String>> {
        self.scope.project_item_specs
    }
}

/// Hook invoked before a dependency enters or leaves a snapshot
pub trait DependenciesSnapshotFilter: Send + Sync {
    /// Stable name used to disable the filter from configuration
    fn name(&self) -> &'static str;

    /// Filters run in ascending order
    fn order(&self) -> i32;

    fn before_add(
        &self,
        _context: &FilterContext<'_>,
        candidate: Dependency,
    ) -> FilterOutcome<AddDecision> {
        FilterOutcome::accept(candidate)
    }

    fn before_remove(
        &self,
        _context: &FilterContext<'_>,
        _dependency: &Arc<Dependency>,
    ) -> FilterOutcome<RemoveDecision> {
        FilterOutcome::allow()
    }
}

/// Result of running the add hooks for one candidate
#[derive(Debug)]
pub struct AddRun {
    /// The dependency to insert, or `None` if a filter rejected the candidate
    pub accepted: Option<Dependency>,
    /// True if any filter edited the working set
    pub world_edited: bool,
}

/// Result of running the remove hooks for one dependency
#[derive(Debug)]
pub struct RemoveRun {
    pub allowed: bool,
    pub world_edited: bool,
}

/// Filters sorted by ascending order
#[derive(Clone)]
pub struct FilterPipeline {
    filters: Vec<Arc<dyn DependenciesSnapshotFilter>>,
}

impl FilterPipeline {
    /// Names of the built-in filters, in run order
    pub const STANDARD_FILTER_NAMES: [&'static str; 4] = [
        UnresolvedGuardFilter::NAME,
        DeduplicateCaptionsFilter::NAME,
        SdkPackageLinkFilter::NAME,
        ImplicitTopLevelFilter::NAME,
    ];

    /// Creates a pipeline; the sort is stable, so filters sharing an order
    /// keep their relative position
    pub fn new(mut filters: Vec<Arc<dyn DependenciesSnapshotFilter>>) -> Self {
        filters.sort_by_key(|filter| filter.order());
        Self { filters }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// The built-in filters
    pub fn standard() -> Self {
        Self::new(vec![
            Arc::new(UnresolvedGuardFilter),
            Arc::new(DeduplicateCaptionsFilter),
            Arc::new(SdkPackageLinkFilter),
            Arc::new(ImplicitTopLevelFilter),
        ])
    }

    /// Returns a copy of this pipeline without the named filters
    ///
    /// # Errors
    /// Returns `SnapshotError::UnknownFilter` if a name matches no filter
    pub fn without<S: AsRef<str>>(&self, names: &[S]) -> Result<Self> {
        for name in names {
            let name = name.as_ref();
            if !self.filters.iter().any(|f| f.name() == name) {
                return Err(SnapshotError::UnknownFilter {
                    name: name.to_string(),
                    known: self.names().join(", "),
                }
                .into());
            }
        }

        let filters = self
            .filters
            .iter()
            .filter(|f| !names.iter().any(|n| n.as_ref() == f.name()))
            .cloned()
            .collect();
        Ok(Self { filters })
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Runs the add hooks for `candidate`, applying each filter's edits to
    /// `world` before the next filter runs
    ///
    /// A rejection stops the pipeline. Edits made up to that point stay.
    pub fn run_add(
        &self,
        scope: FilterScope<'_>,
        world: &mut DependencyWorld,
        candidate: Dependency,
    ) -> AddRun {
        let mut candidate = candidate;
        let mut world_edited = false;

        for filter in &self.filters {
            let outcome = filter.before_add(&FilterContext::new(scope, world), candidate);
            world_edited |= apply_edits(world, outcome.edits);

            match outcome.decision {
                AddDecision::Accept(dependency) => candidate = dependency,
                AddDecision::Reject => {
                    tracing::debug!(filter = filter.name(), "Dependency rejected");
                    return AddRun {
                        accepted: None,
                        world_edited,
                    };
                }
            }
        }

        AddRun {
            accepted: Some(candidate),
            world_edited,
        }
    }

    /// Runs the remove hooks for `dependency`; a veto stops the pipeline
    pub fn run_remove(
        &self,
        scope: FilterScope<'_>,
        world: &mut DependencyWorld,
        dependency: &Arc<Dependency>,
    ) -> RemoveRun {
        let mut world_edited = false;

        for filter in &self.filters {
            let outcome = filter.before_remove(&FilterContext::new(scope, world), dependency);
            world_edited |= apply_edits(world, outcome.edits);

            if outcome.decision == RemoveDecision::Veto {
                tracing::debug!(filter = filter.name(), id = %dependency.id(), "Removal vetoed");
                return RemoveRun {
                    allowed: false,
                    world_edited,
                };
            }
        }

        RemoveRun {
            allowed: true,
            world_edited,
        }
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for FilterPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

fn apply_edits(world: &mut DependencyWorld, edits: Vec<WorldEdit>) -> bool {
    let edited = !edits.is_empty();
    for edit in edits {
        match edit {
            WorldEdit::AddOrUpdate(dependency) => {
                tracing::trace!(id = %dependency.id(), "Filter updated dependency");
                world.insert(dependency.id().clone(), Arc::new(dependency));
            }
            WorldEdit::Remove(id) => {
                tracing::trace!(id = %id, "Filter removed dependency");
                world.remove(&id);
            }
        }
    }
    edited
}
