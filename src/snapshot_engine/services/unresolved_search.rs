use crate::snapshot_engine::domain::{Dependency, DependencyId};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Maximum child depth followed before a branch is treated as resolved
pub const MAX_RECURSION_DEPTH: usize = 100;

/// Answers "is any visible descendant of this dependency unresolved?"
///
/// Results are memoized per dependency id, so diamond-shaped graphs are
/// walked once. Child lists are cached as soon as a dependency is entered;
/// a dependency whose children are cached but that has no result yet is
/// on the current path and counts as resolved. This ends cycles but may
/// under-report unresolved status inside them.
pub struct UnresolvedDescendantSearch<'a> {
    dependencies: &'a HashMap<DependencyId, Arc<Dependency>>,
    memo: HashMap<DependencyId, bool>,
    children: HashMap<DependencyId, Vec<Arc<Dependency>>>,
}

impl<'a> UnresolvedDescendantSearch<'a> {
    pub fn new(dependencies: &'a HashMap<DependencyId, Arc<Dependency>>) -> Self {
        Self {
            dependencies,
            memo: HashMap::new(),
            children: HashMap::new(),
        }
    }

    /// Runs the search for every dependency and returns the ids that have an
    /// unresolved visible descendant
    pub fn run_all(mut self) -> HashSet<DependencyId> {
        let mut ids: Vec<&DependencyId> = self.dependencies.keys().collect();
        ids.sort();
        for id in ids {
            if let Some(dependency) = self.dependencies.get(id) {
                self.has_unresolved_descendant(dependency);
            }
        }
        self.memo
            .into_iter()
            .filter_map(|(id, unresolved)| unresolved.then_some(id))
            .collect()
    }

    pub fn has_unresolved_descendant(&mut self, dependency: &Dependency) -> bool {
        self.search(dependency, 0)
    }

    fn search(&mut self, dependency: &Dependency, depth: usize) -> bool {
        if let Some(&known) = self.memo.get(dependency.id()) {
            return known;
        }
        if self.children.contains_key(dependency.id()) {
            tracing::trace!(id = %dependency.id(), "Cycle detected, treating as resolved");
            return false;
        }
        if depth >= MAX_RECURSION_DEPTH {
            tracing::warn!(
                id = %dependency.id(),
                depth,
                "Dependency graph too deep, treating remaining descendants as resolved"
            );
            return false;
        }

        let children: Vec<Arc<Dependency>> = dependency
            .dependency_ids()
            .iter()
            .filter_map(|child_id| self.dependencies.get(child_id))
            .filter(|child| child.visible())
            .cloned()
            .collect();
        self.children
            .insert(dependency.id().clone(), children.clone());

        let mut unresolved = false;
        for child in &children {
            if !child.resolved() || self.search(child, depth + 1) {
                unresolved = true;
                break;
            }
        }

        self.memo.insert(dependency.id().clone(), unresolved);
        unresolved
    }
}
