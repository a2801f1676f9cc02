use super::{AddDecision, DependenciesSnapshotFilter, FilterContext, FilterOutcome};
use crate::snapshot_engine::domain::Dependency;

/// Keeps an unresolved dependency from replacing one already in the snapshot
///
/// Evaluation reports unresolved items before design-time builds finish;
/// once an item with the same id is known, the unresolved report is dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnresolvedGuardFilter;

impl UnresolvedGuardFilter {
    pub const NAME: &'static str = "unresolved-guard";
    pub const ORDER: i32 = 100;
}

impl DependenciesSnapshotFilter for UnresolvedGuardFilter {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn order(&self) -> i32 {
        Self::ORDER
    }

    fn before_add(
        &self,
        context: &FilterContext<'_>,
        candidate: Dependency,
    ) -> FilterOutcome<AddDecision> {
        if !candidate.resolved() && context.contains(candidate.id()) {
            return FilterOutcome::reject();
        }
        FilterOutcome::accept(candidate)
    }
}
