use super::{AddDecision, DependenciesSnapshotFilter, FilterContext, FilterOutcome, WorldEdit};
use crate::snapshot_engine::domain::Dependency;
use crate::snapshot_engine::policies::StringComparers;

/// Gives top-level dependencies of one provider type distinct captions
///
/// When a candidate's caption equals an existing entry's caption, both
/// switch to their alias form `"{caption} ({original item spec})"`. When an
/// existing entry already carries the alias a matching caption would get,
/// only the candidate is aliased.
#[derive(Debug, Default, Clone, Copy)]
pub struct DeduplicateCaptionsFilter;

impl DeduplicateCaptionsFilter {
    pub const NAME: &'static str = "deduplicate-captions";
    pub const ORDER: i32 = 101;
}

impl DependenciesSnapshotFilter for DeduplicateCaptionsFilter {
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
        if !candidate.top_level() {
            return FilterOutcome::accept(candidate);
        }

        let captions = StringComparers::DEPENDENCY_CAPTIONS;
        let mut alias_candidate = false;
        let mut edits = Vec::new();

        // scans the whole world: every colliding entry is aliased, not only the first
        for existing in context.world().values() {
            if !existing.top_level()
                || existing.id() == candidate.id()
                || !existing.has_provider_type(candidate.provider_type())
            {
                continue;
            }

            if captions.equals(existing.caption(), candidate.caption()) {
                alias_candidate = true;
                edits.push(WorldEdit::AddOrUpdate(existing.with_caption(existing.alias())));
            } else {
                let aliased = format!(
                    "{} ({})",
                    candidate.caption(),
                    existing.original_item_spec()
                );
                if captions.equals(existing.caption(), &aliased) {
                    alias_candidate = true;
                }
            }
        }

        let accepted = if alias_candidate {
            let alias = candidate.alias();
            tracing::debug!(
                id = %candidate.id(),
                caption = %alias,
                "Caption collides, using alias"
            );
            candidate.with_caption(alias)
        } else {
            candidate
        };

        FilterOutcome {
            decision: AddDecision::Accept(accepted),
            edits,
        }
    }
}
