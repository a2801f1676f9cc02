use super::{AddDecision, DependenciesSnapshotFilter, FilterContext, FilterOutcome};
use crate::snapshot_engine::domain::{Dependency, DependencyIconSet, DependencyOverrides};

/// Marks top-level dependencies that the project file does not declare
///
/// Such dependencies come from SDKs or imported targets. They get the
/// implicit icon of their subtree provider; providers without one leave
/// the dependency untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImplicitTopLevelFilter;

impl ImplicitTopLevelFilter {
    pub const NAME: &'static str = "implicit-top-level";
    pub const ORDER: i32 = 130;
}

impl DependenciesSnapshotFilter for ImplicitTopLevelFilter {
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
        if !candidate.top_level() || !candidate.resolved() || candidate.implicit() {
            return FilterOutcome::accept(candidate);
        }

        let Some(item_specs) = context.project_item_specs() else {
            return FilterOutcome::accept(candidate);
        };
        if item_specs.contains(candidate.original_item_spec()) {
            return FilterOutcome::accept(candidate);
        }

        let implicit_icon = context
            .subtree_providers()
            .get(candidate.provider_type())
            .and_then(|provider| provider.implicit_icon());

        match implicit_icon {
            Some(icon) => {
                let implicit = candidate.set_properties(DependencyOverrides {
                    implicit: Some(true),
                    icon_set: Some(DependencyIconSet::uniform(icon)),
                    ..Default::default()
                });
                FilterOutcome::accept(implicit)
            }
            None => FilterOutcome::accept(candidate),
        }
    }
}
