use super::{
    AddDecision, DependenciesSnapshotFilter, FilterContext, FilterOutcome, RemoveDecision,
    WorldEdit,
};
use crate::snapshot_engine::domain::dependency_kind::{provider_types, schema_names};
use crate::snapshot_engine::domain::{get_id, Dependency};
use std::sync::Arc;

/// Keeps an SDK in step with the package that delivers it
///
/// An SDK shipped as a NuGet package is resolved exactly when a resolved
/// package of the same name is present, and it shows that package's
/// dependencies as its children.
#[derive(Debug, Default, Clone, Copy)]
pub struct SdkPackageLinkFilter;

impl SdkPackageLinkFilter {
    pub const NAME: &'static str = "sdk-package-link";
    pub const ORDER: i32 = 110;
}

impl DependenciesSnapshotFilter for SdkPackageLinkFilter {
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
        if candidate.has_provider_type(provider_types::PACKAGE) {
            if !candidate.resolved() {
                return FilterOutcome::accept(candidate);
            }
            let sdk_id = get_id(context.target_framework(), provider_types::SDK, candidate.name());
            if let Some(sdk) = context.get(&sdk_id) {
                tracing::debug!(sdk = %sdk_id, "Resolving SDK from package");
                let resolved = sdk.to_resolved(
                    schema_names::RESOLVED_SDK_REFERENCE,
                    candidate.dependency_ids(),
                );
                return FilterOutcome::accept(candidate).with_edit(WorldEdit::AddOrUpdate(resolved));
            }
        } else if candidate.has_provider_type(provider_types::SDK) {
            let package_id = get_id(
                context.target_framework(),
                provider_types::PACKAGE,
                candidate.name(),
            );
            if let Some(package) = context.get(&package_id).filter(|p| p.resolved()) {
                let resolved = candidate
                    .to_resolved(schema_names::RESOLVED_SDK_REFERENCE, package.dependency_ids());
                return FilterOutcome::accept(resolved);
            }
        }

        FilterOutcome::accept(candidate)
    }

    fn before_remove(
        &self,
        context: &FilterContext<'_>,
        dependency: &Arc<Dependency>,
    ) -> FilterOutcome<RemoveDecision> {
        if dependency.resolved() && dependency.has_provider_type(provider_types::PACKAGE) {
            let sdk_id = get_id(context.target_framework(), provider_types::SDK, dependency.name());
            if let Some(sdk) = context.get(&sdk_id).filter(|s| s.resolved()) {
                tracing::debug!(sdk = %sdk_id, "Package removed, SDK becomes unresolved");
                let unresolved = sdk.to_unresolved(schema_names::SDK_REFERENCE, &[]);
                return FilterOutcome::allow().with_edit(WorldEdit::AddOrUpdate(unresolved));
            }
        }

        FilterOutcome::allow()
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::super::{DependencyWorld, FilterScope};
    use super::*;
    use crate::snapshot_engine::domain::{DependencyModel, SubtreeProviderRegistry};

    fn context<'a>(
        world: &'a DependencyWorld,
        tf: &'a crate::snapshot_engine::domain::TargetFramework,
        registry: &'a SubtreeProviderRegistry,
    ) -> FilterContext<'a> {
        FilterContext::new(
            FilterScope {
                target_framework: tf,
                subtree_providers: registry,
                project_item_specs: None,
            },
            world,
        )
    }

    fn single_update(outcome_edits: &[WorldEdit]) -> &Dependency {
        assert_eq!(outcome_edits.len(), 1);
        match &outcome_edits[0] {
            WorldEdit::AddOrUpdate(d) => d,
            other => panic!("unexpected edit {:?}", other),
        }
    }

    #[test]
    fn test_resolved_package_resolves_existing_sdk() {
        let world = world_of(vec![DependencyModel::sdk("Microsoft.NET.Sdk.Web", false)]);
        let (tf, registry) = (net6(), SubtreeProviderRegistry::new());
        let package = DependencyModel::package("Microsoft.NET.Sdk.Web", Some("1.0.0"), true)
            .with_dependency_ids(["a", "b"]);

        let outcome = SdkPackageLinkFilter.before_add(
            &context(&world, &tf, &registry),
            dependency(package.clone()),
        );

        assert_eq!(outcome.decision, AddDecision::Accept(dependency(package)));
        let sdk = single_update(&outcome.edits);
        assert!(sdk.resolved());
        assert_eq!(sdk.schema_name(), schema_names::RESOLVED_SDK_REFERENCE);
        assert_eq!(
            sdk.dependency_ids(),
            &[
                get_id(&tf, provider_types::PACKAGE, "a"),
                get_id(&tf, provider_types::PACKAGE, "b"),
            ]
        );
    }

    #[test]
    fn test_unresolved_package_leaves_sdk_alone() {
        let world = world_of(vec![DependencyModel::sdk("Sdk.A", false)]);
        let (tf, registry) = (net6(), SubtreeProviderRegistry::new());

        let outcome = SdkPackageLinkFilter.before_add(
            &context(&world, &tf, &registry),
            dependency(DependencyModel::package("Sdk.A", None, false)),
        );

        assert!(outcome.edits.is_empty());
    }

    #[test]
    fn test_sdk_added_after_resolved_package_is_resolved() {
        let world = world_of(vec![
            DependencyModel::package("Sdk.A", None, true).with_dependency_ids(["x"]),
        ]);
        let (tf, registry) = (net6(), SubtreeProviderRegistry::new());

        let outcome = SdkPackageLinkFilter.before_add(
            &context(&world, &tf, &registry),
            dependency(DependencyModel::sdk("Sdk.A", false)),
        );

        assert!(outcome.edits.is_empty());
        match outcome.decision {
            AddDecision::Accept(sdk) => {
                assert!(sdk.resolved());
                assert_eq!(sdk.schema_name(), schema_names::RESOLVED_SDK_REFERENCE);
                assert_eq!(sdk.dependency_ids(), &[get_id(&tf, provider_types::PACKAGE, "x")]);
            }
            AddDecision::Reject => panic!("sdk was rejected"),
        }
    }

    #[test]
    fn test_sdk_added_with_unresolved_package_is_unchanged() {
        let world = world_of(vec![DependencyModel::package("Sdk.A", None, false)]);
        let (tf, registry) = (net6(), SubtreeProviderRegistry::new());
        let sdk = dependency(DependencyModel::sdk("Sdk.A", false));

        let outcome =
            SdkPackageLinkFilter.before_add(&context(&world, &tf, &registry), sdk.clone());

        assert_eq!(outcome.decision, AddDecision::Accept(sdk));
    }

    #[test]
    fn test_removing_package_unresolves_sdk() {
        let world = world_of(vec![
            DependencyModel::sdk("Sdk.A", true).with_dependency_ids(["x"]),
            DependencyModel::package("Sdk.A", None, true),
        ]);
        let (tf, registry) = (net6(), SubtreeProviderRegistry::new());
        let package = world
            .get(&get_id(&tf, provider_types::PACKAGE, "Sdk.A"))
            .cloned()
            .unwrap();

        let outcome =
            SdkPackageLinkFilter.before_remove(&context(&world, &tf, &registry), &package);

        assert_eq!(outcome.decision, RemoveDecision::Allow);
        let sdk = single_update(&outcome.edits);
        assert!(!sdk.resolved());
        assert_eq!(sdk.schema_name(), schema_names::SDK_REFERENCE);
        assert!(sdk.dependency_ids().is_empty());
    }

    #[test]
    fn test_removing_package_without_sdk_has_no_edits() {
        let world = world_of(vec![DependencyModel::package("Foo", None, true)]);
        let (tf, registry) = (net6(), SubtreeProviderRegistry::new());
        let package = world.values().next().cloned().unwrap();

        let outcome =
            SdkPackageLinkFilter.before_remove(&context(&world, &tf, &registry), &package);

        assert_eq!(outcome.decision, RemoveDecision::Allow);
        assert!(outcome.edits.is_empty());
    }
}
