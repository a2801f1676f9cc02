mod catalog;
mod changes;
mod dependency;
mod dependency_id;
pub mod dependency_kind;
mod dependency_model;
mod environment;
mod image_moniker;
mod snapshot;
mod subtree_provider;
mod target_framework;
mod targeted_snapshot;
mod view_model;

pub use catalog::ProjectCatalogSnapshot;
pub use changes::{DependenciesChanges, DependenciesChangesBuilder};
pub use dependency::{Dependency, DependencyOverrides};
pub use dependency_id::{get_id, DependencyId};
pub use dependency_kind::DependencyKind;
pub use dependency_model::{DependencyModel, VERSION_PROPERTY};
pub use environment::SnapshotEnvironment;
pub use image_moniker::{DependencyIconSet, ImageMoniker, KnownMonikers};
pub use snapshot::DependenciesSnapshot;
pub use subtree_provider::{DependencySubtreeProvider, SubtreeProviderRegistry};
pub use target_framework::TargetFramework;
pub use targeted_snapshot::TargetedDependenciesSnapshot;
pub use view_model::DependencyViewModel;
