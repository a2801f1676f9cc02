use crate::snapshot_engine::domain::{
    DependencyKind, DependencySubtreeProvider, DependencyViewModel, ImageMoniker, KnownMonikers,
    SubtreeProviderRegistry,
};
use std::sync::Arc;

/// Subtree provider for one of the built-in dependency kinds
///
/// The group node is a folder captioned after the kind and sorted by the
/// kind's resolved priority.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinSubtreeProvider {
    kind: DependencyKind,
}

impl BuiltinSubtreeProvider {
    pub fn new(kind: DependencyKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> DependencyKind {
        self.kind
    }
}

impl DependencySubtreeProvider for BuiltinSubtreeProvider {
    fn provider_type(&self) -> &str {
        self.kind.provider_type()
    }

    fn create_root_dependency_node(&self) -> DependencyViewModel {
        DependencyViewModel::group(
            self.kind.group_caption(),
            KnownMonikers::FOLDER_CLOSED,
            KnownMonikers::FOLDER_OPENED,
            self.kind.priority(true),
        )
    }

    fn implicit_icon(&self) -> Option<ImageMoniker> {
        self.kind.implicit_icon()
    }
}

/// Registry holding a provider for every built-in dependency kind
pub fn builtin_registry() -> SubtreeProviderRegistry {
    DependencyKind::ALL
        .into_iter()
        .fold(SubtreeProviderRegistry::new(), |registry, kind| {
            registry.with(Arc::new(BuiltinSubtreeProvider::new(kind)))
        })
}
