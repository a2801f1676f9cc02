use super::image_moniker::ImageMoniker;
use super::view_model::DependencyViewModel;
use crate::snapshot_engine::policies::StringComparers;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Supplies the group node and icons for one provider type
///
/// Implementations are shared between snapshot builds and must be
/// thread-safe.
pub trait DependencySubtreeProvider: Send + Sync {
    /// Provider type this provider is responsible for
    fn provider_type(&self) -> &str;

    /// Node shown above all dependencies of this provider type
    fn create_root_dependency_node(&self) -> DependencyViewModel;

    /// Icon used for implicitly brought in dependencies, if the provider has one
    fn implicit_icon(&self) -> Option<ImageMoniker> {
        None
    }
}

/// Subtree providers keyed by provider type (ignore case)
#[derive(Clone, Default)]
pub struct SubtreeProviderRegistry {
    providers: BTreeMap<String, Arc<dyn DependencySubtreeProvider>>,
}

impl SubtreeProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `provider`, replacing any provider for the same type
    pub fn register(&mut self, provider: Arc<dyn DependencySubtreeProvider>) {
        let key = Self::key(provider.provider_type());
        self.providers.insert(key, provider);
    }

    pub fn with(mut self, provider: Arc<dyn DependencySubtreeProvider>) -> Self {
        self.register(provider);
        self
    }

    pub fn get(&self, provider_type: &str) -> Option<&Arc<dyn DependencySubtreeProvider>> {
        self.providers.get(&Self::key(provider_type))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn DependencySubtreeProvider>> {
        self.providers.values()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    fn key(provider_type: &str) -> String {
        StringComparers::DEPENDENCY_PROVIDER_TYPES
            .normalize(provider_type)
            .into_owned()
    }
}

impl fmt::Debug for SubtreeProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.providers.values().map(|p| p.provider_type().to_string()))
            .finish()
    }
}
