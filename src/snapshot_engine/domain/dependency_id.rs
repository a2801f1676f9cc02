use super::target_framework::TargetFramework;
use crate::snapshot_engine::policies::StringComparers;
use std::fmt;

/// Composite identity of a dependency: (target framework, provider type, item spec)
///
/// Components are stored in their normalized form, so the derived
/// equality, hashing and ordering agree with the comparison policies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DependencyId {
    target_framework: String,
    provider_type: String,
    item_spec: String,
}

impl DependencyId {
    pub fn target_framework_key(&self) -> &str {
        &self.target_framework
    }

    pub fn provider_type_key(&self) -> &str {
        &self.provider_type
    }

    pub fn item_spec_key(&self) -> &str {
        &self.item_spec
    }

    /// Flat string form, `"{target framework}\{provider type}\{item spec}"`
    ///
    /// `%` and `\` inside components are escaped, so distinct ids never share a key.
    pub fn as_key(&self) -> String {
        self.to_string()
    }

    /// True if this id belongs to `target_framework`
    pub fn is_for(&self, target_framework: &TargetFramework) -> bool {
        self.target_framework == target_framework.identity_key()
    }
}

impl fmt::Display for DependencyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\\{}\\{}",
            escape(&self.target_framework),
            escape(&self.provider_type),
            escape(&self.item_spec)
        )
    }
}

fn escape(component: &str) -> std::borrow::Cow<'_, str> {
    if component.contains(['%', '\\']) {
        std::borrow::Cow::Owned(component.replace('%', "%25").replace('\\', "%5C"))
    } else {
        std::borrow::Cow::Borrowed(component)
    }
}

/// Builds the identity of a dependency
///
/// Pure and deterministic: equal inputs (under the id policies) always
/// produce equal ids, across calls and across runs.
pub fn get_id(
    target_framework: &TargetFramework,
    provider_type: &str,
    item_spec: &str,
) -> DependencyId {
    DependencyId {
        target_framework: target_framework.identity_key(),
        provider_type: StringComparers::DEPENDENCY_PROVIDER_TYPES
            .normalize(provider_type)
            .into_owned(),
        item_spec: StringComparers::DEPENDENCY_IDS
            .normalize(item_spec)
            .into_owned(),
    }
}
