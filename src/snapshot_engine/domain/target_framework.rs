use crate::snapshot_engine::policies::StringComparers;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A single compilation target of a project (e.g. `net6.0`)
///
/// Equality, hashing and ordering use the full name under the framework-name
/// policy (ignore case). The short name is what users see. Cloning is cheap.
#[derive(Clone)]
pub struct TargetFramework {
    short_name: Arc<str>,
    full_name: Arc<str>,
}

impl TargetFramework {
    /// Creates a target framework whose full name equals its moniker
    pub fn new(moniker: &str) -> Self {
        let name: Arc<str> = Arc::from(moniker.trim());
        Self {
            short_name: name.clone(),
            full_name: name,
        }
    }

    /// Creates a target framework with a distinct full name
    /// (e.g. `net45` / `.NETFramework,Version=v4.5`)
    pub fn with_full_name(short_name: &str, full_name: &str) -> Self {
        Self {
            short_name: Arc::from(short_name.trim()),
            full_name: Arc::from(full_name.trim()),
        }
    }

    /// The empty target framework, used when no target is active
    pub fn empty() -> Self {
        Self::new("")
    }

    /// Placeholder for projects that do not multi-target
    pub fn any() -> Self {
        Self::new("any")
    }

    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn is_empty(&self) -> bool {
        self.full_name.is_empty()
    }

    /// Key used for equality, hashing and dependency ids
    pub fn identity_key(&self) -> String {
        StringComparers::FRAMEWORK_NAMES
            .normalize(&self.full_name)
            .into_owned()
    }

    /// True if `name` matches either the short or the full name
    pub fn matches_name(&self, name: &str) -> bool {
        StringComparers::FRAMEWORK_NAMES.equals(&self.short_name, name)
            || StringComparers::FRAMEWORK_NAMES.equals(&self.full_name, name)
    }
}

impl PartialEq for TargetFramework {
    fn eq(&self, other: &Self) -> bool {
        StringComparers::FRAMEWORK_NAMES.equals(&self.full_name, &other.full_name)
    }
}

impl Eq for TargetFramework {}

impl Hash for TargetFramework {
    fn hash<H: Hasher>(&self, state: &mut H) {
        StringComparers::FRAMEWORK_NAMES
            .normalize(&self.full_name)
            .hash(state);
    }
}

impl PartialOrd for TargetFramework {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TargetFramework {
    fn cmp(&self, other: &Self) -> Ordering {
        let cmp = StringComparers::FRAMEWORK_NAMES;
        cmp.normalize(&self.full_name)
            .cmp(&cmp.normalize(&other.full_name))
    }
}

impl fmt::Display for TargetFramework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name)
    }
}

impl fmt::Debug for TargetFramework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.short_name == self.full_name {
            write!(f, "TargetFramework({})", self.short_name)
        } else {
            write!(f, "TargetFramework({}, {})", self.short_name, self.full_name)
        }
    }
}

impl From<&str> for TargetFramework {
    fn from(moniker: &str) -> Self {
        Self::new(moniker)
    }
}
