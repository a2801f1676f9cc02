use std::fmt;
use uuid::Uuid;

/// Reference to an image in an image catalog: a catalog GUID plus an id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageMoniker {
    pub guid: Uuid,
    pub id: i32,
}

impl ImageMoniker {
    pub const fn new(guid: Uuid, id: i32) -> Self {
        Self { guid, id }
    }

    /// Placeholder used when no icon was supplied
    pub const fn blank() -> Self {
        Self::new(Uuid::nil(), 0)
    }

    pub fn is_blank(&self) -> bool {
        self.guid.is_nil() && self.id == 0
    }
}

impl Default for ImageMoniker {
    fn default() -> Self {
        Self::blank()
    }
}

impl fmt::Display for ImageMoniker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.guid, self.id)
    }
}

/// Monikers from the shared image catalog used by the built-in dependency kinds
pub struct KnownMonikers;

impl KnownMonikers {
    pub const CATALOG: Uuid = Uuid::from_u128(0xae27a6b0_e345_4288_96df_5eaf394ee369);

    pub const REFERENCE: ImageMoniker = ImageMoniker::new(Self::CATALOG, 2522);
    pub const REFERENCE_WARNING: ImageMoniker = ImageMoniker::new(Self::CATALOG, 2527);
    pub const REFERENCE_PRIVATE: ImageMoniker = ImageMoniker::new(Self::CATALOG, 2524);
    pub const APPLICATION: ImageMoniker = ImageMoniker::new(Self::CATALOG, 165);
    pub const APPLICATION_WARNING: ImageMoniker = ImageMoniker::new(Self::CATALOG, 179);
    pub const APPLICATION_PRIVATE: ImageMoniker = ImageMoniker::new(Self::CATALOG, 171);
    pub const CODE_INFORMATION: ImageMoniker = ImageMoniker::new(Self::CATALOG, 514);
    pub const CODE_INFORMATION_WARNING: ImageMoniker = ImageMoniker::new(Self::CATALOG, 519);
    pub const NUGET: ImageMoniker = ImageMoniker::new(Self::CATALOG, 2120);
    pub const NUGET_WARNING: ImageMoniker = ImageMoniker::new(Self::CATALOG, 2124);
    pub const NUGET_PRIVATE: ImageMoniker = ImageMoniker::new(Self::CATALOG, 2122);
    pub const SDK: ImageMoniker = ImageMoniker::new(Self::CATALOG, 2703);
    pub const SDK_WARNING: ImageMoniker = ImageMoniker::new(Self::CATALOG, 2706);
    pub const SDK_PRIVATE: ImageMoniker = ImageMoniker::new(Self::CATALOG, 2705);
    pub const FOLDER_CLOSED: ImageMoniker = ImageMoniker::new(Self::CATALOG, 1287);
    pub const FOLDER_OPENED: ImageMoniker = ImageMoniker::new(Self::CATALOG, 1290);
}

/// The four icons of a dependency node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DependencyIconSet {
    pub icon: ImageMoniker,
    pub expanded_icon: ImageMoniker,
    pub unresolved_icon: ImageMoniker,
    pub unresolved_expanded_icon: ImageMoniker,
}

impl DependencyIconSet {
    pub const fn new(
        icon: ImageMoniker,
        expanded_icon: ImageMoniker,
        unresolved_icon: ImageMoniker,
        unresolved_expanded_icon: ImageMoniker,
    ) -> Self {
        Self {
            icon,
            expanded_icon,
            unresolved_icon,
            unresolved_expanded_icon,
        }
    }

    /// Icon set that shows the same image in every state
    pub const fn uniform(icon: ImageMoniker) -> Self {
        Self::new(icon, icon, icon, icon)
    }

    /// Icon set that only distinguishes resolved from unresolved
    pub const fn resolved_unresolved(resolved: ImageMoniker, unresolved: ImageMoniker) -> Self {
        Self::new(resolved, resolved, unresolved, unresolved)
    }
}
