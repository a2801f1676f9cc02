use super::dependency_id::DependencyId;
use super::image_moniker::ImageMoniker;
use std::collections::BTreeMap;

/// Presentation data for one node of the dependency tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyViewModel {
    pub caption: String,
    pub file_path: Option<String>,
    pub schema_name: String,
    pub schema_item_type: String,
    pub priority: i32,
    pub icon: ImageMoniker,
    pub expanded_icon: ImageMoniker,
    pub properties: BTreeMap<String, String>,
    pub appears_unresolved: bool,
    pub implicit: bool,
    /// `None` for group nodes that do not stand for a dependency
    pub dependency_id: Option<DependencyId>,
}

impl DependencyViewModel {
    /// Group node heading the dependencies of one provider type
    pub fn group(
        caption: impl Into<String>,
        icon: ImageMoniker,
        expanded_icon: ImageMoniker,
        priority: i32,
    ) -> Self {
        Self {
            caption: caption.into(),
            file_path: None,
            schema_name: String::new(),
            schema_item_type: String::new(),
            priority,
            icon,
            expanded_icon,
            properties: BTreeMap::new(),
            appears_unresolved: false,
            implicit: false,
            dependency_id: None,
        }
    }

    pub fn is_group(&self) -> bool {
        self.dependency_id.is_none()
    }
}
