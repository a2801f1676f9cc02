use super::dependency_id::{get_id, DependencyId};
use super::dependency_model::DependencyModel;
use super::image_moniker::DependencyIconSet;
use super::target_framework::TargetFramework;
use super::targeted_snapshot::TargetedDependenciesSnapshot;
use super::view_model::DependencyViewModel;
use crate::snapshot_engine::policies::StringComparers;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Immutable snapshot entity for one dependency node
///
/// A `Dependency` never changes after construction. Filters that need a
/// different caption or resolution state build a copy with `set_properties`,
/// `to_resolved`, `to_unresolved` or `with_caption`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    id: DependencyId,
    provider_type: String,
    name: String,
    caption: String,
    original_item_spec: String,
    path: String,
    schema_name: String,
    schema_item_type: String,
    resolved: bool,
    implicit: bool,
    visible: bool,
    top_level: bool,
    priority: i32,
    properties: Arc<BTreeMap<String, String>>,
    dependency_ids: Arc<[DependencyId]>,
    icon_set: DependencyIconSet,
    target_framework: TargetFramework,
    project_path: Arc<str>,
}

/// Field overrides for `Dependency::set_properties`; `None` keeps the current value
#[derive(Debug, Clone, Default)]
pub struct DependencyOverrides {
    pub caption: Option<String>,
    pub resolved: Option<bool>,
    pub schema_name: Option<String>,
    pub dependency_ids: Option<Vec<DependencyId>>,
    pub icon_set: Option<DependencyIconSet>,
    pub implicit: Option<bool>,
}

impl Dependency {
    /// Builds the unfiltered dependency for `model` in `target_framework`
    ///
    /// Child ids are converted into full ids of the same target framework
    /// and provider type.
    pub fn from_model(
        project_path: &str,
        target_framework: &TargetFramework,
        model: &DependencyModel,
    ) -> Self {
        let original_item_spec = model
            .original_item_spec
            .clone()
            .unwrap_or_else(|| model.id.clone());
        let name = model.name.clone().unwrap_or_else(|| model.id.clone());
        let caption = model
            .caption
            .clone()
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| name.clone());
        let path = model
            .path
            .clone()
            .unwrap_or_else(|| original_item_spec.clone());
        let dependency_ids: Arc<[DependencyId]> = model
            .dependency_ids
            .iter()
            .map(|child| get_id(target_framework, &model.provider_type, child))
            .collect();

        Self {
            id: get_id(target_framework, &model.provider_type, &model.id),
            provider_type: model.provider_type.clone(),
            name,
            caption,
            original_item_spec,
            path,
            schema_name: model.schema_name.clone(),
            schema_item_type: model.schema_item_type.clone(),
            resolved: model.resolved,
            implicit: model.implicit,
            visible: model.visible,
            top_level: model.top_level,
            priority: model.priority,
            properties: Arc::new(model.properties.clone()),
            dependency_ids,
            icon_set: model.icon_set,
            target_framework: target_framework.clone(),
            project_path: Arc::from(project_path),
        }
    }

    pub fn id(&self) -> &DependencyId {
        &self.id
    }

    pub fn provider_type(&self) -> &str {
        &self.provider_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn original_item_spec(&self) -> &str {
        &self.original_item_spec
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn schema_name(&self) -> &str {
        &self.schema_name
    }

    pub fn schema_item_type(&self) -> &str {
        &self.schema_item_type
    }

    pub fn resolved(&self) -> bool {
        self.resolved
    }

    pub fn implicit(&self) -> bool {
        self.implicit
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn top_level(&self) -> bool {
        self.top_level
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    pub fn dependency_ids(&self) -> &[DependencyId] {
        &self.dependency_ids
    }

    pub fn icon_set(&self) -> &DependencyIconSet {
        &self.icon_set
    }

    pub fn target_framework(&self) -> &TargetFramework {
        &self.target_framework
    }

    pub fn project_path(&self) -> &str {
        &self.project_path
    }

    pub fn has_provider_type(&self, provider_type: &str) -> bool {
        StringComparers::DEPENDENCY_PROVIDER_TYPES.equals(&self.provider_type, provider_type)
    }

    /// Caption that tells this dependency apart from others sharing its caption:
    /// `"{caption} ({original item spec})"`
    ///
    /// Falls back to the path when the item spec is empty, and to the bare
    /// caption when neither adds information.
    pub fn alias(&self) -> String {
        let detail = if self.original_item_spec.is_empty() {
            &self.path
        } else {
            &self.original_item_spec
        };
        if detail.is_empty() || StringComparers::DEPENDENCY_CAPTIONS.equals(detail, &self.caption) {
            self.caption.clone()
        } else {
            format!("{} ({})", self.caption, detail)
        }
    }

    /// Returns a copy with the given fields replaced
    pub fn set_properties(&self, overrides: DependencyOverrides) -> Self {
        let mut copy = self.clone();
        if let Some(caption) = overrides.caption {
            copy.caption = caption;
        }
        if let Some(resolved) = overrides.resolved {
            copy.resolved = resolved;
        }
        if let Some(schema_name) = overrides.schema_name {
            copy.schema_name = schema_name;
        }
        if let Some(dependency_ids) = overrides.dependency_ids {
            copy.dependency_ids = dependency_ids.into();
        }
        if let Some(icon_set) = overrides.icon_set {
            copy.icon_set = icon_set;
        }
        if let Some(implicit) = overrides.implicit {
            copy.implicit = implicit;
        }
        copy
    }

    pub fn with_caption(&self, caption: impl Into<String>) -> Self {
        self.set_properties(DependencyOverrides {
            caption: Some(caption.into()),
            ..Default::default()
        })
    }

    pub fn to_resolved(&self, schema_name: &str, dependency_ids: &[DependencyId]) -> Self {
        self.set_properties(DependencyOverrides {
            resolved: Some(true),
            schema_name: Some(schema_name.to_string()),
            dependency_ids: Some(dependency_ids.to_vec()),
            ..Default::default()
        })
    }

    pub fn to_unresolved(&self, schema_name: &str, dependency_ids: &[DependencyId]) -> Self {
        self.set_properties(DependencyOverrides {
            resolved: Some(false),
            schema_name: Some(schema_name.to_string()),
            dependency_ids: Some(dependency_ids.to_vec()),
            ..Default::default()
        })
    }

    /// Maps this dependency to the node the tree shows for it
    ///
    /// The unresolved icons are used when this dependency is unresolved or
    /// when `snapshot` knows of an unresolved visible descendant.
    pub fn to_view_model(&self, snapshot: &TargetedDependenciesSnapshot) -> DependencyViewModel {
        let appears_unresolved = !self.resolved || snapshot.should_appear_unresolved(self);
        let (icon, expanded_icon) = if appears_unresolved {
            (self.icon_set.unresolved_icon, self.icon_set.unresolved_expanded_icon)
        } else {
            (self.icon_set.icon, self.icon_set.expanded_icon)
        };

        DependencyViewModel {
            caption: self.caption.clone(),
            file_path: Some(self.path.clone()),
            schema_name: self.schema_name.clone(),
            schema_item_type: self.schema_item_type.clone(),
            priority: self.priority,
            icon,
            expanded_icon,
            properties: (*self.properties).clone(),
            appears_unresolved,
            implicit: self.implicit,
            dependency_id: Some(self.id.clone()),
        }
    }
}
