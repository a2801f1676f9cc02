use super::dependency_kind::DependencyKind;
use super::image_moniker::DependencyIconSet;
use std::collections::BTreeMap;

/// Property key holding a package version
pub const VERSION_PROPERTY: &str = "Version";

/// Raw, unfiltered description of a dependency, as produced by a rule handler
///
/// Optional text fields fall back when the model is turned into a
/// `Dependency`: `original_item_spec` and `name` fall back to `id`,
/// `caption` to `name`, and `path` to `original_item_spec`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyModel {
    pub provider_type: String,
    pub id: String,
    pub original_item_spec: Option<String>,
    pub path: Option<String>,
    pub name: Option<String>,
    pub caption: Option<String>,
    pub schema_name: String,
    pub schema_item_type: String,
    pub resolved: bool,
    pub implicit: bool,
    pub visible: bool,
    pub top_level: bool,
    pub priority: i32,
    pub properties: BTreeMap<String, String>,
    pub dependency_ids: Vec<String>,
    pub icon_set: DependencyIconSet,
}

impl DependencyModel {
    /// Creates a resolved, visible, top-level model for any provider type
    pub fn new(provider_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            provider_type: provider_type.into(),
            id: id.into(),
            original_item_spec: None,
            path: None,
            name: None,
            caption: None,
            schema_name: String::new(),
            schema_item_type: String::new(),
            resolved: true,
            implicit: false,
            visible: true,
            top_level: true,
            priority: 0,
            properties: BTreeMap::new(),
            dependency_ids: Vec::new(),
            icon_set: DependencyIconSet::default(),
        }
    }

    /// Creates a model for one of the built-in kinds, with schema, icons
    /// and priority matching its resolution state
    pub fn of_kind(kind: DependencyKind, id: impl Into<String>, resolved: bool) -> Self {
        let id = id.into();
        Self {
            original_item_spec: Some(id.clone()),
            name: Some(id.clone()),
            caption: Some(id.clone()),
            schema_name: kind.schema_name(resolved).to_string(),
            schema_item_type: kind.schema_item_type().to_string(),
            resolved,
            priority: kind.priority(resolved),
            icon_set: kind.icon_set(),
            ..Self::new(kind.provider_type(), id)
        }
    }

    /// NuGet package reference; the caption carries the version when known
    pub fn package(name: &str, version: Option<&str>, resolved: bool) -> Self {
        let mut model = Self::of_kind(DependencyKind::Package, name, resolved);
        if let Some(version) = version.filter(|v| !v.is_empty()) {
            model.caption = Some(format!("{} ({})", name, version));
            model
                .properties
                .insert(VERSION_PROPERTY.to_string(), version.to_string());
        }
        model
    }

    /// SDK reference
    pub fn sdk(name: &str, resolved: bool) -> Self {
        Self::of_kind(DependencyKind::Sdk, name, resolved)
    }

    /// Assembly reference; resolved assemblies are identified by their path
    pub fn assembly(item_spec: &str, resolved_path: Option<&str>) -> Self {
        let resolved = resolved_path.is_some();
        let mut model = Self::of_kind(DependencyKind::Assembly, item_spec, resolved);
        model.path = resolved_path.map(str::to_string);
        model
    }

    /// Project-to-project reference; the caption is the project file name without extension
    pub fn project(project_path: &str, resolved: bool) -> Self {
        let mut model = Self::of_kind(DependencyKind::Project, project_path, resolved);
        let file_name = project_path
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(project_path);
        let caption = file_name
            .rsplit_once('.')
            .map(|(stem, _)| stem)
            .filter(|stem| !stem.is_empty())
            .unwrap_or(file_name);
        model.caption = Some(caption.to_string());
        model.name = Some(caption.to_string());
        model
    }

    /// Analyzer assembly reference
    pub fn analyzer(item_spec: &str, resolved: bool) -> Self {
        Self::of_kind(DependencyKind::Analyzer, item_spec, resolved)
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_original_item_spec(mut self, original_item_spec: impl Into<String>) -> Self {
        self.original_item_spec = Some(original_item_spec.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_implicit(mut self, implicit: bool) -> Self {
        self.implicit = implicit;
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn with_top_level(mut self, top_level: bool) -> Self {
        self.top_level = top_level;
        self
    }

    pub fn with_resolved(mut self, resolved: bool) -> Self {
        self.resolved = resolved;
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_schema(
        mut self,
        schema_name: impl Into<String>,
        item_type: impl Into<String>,
    ) -> Self {
        self.schema_name = schema_name.into();
        self.schema_item_type = item_type.into();
        self
    }

    pub fn with_icon_set(mut self, icon_set: DependencyIconSet) -> Self {
        self.icon_set = icon_set;
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn with_dependency_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependency_ids = ids.into_iter().map(Into::into).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot_engine::domain::dependency_kind::provider_types;

    #[test]
    fn test_new_defaults() {
        let model = DependencyModel::new("ComDependency", "stdole");
        assert!(model.resolved);
        assert!(model.visible);
        assert!(model.top_level);
        assert!(!model.implicit);
        assert!(model.caption.is_none());
    }

    #[test]
    fn test_package_caption_includes_version() {
        let model = DependencyModel::package("Newtonsoft.Json", Some("13.0.3"), true);
        assert_eq!(model.provider_type, provider_types::PACKAGE);
        assert_eq!(model.caption.as_deref(), Some("Newtonsoft.Json (13.0.3)"));
        assert_eq!(model.name.as_deref(), Some("Newtonsoft.Json"));
        assert_eq!(model.properties.get(VERSION_PROPERTY).unwrap(), "13.0.3");
        assert_eq!(model.schema_name, "ResolvedPackageReference");
    }

    #[test]
    fn test_package_without_version() {
        let model = DependencyModel::package("Foo", None, false);
        assert_eq!(model.caption.as_deref(), Some("Foo"));
        assert_eq!(model.schema_name, "PackageReference");
        assert!(model.properties.is_empty());
    }

    #[test]
    fn test_assembly_resolution_follows_path() {
        let resolved = DependencyModel::assembly("System.Xml", Some("/ref/System.Xml.dll"));
        assert!(resolved.resolved);
        assert_eq!(resolved.path.as_deref(), Some("/ref/System.Xml.dll"));

        let unresolved = DependencyModel::assembly("Missing", None);
        assert!(!unresolved.resolved);
        assert!(unresolved.path.is_none());
    }

    #[test]
    fn test_project_caption_is_file_stem() {
        let model = DependencyModel::project("../Lib/Lib.csproj", true);
        assert_eq!(model.caption.as_deref(), Some("Lib"));
        assert_eq!(model.id, "../Lib/Lib.csproj");

        let windows = DependencyModel::project("..\\Core\\Core.vbproj", true);
        assert_eq!(windows.caption.as_deref(), Some("Core"));
    }

    #[test]
    fn test_builder_overrides() {
        let model = DependencyModel::sdk("Microsoft.NET.Sdk", false)
            .with_implicit(true)
            .with_visible(false)
            .with_dependency_ids(["a", "b"])
            .with_property("Origin", "props");
        assert!(model.implicit);
        assert!(!model.visible);
        assert_eq!(model.dependency_ids, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(model.properties.get("Origin").unwrap(), "props");
    }
}
