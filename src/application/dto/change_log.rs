use crate::shared::{Result, SnapshotError};
use crate::snapshot_engine::domain::{
    DependenciesChanges, DependenciesChangesBuilder, DependencyKind, DependencyModel,
    ProjectCatalogSnapshot, TargetFramework,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// A recorded sequence of dependency change batches for one project
///
/// Change logs are the CLI's stand-in for the evaluation pipeline that
/// normally feeds the snapshot engine.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ChangeLog {
    pub project_path: String,
    /// Complete target-framework set, applied with every batch when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_frameworks: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_target_framework: Option<String>,
    /// Item specs declared in the project file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_item_specs: Option<Vec<String>>,
    #[serde(default)]
    pub batches: Vec<ChangeBatch>,
}

/// Changes for a single target framework
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ChangeBatch {
    pub target_framework: String,
    /// Overrides the change log's target-framework set from this batch on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_frameworks: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_target_framework: Option<String>,
    /// Rule name to rule properties
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalogs: Option<BTreeMap<String, Vec<String>>>,
    #[serde(default)]
    pub added: Vec<ChangeEntry>,
    #[serde(default)]
    pub removed: Vec<ChangeEntry>,
}

/// Dependency kinds accepted in change logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Sdk,
    Package,
    Project,
    Assembly,
    Analyzer,
}

impl From<EntryKind> for DependencyKind {
    fn from(kind: EntryKind) -> Self {
        match kind {
            EntryKind::Sdk => DependencyKind::Sdk,
            EntryKind::Package => DependencyKind::Package,
            EntryKind::Project => DependencyKind::Project,
            EntryKind::Assembly => DependencyKind::Assembly,
            EntryKind::Analyzer => DependencyKind::Analyzer,
        }
    }
}

fn default_true() -> bool {
    true
}

/// One added or removed dependency
///
/// Either `kind` or `provider_type` must be given. Entries with a `kind`
/// get the schema, icons and priority of that kind.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ChangeEntry {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<EntryKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_item_spec: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default = "default_true")]
    pub resolved: bool,
    #[serde(default)]
    pub implicit: bool,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default = "default_true")]
    pub top_level: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,
    /// Child ids, in the provider type of this entry
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
}

impl ChangeEntry {
    /// Converts the entry into the model a rule handler would produce
    ///
    /// # Errors
    /// Returns `SnapshotError::Validation` if the id is empty or the entry
    /// names neither a kind nor a provider type
    pub fn to_model(&self) -> Result<DependencyModel> {
        if self.id.trim().is_empty() {
            return Err(SnapshotError::Validation {
                message: "Change entry has an empty id".to_string(),
            }
            .into());
        }

        let mut model = match (self.kind, &self.provider_type) {
            (Some(EntryKind::Package), _) => {
                DependencyModel::package(&self.id, self.version.as_deref(), self.resolved)
            }
            (Some(EntryKind::Project), _) => DependencyModel::project(&self.id, self.resolved),
            (Some(kind), _) => {
                DependencyModel::of_kind(kind.into(), self.id.as_str(), self.resolved)
            }
            (None, Some(provider_type)) if !provider_type.trim().is_empty() => {
                DependencyModel::new(provider_type.as_str(), self.id.as_str())
                    .with_resolved(self.resolved)
            }
            (None, _) => {
                return Err(SnapshotError::Validation {
                    message: format!(
                        "Change entry '{}' needs either 'kind' or 'provider_type'",
                        self.id
                    ),
                }
                .into())
            }
        };

        if let Some(caption) = &self.caption {
            model.caption = Some(caption.clone());
        }
        if let Some(name) = &self.name {
            model.name = Some(name.clone());
        }
        if let Some(original_item_spec) = &self.original_item_spec {
            model.original_item_spec = Some(original_item_spec.clone());
        }
        if let Some(path) = &self.path {
            model.path = Some(path.clone());
        }
        if let Some(priority) = self.priority {
            model.priority = priority;
        }
        model.properties.extend(self.properties.clone());

        Ok(model
            .with_implicit(self.implicit)
            .with_visible(self.visible)
            .with_top_level(self.top_level)
            .with_dependency_ids(self.dependencies.iter().cloned()))
    }
}

impl ChangeLog {
    /// Checks references between fields that serde cannot express
    ///
    /// # Errors
    /// Returns `SnapshotError::Validation` for an empty project path, a batch
    /// without target framework, or an entry that cannot become a model
    pub fn validate(&self) -> Result<()> {
        if self.project_path.trim().is_empty() {
            return Err(SnapshotError::Validation {
                message: "Change log has an empty 'project_path'".to_string(),
            }
            .into());
        }

        for (index, batch) in self.batches.iter().enumerate() {
            if batch.target_framework.trim().is_empty() {
                return Err(SnapshotError::Validation {
                    message: format!("Batch {} has an empty 'target_framework'", index + 1),
                }
                .into());
            }
            for entry in batch.added.iter().chain(batch.removed.iter()) {
                entry.to_model()?;
            }
        }

        Ok(())
    }

    pub fn project_item_spec_set(&self) -> Option<HashSet<String>> {
        self.project_item_specs
            .as_ref()
            .map(|specs| specs.iter().cloned().collect())
    }
}

impl ChangeBatch {
    pub fn target_framework(&self) -> TargetFramework {
        TargetFramework::new(&self.target_framework)
    }

    /// Builds the engine's change set; `None` when the batch is empty
    pub fn to_changes(&self) -> Result<Option<DependenciesChanges>> {
        let mut builder = DependenciesChangesBuilder::new();
        for entry in &self.removed {
            builder.removed(entry.to_model()?);
        }
        for entry in &self.added {
            builder.added(entry.to_model()?);
        }
        Ok(builder.try_build())
    }

    pub fn catalog_snapshot(&self) -> Option<ProjectCatalogSnapshot> {
        self.catalogs.as_ref().map(|rules| {
            rules
                .iter()
                .fold(ProjectCatalogSnapshot::new(), |catalog, (rule, properties)| {
                    catalog.with_rule(rule.as_str(), properties.iter().cloned())
                })
        })
    }
}

/// Parses a list of target-framework names
pub fn parse_target_frameworks(names: &[String]) -> Vec<TargetFramework> {
    names
        .iter()
        .map(|name| TargetFramework::new(name))
        .collect()
}
