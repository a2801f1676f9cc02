use super::dependency_model::DependencyModel;

/// One batch of dependency changes for a single target framework
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependenciesChanges {
    added: Vec<DependencyModel>,
    removed: Vec<DependencyModel>,
}

impl DependenciesChanges {
    pub fn new(added: Vec<DependencyModel>, removed: Vec<DependencyModel>) -> Self {
        Self { added, removed }
    }

    pub fn added(&self) -> &[DependencyModel] {
        &self.added
    }

    pub fn removed(&self) -> &[DependencyModel] {
        &self.removed
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Accumulates changes reported by rule handlers
#[derive(Debug, Default)]
pub struct DependenciesChangesBuilder {
    added: Vec<DependencyModel>,
    removed: Vec<DependencyModel>,
}

impl DependenciesChangesBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn added(&mut self, model: DependencyModel) -> &mut Self {
        self.added.push(model);
        self
    }

    /// Records a removal; only the provider type and id of `model` matter
    pub fn removed(&mut self, model: DependencyModel) -> &mut Self {
        self.removed.push(model);
        self
    }

    /// Returns `None` when nothing was recorded
    pub fn try_build(self) -> Option<DependenciesChanges> {
        if self.added.is_empty() && self.removed.is_empty() {
            None
        } else {
            Some(DependenciesChanges::new(self.added, self.removed))
        }
    }
}
