use std::collections::BTreeMap;

/// Rule catalogs of a project at one point in time
///
/// The engine never looks inside a catalog; it only compares snapshots
/// structurally to decide whether a new dependency snapshot is needed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectCatalogSnapshot {
    rules: BTreeMap<String, Vec<String>>,
}

impl ProjectCatalogSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the properties of one named rule
    pub fn with_rule<I, S>(mut self, rule: impl Into<String>, properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rules
            .insert(rule.into(), properties.into_iter().map(Into::into).collect());
        self
    }

    pub fn rule(&self, name: &str) -> Option<&[String]> {
        self.rules.get(name).map(Vec::as_slice)
    }

    pub fn rules(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.rules.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_equality() {
        let left = ProjectCatalogSnapshot::new().with_rule("PackageReference", ["Version"]);
        let right = ProjectCatalogSnapshot::new().with_rule("PackageReference", ["Version"]);
        let other = ProjectCatalogSnapshot::new()
            .with_rule("PackageReference", ["Version", "PrivateAssets"]);

        assert_eq!(left, right);
        assert_ne!(left, other);
        assert_eq!(left.rule("PackageReference"), Some(&["Version".to_string()][..]));
        assert!(ProjectCatalogSnapshot::new().is_empty());
    }
}
