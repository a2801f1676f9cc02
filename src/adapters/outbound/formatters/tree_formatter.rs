use crate::application::read_models::{
    DependencyNodeView, ProviderGroupView, SnapshotReadModel, TargetView,
};
use crate::ports::outbound::SnapshotFormatter;
use crate::shared::Result;
use owo_colors::OwoColorize;
use std::fmt::Write;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";
const WARNING_MARK: &str = "⚠";

/// TreeFormatter adapter rendering a snapshot as an indented text tree
///
/// One tree per target framework, with provider groups as the first level.
/// Colors are applied only when `colored` is set, so redirected output
/// stays plain.
pub struct TreeFormatter {
    colored: bool,
}

impl TreeFormatter {
    pub fn new(colored: bool) -> Self {
        Self { colored }
    }

    fn bold(&self, text: &str) -> String {
        if self.colored {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn green(&self, text: &str) -> String {
        if self.colored {
            text.green().to_string()
        } else {
            text.to_string()
        }
    }

    fn yellow(&self, text: &str) -> String {
        if self.colored {
            text.yellow().to_string()
        } else {
            text.to_string()
        }
    }

    fn dimmed(&self, text: &str) -> String {
        if self.colored {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    fn write_target(&self, out: &mut String, target: &TargetView) -> std::fmt::Result {
        let mut header = self.green(&target.target_framework);
        if !target.full_name.is_empty() && target.full_name != target.target_framework {
            header.push_str(&format!(" ({})", target.full_name));
        }
        if target.is_active {
            header.push_str(&self.bold(" [active]"));
        }
        writeln!(out, "{}", header)?;

        if target.groups.is_empty() {
            writeln!(out, "{}{}", LAST_BRANCH, self.dimmed("(no dependencies)"))?;
            return Ok(());
        }

        let last = target.groups.len() - 1;
        for (index, group) in target.groups.iter().enumerate() {
            self.write_group(out, group, index == last)?;
        }
        Ok(())
    }

    fn write_group(
        &self,
        out: &mut String,
        group: &ProviderGroupView,
        is_last: bool,
    ) -> std::fmt::Result {
        let branch = if is_last { LAST_BRANCH } else { BRANCH };
        let indent = if is_last { SPACE } else { PIPE };

        let mut caption = self.bold(&group.caption);
        if group.has_unresolved {
            caption.push(' ');
            caption.push_str(&self.yellow(WARNING_MARK));
        }
        writeln!(out, "{}{}", branch, caption)?;

        let last = group.dependencies.len().saturating_sub(1);
        for (index, node) in group.dependencies.iter().enumerate() {
            let node_branch = if index == last { LAST_BRANCH } else { BRANCH };
            writeln!(out, "{}{}{}", indent, node_branch, self.node_line(node))?;
        }
        Ok(())
    }

    fn node_line(&self, node: &DependencyNodeView) -> String {
        let mut line = if node.appears_unresolved {
            format!("{} {}", self.yellow(WARNING_MARK), self.yellow(&node.caption))
        } else {
            node.caption.clone()
        };

        let mut tags = Vec::new();
        if !node.resolved {
            tags.push("unresolved".to_string());
        }
        if node.implicit {
            tags.push("implicit".to_string());
        }
        if !node.visible {
            tags.push("hidden".to_string());
        }
        if !node.children.is_empty() {
            tags.push(format!("{} dependencies", node.children.len()));
        }
        if !tags.is_empty() {
            line.push(' ');
            line.push_str(&self.dimmed(&format!("[{}]", tags.join(", "))));
        }
        line
    }

    fn write_model(&self, out: &mut String, model: &SnapshotReadModel) -> std::fmt::Result {
        writeln!(out, "{}", self.bold(&model.project_path))?;
        match &model.active_target_framework {
            Some(active) => writeln!(out, "Active target framework: {}", self.green(active))?,
            None => writeln!(out, "Active target framework: {}", self.dimmed("(none)"))?,
        }
        if model.has_visible_unresolved_dependency {
            writeln!(
                out,
                "{}",
                self.yellow(&format!("{} Some dependencies are unresolved", WARNING_MARK))
            )?;
        }

        for target in &model.targets {
            writeln!(out)?;
            self.write_target(out, target)?;
        }
        Ok(())
    }
}

impl SnapshotFormatter for TreeFormatter {
    fn format(&self, model: &SnapshotReadModel) -> Result<String> {
        let mut out = String::new();
        self.write_model(&mut out, model)
            .map_err(|e| anyhow::anyhow!("Failed to render dependency tree: {}", e))?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::read_models::{IconView, ReportMetadata};
    use crate::snapshot_engine::domain::KnownMonikers;
    use std::collections::BTreeMap;

    fn node(caption: &str, resolved: bool, appears_unresolved: bool) -> DependencyNodeView {
        DependencyNodeView {
            id: format!("net6.0/NuGetDependency/{}", caption),
            caption: caption.to_string(),
            path: None,
            schema_name: String::new(),
            priority: 0,
            resolved,
            appears_unresolved,
            implicit: false,
            visible: true,
            icon: IconView::from(KnownMonikers::NUGET),
            properties: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    fn model(groups: Vec<ProviderGroupView>) -> SnapshotReadModel {
        SnapshotReadModel {
            metadata: ReportMetadata::new(
                "2026-01-15T10:30:00Z".to_string(),
                "depsnap".to_string(),
                "0.4.0".to_string(),
                "urn:uuid:test".to_string(),
            ),
            project_path: "/src/App/App.csproj".to_string(),
            active_target_framework: Some("net6.0".to_string()),
            has_visible_unresolved_dependency: groups.iter().any(|g| g.has_unresolved),
            targets: vec![TargetView {
                target_framework: "net6.0".to_string(),
                full_name: "net6.0".to_string(),
                is_active: true,
                has_visible_unresolved_dependency: false,
                groups,
            }],
        }
    }

    fn packages(dependencies: Vec<DependencyNodeView>) -> ProviderGroupView {
        ProviderGroupView {
            provider_type: "NuGetDependency".to_string(),
            caption: "Packages".to_string(),
            icon: IconView::from(KnownMonikers::FOLDER_CLOSED),
            has_unresolved: dependencies.iter().any(|d| d.appears_unresolved),
            dependencies,
        }
    }

    #[test]
    fn test_plain_tree_layout() {
        let output = TreeFormatter::new(false)
            .format(&model(vec![packages(vec![
                node("Alpha", true, false),
                node("Beta", true, false),
            ])]))
            .unwrap();

        let expected = [
            "/src/App/App.csproj",
            "Active target framework: net6.0",
            "",
            "net6.0 [active]",
            "└── Packages",
            "    ├── Alpha",
            "    └── Beta",
            "",
        ]
        .join("\n");
        assert_eq!(output, expected);
    }

    #[test]
    fn test_unresolved_nodes_are_marked() {
        let output = TreeFormatter::new(false)
            .format(&model(vec![packages(vec![node("Missing", false, true)])]))
            .unwrap();

        assert!(output.contains("Some dependencies are unresolved"));
        assert!(output.contains("└── Packages ⚠"));
        assert!(output.contains("⚠ Missing [unresolved]"));
    }

    #[test]
    fn test_empty_target() {
        let output = TreeFormatter::new(false).format(&model(Vec::new())).unwrap();
        assert!(output.ends_with("└── (no dependencies)\n"));
    }

    #[test]
    fn test_colored_output_contains_escape_codes() {
        let plain = TreeFormatter::new(false).format(&model(Vec::new())).unwrap();
        let colored = TreeFormatter::new(true).format(&model(Vec::new())).unwrap();
        assert!(!plain.contains('\u{1b}'));
        assert!(colored.contains('\u{1b}'));
    }
}
