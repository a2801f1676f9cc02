use super::image_moniker::{DependencyIconSet, ImageMoniker, KnownMonikers};
use crate::snapshot_engine::policies::StringComparers;
use std::fmt;

/// Provider type tags of the built-in dependency kinds
pub mod provider_types {
    pub const PACKAGE: &str = "NuGetDependency";
    pub const SDK: &str = "SdkDependency";
    pub const ASSEMBLY: &str = "AssemblyDependency";
    pub const PROJECT: &str = "ProjectDependency";
    pub const ANALYZER: &str = "AnalyzerDependency";
}

/// Rule schema names attached to dependencies
pub mod schema_names {
    pub const RESOLVED_PACKAGE_REFERENCE: &str = "ResolvedPackageReference";
    pub const PACKAGE_REFERENCE: &str = "PackageReference";
    pub const RESOLVED_SDK_REFERENCE: &str = "ResolvedSdkReference";
    pub const SDK_REFERENCE: &str = "SdkReference";
    pub const RESOLVED_ASSEMBLY_REFERENCE: &str = "ResolvedAssemblyReference";
    pub const ASSEMBLY_REFERENCE: &str = "AssemblyReference";
    pub const RESOLVED_PROJECT_REFERENCE: &str = "ResolvedProjectReference";
    pub const PROJECT_REFERENCE: &str = "ProjectReference";
    pub const RESOLVED_ANALYZER_REFERENCE: &str = "ResolvedAnalyzerReference";
    pub const ANALYZER_REFERENCE: &str = "AnalyzerReference";
}

/// Sort order hints; lower values sort first in the tree
pub mod priorities {
    pub const SDK: i32 = 100;
    pub const PACKAGE: i32 = 110;
    pub const PROJECT: i32 = 120;
    pub const ASSEMBLY: i32 = 130;
    pub const ANALYZER: i32 = 140;
    pub const UNRESOLVED_REFERENCE: i32 = 1000;
}

/// The dependency kinds produced by the built-in rule handlers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DependencyKind {
    Sdk,
    Package,
    Project,
    Assembly,
    Analyzer,
}

impl DependencyKind {
    pub const ALL: [DependencyKind; 5] = [
        DependencyKind::Sdk,
        DependencyKind::Package,
        DependencyKind::Project,
        DependencyKind::Assembly,
        DependencyKind::Analyzer,
    ];

    pub fn provider_type(self) -> &'static str {
        match self {
            DependencyKind::Sdk => provider_types::SDK,
            DependencyKind::Package => provider_types::PACKAGE,
            DependencyKind::Project => provider_types::PROJECT,
            DependencyKind::Assembly => provider_types::ASSEMBLY,
            DependencyKind::Analyzer => provider_types::ANALYZER,
        }
    }

    /// Looks up a kind by provider type (ignore case)
    pub fn from_provider_type(provider_type: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| {
            StringComparers::DEPENDENCY_PROVIDER_TYPES.equals(kind.provider_type(), provider_type)
        })
    }

    pub fn schema_name(self, resolved: bool) -> &'static str {
        use schema_names::*;
        match (self, resolved) {
            (DependencyKind::Sdk, true) => RESOLVED_SDK_REFERENCE,
            (DependencyKind::Sdk, false) => SDK_REFERENCE,
            (DependencyKind::Package, true) => RESOLVED_PACKAGE_REFERENCE,
            (DependencyKind::Package, false) => PACKAGE_REFERENCE,
            (DependencyKind::Project, true) => RESOLVED_PROJECT_REFERENCE,
            (DependencyKind::Project, false) => PROJECT_REFERENCE,
            (DependencyKind::Assembly, true) => RESOLVED_ASSEMBLY_REFERENCE,
            (DependencyKind::Assembly, false) => ASSEMBLY_REFERENCE,
            (DependencyKind::Analyzer, true) => RESOLVED_ANALYZER_REFERENCE,
            (DependencyKind::Analyzer, false) => ANALYZER_REFERENCE,
        }
    }

    /// MSBuild item type of the unresolved schema
    pub fn schema_item_type(self) -> &'static str {
        self.schema_name(false)
    }

    pub fn icon_set(self) -> DependencyIconSet {
        let (resolved, unresolved) = match self {
            DependencyKind::Sdk => (KnownMonikers::SDK, KnownMonikers::SDK_WARNING),
            DependencyKind::Package => (KnownMonikers::NUGET, KnownMonikers::NUGET_WARNING),
            DependencyKind::Project => {
                (KnownMonikers::APPLICATION, KnownMonikers::APPLICATION_WARNING)
            }
            DependencyKind::Assembly => {
                (KnownMonikers::REFERENCE, KnownMonikers::REFERENCE_WARNING)
            }
            DependencyKind::Analyzer => (
                KnownMonikers::CODE_INFORMATION,
                KnownMonikers::CODE_INFORMATION_WARNING,
            ),
        };
        DependencyIconSet::resolved_unresolved(resolved, unresolved)
    }

    /// Icon shown for dependencies brought in implicitly; analyzers have none
    pub fn implicit_icon(self) -> Option<ImageMoniker> {
        match self {
            DependencyKind::Sdk => Some(KnownMonikers::SDK_PRIVATE),
            DependencyKind::Package => Some(KnownMonikers::NUGET_PRIVATE),
            DependencyKind::Project => Some(KnownMonikers::APPLICATION_PRIVATE),
            DependencyKind::Assembly => Some(KnownMonikers::REFERENCE_PRIVATE),
            DependencyKind::Analyzer => None,
        }
    }

    pub fn priority(self, resolved: bool) -> i32 {
        if !resolved {
            return priorities::UNRESOLVED_REFERENCE;
        }
        match self {
            DependencyKind::Sdk => priorities::SDK,
            DependencyKind::Package => priorities::PACKAGE,
            DependencyKind::Project => priorities::PROJECT,
            DependencyKind::Assembly => priorities::ASSEMBLY,
            DependencyKind::Analyzer => priorities::ANALYZER,
        }
    }

    /// Caption of the group node under which this kind is shown
    pub fn group_caption(self) -> &'static str {
        match self {
            DependencyKind::Sdk => "SDK",
            DependencyKind::Package => "Packages",
            DependencyKind::Project => "Projects",
            DependencyKind::Assembly => "Assemblies",
            DependencyKind::Analyzer => "Analyzers",
        }
    }
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.provider_type())
    }
}
