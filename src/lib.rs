//! dependency-snapshots - Incremental dependency snapshots for project systems
//!
//! This library keeps an immutable, filtered view of a project's
//! dependencies per target framework. Each batch of raw dependency changes
//! is run through an ordered filter pipeline and folded into a new snapshot
//! that shares every untouched dependency with the previous one.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`snapshot_engine`): Snapshots, filters and the
//!   unresolved-descendant search
//! - **Application Layer** (`application`): Change-log replay, read models and factories
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): File system, console, formatter and
//!   subtree-provider implementations
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use dependency_snapshots::prelude::*;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<()> {
//! let use_case = ReplayChangesUseCase::new(
//!     FileSystemReader::new(),
//!     StderrProgressReporter::new(),
//!     builtin_registry(),
//! );
//!
//! let request = ReplayRequest::new(PathBuf::from("changes.yml"), vec![]);
//! let response = use_case.replay(request)?;
//!
//! let model = SnapshotReadModelBuilder::new(use_case.subtree_providers())
//!     .build(&response.snapshot, ReportMetadata::generate_default());
//! println!("{}", TreeFormatter::new(false).format(&model)?);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod ports;
pub mod shared;
pub mod snapshot_engine;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{JsonFormatter, TreeFormatter};
    pub use crate::adapters::outbound::providers::builtin_registry;
    pub use crate::application::dto::{OutputFormat, ReplayRequest, ReplayResponse};
    pub use crate::application::read_models::{ReportMetadata, SnapshotReadModelBuilder};
    pub use crate::application::use_cases::ReplayChangesUseCase;
    pub use crate::ports::inbound::SnapshotReplayPort;
    pub use crate::ports::outbound::{
        ChangeLogReader, OutputPresenter, ProgressReporter, SnapshotFormatter,
    };
    pub use crate::shared::Result;
    pub use crate::snapshot_engine::domain::{
        DependenciesChanges, DependenciesChangesBuilder, DependenciesSnapshot, Dependency,
        DependencyModel, SnapshotEnvironment, SubtreeProviderRegistry, TargetFramework,
        TargetedDependenciesSnapshot,
    };
    pub use crate::snapshot_engine::filters::FilterPipeline;
}
