//! Read models for CQRS-lite pattern
//!
//! This module contains view-optimized structs that provide
//! a denormalized representation of snapshots for rendering.

pub mod report_metadata;
pub mod snapshot_read_model;
pub mod snapshot_read_model_builder;

pub use report_metadata::ReportMetadata;
pub use snapshot_read_model::{
    DependencyNodeView, IconView, ProviderGroupView, SnapshotReadModel, TargetView,
};
pub use snapshot_read_model_builder::SnapshotReadModelBuilder;
