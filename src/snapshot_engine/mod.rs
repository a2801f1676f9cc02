//! Dependency snapshot engine
//!
//! Pure domain logic: dependency entities, immutable per-target and aggregate
//! snapshots, the ordered filter pipeline that mediates every change, and the
//! string comparison policies that define dependency identity. Nothing in
//! this module performs I/O.

pub mod domain;
pub mod filters;
pub mod policies;
pub mod services;
