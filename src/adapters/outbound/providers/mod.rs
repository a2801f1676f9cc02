//! Subtree providers for the built-in dependency kinds

mod builtin_provider;

pub use builtin_provider::{builtin_registry, BuiltinSubtreeProvider};
