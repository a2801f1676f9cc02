mod string_comparers;

pub use string_comparers::{StringComparers, StringComparison};
