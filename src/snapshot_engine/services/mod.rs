mod unresolved_search;

pub use unresolved_search::{UnresolvedDescendantSearch, MAX_RECURSION_DEPTH};
