use std::borrow::Cow;

/// How two strings are compared
///
/// `OrdinalIgnoreCase` folds each character to its simple upper-case mapping.
/// Characters whose upper case is more than one character (`ß`) are kept
/// as they are, so folding never changes the number of characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringComparison {
    Ordinal,
    OrdinalIgnoreCase,
}

fn fold_char(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(folded), None) => folded,
        _ => c,
    }
}

impl StringComparison {
    /// Returns the canonical form of `value` under this comparison
    ///
    /// Two strings are equal under the comparison iff their normalized forms are equal.
    pub fn normalize<'a>(self, value: &'a str) -> Cow<'a, str> {
        match self {
            StringComparison::Ordinal => Cow::Borrowed(value),
            StringComparison::OrdinalIgnoreCase => {
                if value.chars().all(|c| fold_char(c) == c) {
                    Cow::Borrowed(value)
                } else {
                    Cow::Owned(value.chars().map(fold_char).collect())
                }
            }
        }
    }

    pub fn equals(self, left: &str, right: &str) -> bool {
        match self {
            StringComparison::Ordinal => left == right,
            StringComparison::OrdinalIgnoreCase => {
                left.eq_ignore_ascii_case(right)
                    || left.chars().map(fold_char).eq(right.chars().map(fold_char))
            }
        }
    }

    pub fn starts_with(self, value: &str, prefix: &str) -> bool {
        match self {
            StringComparison::Ordinal => value.starts_with(prefix),
            StringComparison::OrdinalIgnoreCase => self
                .normalize(value)
                .starts_with(self.normalize(prefix).as_ref()),
        }
    }
}

/// StringComparers policy: one comparison per kind of string in the dependency model
///
/// Every lookup and de-duplication in the engine goes through these groups,
/// so changing a policy here changes it everywhere.
pub struct StringComparers;

impl StringComparers {
    /// Item specs and ids of dependencies
    pub const DEPENDENCY_IDS: StringComparison = StringComparison::OrdinalIgnoreCase;

    /// Provider type tags ("NuGetDependency", "SdkDependency", ...)
    pub const DEPENDENCY_PROVIDER_TYPES: StringComparison = StringComparison::OrdinalIgnoreCase;

    /// Captions shown in the tree, used when detecting duplicates
    pub const DEPENDENCY_CAPTIONS: StringComparison = StringComparison::OrdinalIgnoreCase;

    /// Target framework monikers and full names
    pub const FRAMEWORK_NAMES: StringComparison = StringComparison::OrdinalIgnoreCase;

    /// File system paths, including project item specs and project paths
    pub const PATHS: StringComparison = StringComparison::Ordinal;
}
