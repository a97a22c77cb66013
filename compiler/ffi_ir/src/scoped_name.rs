//! Scope-qualified identifiers used as name-resolution keys.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An identifier qualified by its enclosing struct, enum or module.
///
/// Ordering is lexicographic on `(scope, name)`, which keeps clash reports
/// deterministic. An empty scope means "module level".
#[derive(Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ScopedName {
    pub scope: String,
    pub name: String,
}

impl ScopedName {
    pub fn new(scope: impl Into<String>, name: impl Into<String>) -> Self {
        ScopedName {
            scope: scope.into(),
            name: name.into(),
        }
    }

    /// A name at module level (empty scope).
    pub fn unscoped(name: impl Into<String>) -> Self {
        Self::new(String::new(), name)
    }
}

impl fmt::Display for ScopedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.scope.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}::{}", self.scope, self.name)
        }
    }
}
