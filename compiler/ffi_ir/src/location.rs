//! Source locations reported by the front end.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A position in a C/C++ source file.
///
/// Lines and columns are 1-based. The front end may omit locations for
/// synthesized declarations; those use [`SourceLocation::UNKNOWN`].
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct SourceLocation {
    #[serde(default)]
    pub file: String,
    #[serde(default)]
    pub line: u32,
    #[serde(default)]
    pub column: u32,
}

impl SourceLocation {
    /// Placeholder for declarations without a recorded position.
    pub const UNKNOWN: SourceLocation = SourceLocation {
        file: String::new(),
        line: 0,
        column: 0,
    };

    /// Create a new location.
    pub fn new(file: impl Into<String>, line: u32, column: u32) -> Self {
        SourceLocation {
            file: file.into(),
            line,
            column,
        }
    }

    /// Whether this location points at a real file position.
    pub fn is_known(&self) -> bool {
        !self.file.is_empty() && self.line > 0
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_known() {
            write!(f, "{}:{}:{}", self.file, self.line, self.column)
        } else {
            write!(f, "<unknown>")
        }
    }
}
