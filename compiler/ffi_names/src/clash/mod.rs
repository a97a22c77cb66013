//! Clash reports and host keyword sets.

use std::fmt;

use ffi_diagnostic::{Diagnostic, ErrorCode};
use ffi_ir::ScopedName;
use rustc_hash::FxHashSet;

use crate::NameKind;

/// Reserved words of a host language.
#[derive(Clone, Debug, Default)]
pub struct KeywordSet {
    words: FxHashSet<&'static str>,
}

impl KeywordSet {
    pub fn new(words: &[&'static str]) -> Self {
        KeywordSet {
            words: words.iter().copied().collect(),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Why a group of source names was reported.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ClashReason {
    /// More than one source name produced the output name.
    Duplicate,
    /// The output name is a reserved keyword.
    Keyword,
}

/// One clashing output identifier.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct NameClash {
    pub kind: NameKind,
    /// The module whose resolver found the clash; `None` for module names,
    /// which share one global namespace.
    pub module: Option<String>,
    pub output: String,
    /// Every source name that produced `output`, in order.
    pub sources: Vec<ScopedName>,
    pub reason: ClashReason,
}

impl NameClash {
    pub fn to_diagnostic(&self) -> Diagnostic {
        let scope = match &self.module {
            Some(module) => format!("module `{module}`"),
            None => "(global)".to_owned(),
        };
        let sources = self
            .sources
            .iter()
            .map(|s| format!("`{s}`"))
            .collect::<Vec<_>>()
            .join(", ");
        match self.reason {
            ClashReason::Duplicate => Diagnostic::error(ErrorCode::E3001)
                .with_message(format!(
                    "{} name clash in {scope}: `{}` is produced by {sources}",
                    self.kind, self.output
                ))
                .with_suggestion("add a name override or adjust the name converters"),
            ClashReason::Keyword => Diagnostic::error(ErrorCode::E3002)
                .with_message(format!(
                    "{} name clash in {scope}: `{}` (from {sources}) is a reserved keyword",
                    self.kind, self.output
                ))
                .with_suggestion("add a name override or an affix to the converter"),
        }
    }
}

impl fmt::Display for NameClash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} `{}` <- ", self.kind, self.output)?;
        for (i, source) in self.sources.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{source}")?;
        }
        Ok(())
    }
}
