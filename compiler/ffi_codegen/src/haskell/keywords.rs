//! Reserved identifiers of Haskell.

use ffi_names::KeywordSet;

/// Haskell 2010 reserved words, plus `forall` (reserved in types under
/// `RankNTypes`) and `pattern` (reserved at top level under
/// `PatternSynonyms`).
pub const HASKELL_KEYWORDS: &[&str] = &[
    "_", "case", "class", "data", "default", "deriving", "do", "else", "forall", "foreign", "if",
    "import", "in", "infix", "infixl", "infixr", "instance", "let", "module", "newtype", "of",
    "pattern", "then", "type", "where",
];

pub fn haskell_keywords() -> KeywordSet {
    KeywordSet::new(HASKELL_KEYWORDS)
}
