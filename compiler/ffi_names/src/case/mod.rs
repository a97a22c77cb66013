//! Word segmentation and case conversion.
//!
//! An identifier is split into words at separators (`foo_bar`) and at
//! lower-to-upper transitions (`fooBar`). A leading acronym stays one word
//! (`HTTPServer` is `HTTP`, `Server`). Words are then re-cased and joined
//! according to a [`NameCase`]; a [`NameVariant`] finally forces the case of
//! the first letter so the result is a legal identifier of its kind.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// How words of an identifier are cased and joined.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameCase {
    /// Leave the identifier untouched.
    #[default]
    Preserving,
    /// `FooBarBaz`
    Camel,
    /// `foo_bar_baz`
    SnakeAllLower,
    /// `Foo_Bar_Baz`
    SnakeInitUpper,
    /// `FOO_BAR_BAZ`
    SnakeAllUpper,
}

impl NameCase {
    /// Joiner placed between converted words.
    pub fn separator(self) -> &'static str {
        match self {
            NameCase::Preserving | NameCase::Camel => "",
            NameCase::SnakeAllLower | NameCase::SnakeInitUpper | NameCase::SnakeAllUpper => "_",
        }
    }
}

impl fmt::Display for NameCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NameCase::Preserving => "preserving",
            NameCase::Camel => "camel",
            NameCase::SnakeAllLower => "snake_all_lower",
            NameCase::SnakeInitUpper => "snake_init_upper",
            NameCase::SnakeAllUpper => "snake_all_upper",
        };
        f.write_str(name)
    }
}

/// Which kind of host identifier a name becomes, and so which case its
/// first letter must have.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameVariant {
    /// No forced initial.
    #[default]
    Preserving,
    /// Lower-case initial.
    Variable,
    /// Upper-case initial.
    ModuleName,
    /// Upper-case initial.
    TypeCtor,
    /// Upper-case initial.
    DataCtor,
}

impl NameVariant {
    /// Whether the first letter must be upper-case (`Some(true)`),
    /// lower-case (`Some(false)`) or is left alone (`None`).
    pub fn forced_initial_upper(self) -> Option<bool> {
        match self {
            NameVariant::Preserving => None,
            NameVariant::Variable => Some(false),
            NameVariant::ModuleName | NameVariant::TypeCtor | NameVariant::DataCtor => Some(true),
        }
    }

    /// Whether `name` starts the way this variant requires.
    pub fn accepts_initial(self, name: &str) -> bool {
        let Some(first) = name.chars().next() else {
            return false;
        };
        match self.forced_initial_upper() {
            None => true,
            Some(true) => first.is_ascii_uppercase(),
            Some(false) => first.is_ascii_lowercase() || first == '_',
        }
    }
}

/// Split an identifier into words.
///
/// Non-alphanumeric characters separate words and are dropped. Inside a run
/// of alphanumerics a word ends before an upper-case letter that follows a
/// non-upper-case character, or before the last letter of an upper-case run
/// that is followed by a lower-case letter. A run without lower-case letters
/// is one word. Empty input yields no words.
pub fn segment(name: &str) -> SmallVec<[&str; 4]> {
    let mut words = SmallVec::new();
    for run in name.split(|c: char| !c.is_ascii_alphanumeric()) {
        if run.is_empty() {
            continue;
        }
        split_camel(run, &mut words);
    }
    words
}

fn split_camel<'a>(run: &'a str, words: &mut SmallVec<[&'a str; 4]>) {
    let bytes = run.as_bytes();
    if !bytes.iter().any(u8::is_ascii_lowercase) {
        words.push(run);
        return;
    }

    let mut start = 0;
    for i in 1..bytes.len() {
        if !bytes[i].is_ascii_uppercase() {
            continue;
        }
        let after_lower = !bytes[i - 1].is_ascii_uppercase();
        let ends_acronym = bytes[i - 1].is_ascii_uppercase()
            && bytes.get(i + 1).is_some_and(u8::is_ascii_lowercase);
        if after_lower || ends_acronym {
            words.push(&run[start..i]);
            start = i;
        }
    }
    words.push(&run[start..]);
}

fn convert_word(word: &str, case: NameCase, out: &mut String) {
    match case {
        NameCase::Preserving => out.push_str(word),
        NameCase::SnakeAllUpper => out.extend(word.chars().map(|c| c.to_ascii_uppercase())),
        NameCase::SnakeAllLower => out.extend(word.chars().map(|c| c.to_ascii_lowercase())),
        NameCase::Camel | NameCase::SnakeInitUpper => {
            let mut chars = word.chars();
            if let Some(first) = chars.next() {
                out.push(first.to_ascii_uppercase());
            }
            out.extend(chars.map(|c| c.to_ascii_lowercase()));
        }
    }
}

/// Re-case `name` and force its initial.
///
/// Returns `None` when `name` has no words to convert, so callers never
/// produce an empty identifier by accident. A preserving case returns the
/// input unchanged, initial included.
pub fn convert_case(name: &str, case: NameCase, variant: NameVariant) -> Option<String> {
    if case == NameCase::Preserving {
        return (!name.is_empty()).then(|| name.to_owned());
    }

    let words = segment(name);
    if words.is_empty() {
        return None;
    }

    let mut out = String::with_capacity(name.len());
    for (i, word) in words.iter().enumerate() {
        if i > 0 {
            out.push_str(case.separator());
        }
        convert_word(word, case, &mut out);
    }

    if let Some(upper) = variant.forced_initial_upper() {
        force_initial(&mut out, upper);
    }
    Some(out)
}

fn force_initial(name: &mut String, upper: bool) {
    if let Some(first) = name.get(..1) {
        let forced = if upper {
            first.to_ascii_uppercase()
        } else {
            first.to_ascii_lowercase()
        };
        name.replace_range(..1, &forced);
    }
}
