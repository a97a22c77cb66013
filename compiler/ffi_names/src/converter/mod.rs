//! Configurable name converters.
//!
//! A [`NameConverter`] strips and adds literal affixes, then re-cases the
//! result. Converters are layered: every identifier kind has its own
//! converter, which runs a shared converter (the `all` converter, itself
//! layered over an optional per-file converter) between its affix and case
//! steps. Layering is flattened into an ordered [`ConverterChain`] once, when
//! a module starts, so converting a name is a walk over a short step list.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::case::{convert_case, NameCase, NameVariant};

/// Errors from converter configuration or from converting a name.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ConverterError {
    #[error("the `{converter}` converter must use the preserving case, found `{case}`")]
    SharedCase { converter: String, case: NameCase },

    #[error("the `{converter}` converter must not add a prefix, found `{prefix}`")]
    SharedPrefix { converter: String, prefix: String },

    #[error(
        "the `{converter}` converter keeps the original case, so its added prefix `{prefix}` \
         must start with {expected}"
    )]
    BadInitial {
        converter: String,
        prefix: String,
        expected: &'static str,
    },

    #[error("`{raw}` converts to an empty identifier")]
    EmptyName { raw: String },
}

/// Literal affixes stripped before and added after conversion.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Affixes {
    pub remove_prefix: String,
    pub remove_suffix: String,
    pub add_prefix: String,
    pub add_suffix: String,
}

impl Affixes {
    pub fn is_identity(&self) -> bool {
        self.remove_prefix.is_empty()
            && self.remove_suffix.is_empty()
            && self.add_prefix.is_empty()
            && self.add_suffix.is_empty()
    }

    /// Strip the configured prefix and suffix when they match literally,
    /// then add the configured ones.
    pub fn apply(&self, name: &str) -> String {
        let name = name.strip_prefix(self.remove_prefix.as_str()).unwrap_or(name);
        let name = name.strip_suffix(self.remove_suffix.as_str()).unwrap_or(name);
        let mut out =
            String::with_capacity(self.add_prefix.len() + name.len() + self.add_suffix.len());
        out.push_str(&self.add_prefix);
        out.push_str(name);
        out.push_str(&self.add_suffix);
        out
    }
}

/// One converter as written in the configuration file.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NameConverter {
    pub case: NameCase,
    #[serde(flatten)]
    pub affixes: Affixes,
}

impl NameConverter {
    pub fn new(case: NameCase) -> Self {
        NameConverter {
            case,
            affixes: Affixes::default(),
        }
    }

    #[must_use]
    pub fn with_affixes(mut self, affixes: Affixes) -> Self {
        self.affixes = affixes;
        self
    }

    /// Check a converter that is layered under per-kind converters: it may
    /// only strip and append, never re-case or prepend.
    pub fn validate_shared(&self, converter: &str) -> Result<(), ConverterError> {
        if self.case != NameCase::Preserving {
            return Err(ConverterError::SharedCase {
                converter: converter.to_owned(),
                case: self.case,
            });
        }
        if !self.affixes.add_prefix.is_empty() {
            return Err(ConverterError::SharedPrefix {
                converter: converter.to_owned(),
                prefix: self.affixes.add_prefix.clone(),
            });
        }
        Ok(())
    }

    /// Check a per-kind converter. Re-casing converters always force the
    /// right initial; a preserving one relies on its added prefix.
    pub fn validate_for(&self, converter: &str, variant: NameVariant) -> Result<(), ConverterError> {
        if self.case != NameCase::Preserving || variant == NameVariant::Preserving {
            return Ok(());
        }
        let prefix = &self.affixes.add_prefix;
        if variant.accepts_initial(prefix) {
            return Ok(());
        }
        let expected = if variant.forced_initial_upper() == Some(true) {
            "an upper-case letter"
        } else {
            "a lower-case letter or `_`"
        };
        Err(ConverterError::BadInitial {
            converter: converter.to_owned(),
            prefix: prefix.clone(),
            expected,
        })
    }
}

#[derive(Clone, Eq, PartialEq, Debug)]
enum Step {
    Affix(Affixes),
    Case(NameCase, NameVariant),
}

/// A flattened sequence of conversion steps.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct ConverterChain {
    steps: SmallVec<[Step; 4]>,
}

impl ConverterChain {
    /// The chain of a single converter: its affixes, then its case.
    pub fn single(converter: &NameConverter, variant: NameVariant) -> Self {
        Self::layered(converter, variant, &ConverterChain::default(), false)
    }

    /// Layer `converter` over `parent`.
    ///
    /// The converter's affixes always come first. The parent runs before
    /// the converter's own case conversion, or after it when `afterward`.
    pub fn layered(
        converter: &NameConverter,
        variant: NameVariant,
        parent: &ConverterChain,
        afterward: bool,
    ) -> Self {
        let mut steps = SmallVec::new();
        if !converter.affixes.is_identity() {
            steps.push(Step::Affix(converter.affixes.clone()));
        }
        let case = (converter.case != NameCase::Preserving)
            .then_some(Step::Case(converter.case, variant));
        if afterward {
            steps.extend(case.clone());
            steps.extend(parent.steps.iter().cloned());
        } else {
            steps.extend(parent.steps.iter().cloned());
            steps.extend(case);
        }
        ConverterChain { steps }
    }

    /// Convert one raw identifier.
    pub fn convert(&self, raw: &str) -> Result<String, ConverterError> {
        let mut name = raw.to_owned();
        for step in &self.steps {
            name = match step {
                Step::Affix(affixes) => affixes.apply(&name),
                Step::Case(case, variant) => convert_case(&name, *case, *variant)
                    .ok_or_else(|| ConverterError::EmptyName { raw: raw.to_owned() })?,
            };
        }
        if name.is_empty() {
            return Err(ConverterError::EmptyName { raw: raw.to_owned() });
        }
        Ok(name)
    }
}

/// The per-kind converters of one configuration.
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterBundle {
    /// Layered under every other converter; preserving case only.
    pub all: NameConverter,
    pub module: NameConverter,
    #[serde(rename = "type")]
    pub type_ctor: NameConverter,
    #[serde(rename = "ctor")]
    pub data_ctor: NameConverter,
    #[serde(rename = "var")]
    pub variable: NameConverter,
}

impl Default for ConverterBundle {
    fn default() -> Self {
        ConverterBundle {
            all: NameConverter::default(),
            module: NameConverter::new(NameCase::Camel),
            type_ctor: NameConverter::new(NameCase::Camel),
            data_ctor: NameConverter::new(NameCase::Camel),
            variable: NameConverter::new(NameCase::Camel),
        }
    }
}

impl ConverterBundle {
    /// Every problem with this bundle, not just the first.
    pub fn validate(&self) -> Vec<ConverterError> {
        let checks = [
            self.all.validate_shared("all"),
            self.module.validate_for("module", NameVariant::ModuleName),
            self.type_ctor.validate_for("type", NameVariant::TypeCtor),
            self.data_ctor.validate_for("ctor", NameVariant::DataCtor),
            self.variable.validate_for("var", NameVariant::Variable),
        ];
        checks.into_iter().filter_map(Result::err).collect()
    }

    /// The shared `all` chain, with the file converter (if any) run after
    /// the `all` converter's own steps.
    pub fn shared_chain(&self, file: Option<&NameConverter>) -> ConverterChain {
        let file_chain = file
            .map(|f| ConverterChain::single(f, NameVariant::Preserving))
            .unwrap_or_default();
        ConverterChain::layered(&self.all, NameVariant::Preserving, &file_chain, true)
    }

    /// The full chain for one identifier variant.
    pub fn chain(&self, variant: NameVariant, file: Option<&NameConverter>) -> ConverterChain {
        let converter = match variant {
            NameVariant::Preserving => return self.shared_chain(file),
            NameVariant::ModuleName => &self.module,
            NameVariant::TypeCtor => &self.type_ctor,
            NameVariant::DataCtor => &self.data_ctor,
            NameVariant::Variable => &self.variable,
        };
        ConverterChain::layered(converter, variant, &self.shared_chain(file), false)
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
