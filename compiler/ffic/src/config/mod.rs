//! Run configuration.
//!
//! One YAML file describes one run: which front-end dumps to process, how to
//! translate them, how to name things and where to write the result. Every
//! field has a default, so an empty file is a valid (if useless) config.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use ffi_codegen::{HaskellOptions, TargetLayout};
use ffi_diagnostic::{Diagnostic, ErrorCode};
use ffi_names::{ConverterBundle, NameConverter, NameOverrides, NamespacePolicy};
use ffi_translate::TranslatePolicy;
use serde::{Deserialize, Serialize};

/// Errors loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read configuration file `{}`: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid configuration file `{}`: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

impl ConfigError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(ErrorCode::E0001).with_message(self.to_string())
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "mirrors the flat switches of the configuration file"
)]
pub struct Config {
    /// Output modules are named `<library_name>.LowLevel.<Module>`.
    pub library_name: String,
    /// Prefix stripped from source file names before they become module
    /// names.
    pub root_directory: String,
    pub output_directory: PathBuf,
    /// Front-end dumps to process, in order.
    pub file_names: Vec<String>,
    /// Files whose declarations from included non-system headers are public
    /// API as well.
    pub header_group: Vec<String>,
    /// Forwarded to the front end.
    pub compiler_options: Vec<String>,

    pub allow_custom_fixed_size_int: bool,
    pub assume_extern_c: bool,
    pub warn_no_c_linkage: bool,
    pub warn_no_external_formal_linkage: bool,

    pub void_ptr_as_any_ptr: bool,
    pub allow_rank_n_types: bool,
    /// Generate `Storable` instances. Offsets assume natural layout, so
    /// packed structs get wrong instances.
    pub storable_instances: bool,
    pub target: TargetLayout,

    pub converters: ConverterBundle,
    /// Layered under the `all` converter for one file.
    pub file_converters: BTreeMap<String, NameConverter>,
    /// Explicit module names, keyed by file.
    pub module_names: BTreeMap<String, String>,
    /// Explicit identifier names, keyed by module name.
    pub name_overrides: BTreeMap<String, NameOverrides>,
    pub namespaces: NamespacePolicy,
}

impl Default for Config {
    fn default() -> Self {
        let policy = TranslatePolicy::default();
        let haskell = HaskellOptions::default();
        Config {
            library_name: haskell.library_name,
            root_directory: String::new(),
            output_directory: PathBuf::from("out"),
            file_names: Vec::new(),
            header_group: Vec::new(),
            compiler_options: Vec::new(),
            allow_custom_fixed_size_int: policy.allow_custom_fixed_size_int,
            assume_extern_c: policy.assume_extern_c,
            warn_no_c_linkage: policy.warn_no_c_linkage,
            warn_no_external_formal_linkage: policy.warn_no_external_formal_linkage,
            void_ptr_as_any_ptr: haskell.void_ptr_as_any_ptr,
            allow_rank_n_types: haskell.allow_rank_n_types,
            storable_instances: haskell.storable_instances,
            target: haskell.target,
            converters: ConverterBundle::default(),
            file_converters: BTreeMap::new(),
            module_names: BTreeMap::new(),
            name_overrides: BTreeMap::new(),
            namespaces: NamespacePolicy::default(),
        }
    }
}

impl Config {
    pub fn from_yaml(text: &str) -> Result<Config, serde_yaml::Error> {
        // An empty document deserializes as unit, not as an empty map.
        if text.trim().is_empty() {
            return Ok(Config::default());
        }
        serde_yaml::from_str(text)
    }

    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        Config::from_yaml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    /// Every problem with this configuration. Any error means the whole
    /// configuration is skipped.
    pub fn validate(&self) -> Vec<Diagnostic> {
        let mut diags = Vec::new();
        let invalid = |err: &dyn std::fmt::Display| {
            Diagnostic::error(ErrorCode::E0002).with_message(err.to_string())
        };

        for err in self.converters.validate() {
            diags.push(invalid(&err));
        }
        for (file, converter) in &self.file_converters {
            if let Err(err) = converter.validate_shared(&format!("file_converters.{file}")) {
                diags.push(invalid(&err));
            }
        }

        let empty = |what: String| {
            Diagnostic::error(ErrorCode::E0003).with_message(format!("{what} is empty"))
        };
        if self.library_name.is_empty() {
            diags.push(empty("`library_name`".to_string()));
        }
        for (file, name) in &self.module_names {
            if name.is_empty() {
                diags.push(empty(format!("the module name for `{file}`")));
            }
        }
        for (module, overrides) in &self.name_overrides {
            for raw in overrides.empty_outputs() {
                diags.push(empty(format!(
                    "the name override for `{raw}` in module `{module}`"
                )));
            }
        }

        if self.allow_rank_n_types && !self.void_ptr_as_any_ptr {
            diags.push(
                Diagnostic::warning(ErrorCode::E0004)
                    .with_message("`allow_rank_n_types` has no effect")
                    .with_note("RankNTypes is only needed to quantify `void*` record fields")
                    .with_suggestion("enable `void_ptr_as_any_ptr` or disable `allow_rank_n_types`"),
            );
        }
        diags
    }

    /// Translation switches for one file.
    pub fn translate_policy(&self, file: &str) -> TranslatePolicy {
        TranslatePolicy {
            allow_custom_fixed_size_int: self.allow_custom_fixed_size_int,
            assume_extern_c: self.assume_extern_c,
            warn_no_c_linkage: self.warn_no_c_linkage,
            warn_no_external_formal_linkage: self.warn_no_external_formal_linkage,
            header_group: self.header_group.iter().any(|f| f == file),
        }
    }

    pub fn haskell_options(&self) -> HaskellOptions {
        HaskellOptions {
            library_name: self.library_name.clone(),
            void_ptr_as_any_ptr: self.void_ptr_as_any_ptr,
            allow_rank_n_types: self.allow_rank_n_types,
            storable_instances: self.storable_instances,
            target: self.target,
        }
    }
}
