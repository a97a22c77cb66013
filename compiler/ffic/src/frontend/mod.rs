//! The C/C++ front end seam.
//!
//! Parsing C and C++ is left to an external compiler front end. The driver
//! only needs a [`TranslationUnit`] per input file; [`FrontEnd`] is the
//! boundary, and [`DumpFrontEnd`] reads units that a front end serialized to
//! disk.

use std::fs;
use std::path::{Path, PathBuf};

use ffi_diagnostic::{Diagnostic, ErrorCode};
use ffi_ir::TranslationUnit;
use tracing::debug;

/// Errors producing a translation unit. The file is skipped.
#[derive(Debug, thiserror::Error)]
pub enum FrontEndError {
    #[error("cannot read `{}`: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed YAML dump `{}`: {source}", .path.display())]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("malformed JSON dump `{}`: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl FrontEndError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(ErrorCode::E1001)
            .with_message(self.to_string())
            .with_note("the file is skipped")
    }
}

/// Produces the declarations of one source file.
pub trait FrontEnd {
    /// Parse `file`. `options` are the configured compiler options.
    fn parse(&mut self, file: &Path, options: &[String]) -> Result<TranslationUnit, FrontEndError>;
}

/// Reads translation units serialized as YAML, or as JSON when the file name
/// ends in `.json`.
#[derive(Clone, Copy, Debug, Default)]
pub struct DumpFrontEnd;

impl FrontEnd for DumpFrontEnd {
    fn parse(&mut self, file: &Path, options: &[String]) -> Result<TranslationUnit, FrontEndError> {
        debug!(file = %file.display(), options = options.len(), "reading front-end dump");
        let text = fs::read_to_string(file).map_err(|source| FrontEndError::Read {
            path: file.to_owned(),
            source,
        })?;
        let is_json = file.extension().is_some_and(|ext| ext == "json");
        let unit = if is_json {
            serde_json::from_str(&text).map_err(|source| FrontEndError::Json {
                path: file.to_owned(),
                source,
            })?
        } else {
            serde_yaml::from_str(&text).map_err(|source| FrontEndError::Yaml {
                path: file.to_owned(),
                source,
            })?
        };
        Ok(unit)
    }
}

/// The source file a dump stands for: the dump's path without its
/// `.yaml`/`.yml`/`.json` extension (`shapes.h.yaml` is `shapes.h`).
/// Used when a unit does not name its file.
pub fn source_name(dump: &Path) -> String {
    let is_dump = dump
        .extension()
        .is_some_and(|ext| ext == "yaml" || ext == "yml" || ext == "json");
    let source = if is_dump {
        dump.with_extension("")
    } else {
        dump.to_owned()
    };
    source.to_string_lossy().into_owned()
}
