//! Error codes for all diagnostics.
//!
//! The first digit of a code names the stage that reports it.

use std::fmt;
use std::str::FromStr;

/// Error codes for all diagnostics.
///
/// Format: E#### where the first digit indicates the stage:
/// - E0xxx: Configuration
/// - E1xxx: Front end
/// - E2xxx: Type translation and declaration filtering
/// - E3xxx: Name resolution
/// - E4xxx: Code generation
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub enum ErrorCode {
    // Configuration (E0xxx)
    /// Configuration file could not be read or parsed
    E0001,
    /// Name converter configuration is invalid
    E0002,
    /// Explicit name or override is empty
    E0003,
    /// Configuration options are inconsistent
    E0004,

    // Front end (E1xxx)
    /// Front end could not produce a translation unit
    E1001,

    // Translation (E2xxx)
    /// Builtin type has no portable representation
    E2001,
    /// C++ reference type
    E2002,
    /// Function pointer without the C calling convention
    E2003,
    /// Unrecognized type construct
    E2004,
    /// Type is not marshallable
    E2005,
    /// Declaration has no external formal linkage
    E2006,
    /// Declaration has no C language linkage
    E2007,
    /// Enclosing declaration of a rejected type
    E2008,

    // Name resolution (E3xxx)
    /// Several source names convert to the same output name
    E3001,
    /// Output name is a reserved keyword of the host language
    E3002,
    /// Identifier converts to an empty name
    E3003,

    // Code generation (E4xxx)
    /// Packed structs are laid out naturally
    E4001,
    /// Struct layout cannot be computed
    E4002,
    /// Output file cannot be written
    E4003,
}

impl ErrorCode {
    /// Every error code, in numeric order.
    pub const ALL: &'static [ErrorCode] = &[
        ErrorCode::E0001,
        ErrorCode::E0002,
        ErrorCode::E0003,
        ErrorCode::E0004,
        ErrorCode::E1001,
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::E2004,
        ErrorCode::E2005,
        ErrorCode::E2006,
        ErrorCode::E2007,
        ErrorCode::E2008,
        ErrorCode::E3001,
        ErrorCode::E3002,
        ErrorCode::E3003,
        ErrorCode::E4001,
        ErrorCode::E4002,
        ErrorCode::E4003,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0004 => "E0004",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E2007 => "E2007",
            ErrorCode::E2008 => "E2008",
            ErrorCode::E3001 => "E3001",
            ErrorCode::E3002 => "E3002",
            ErrorCode::E3003 => "E3003",
            ErrorCode::E4001 => "E4001",
            ErrorCode::E4002 => "E4002",
            ErrorCode::E4003 => "E4003",
        }
    }

    /// One-line explanation, shown by `--explain`.
    pub fn description(self) -> &'static str {
        match self {
            ErrorCode::E0001 => "the configuration file could not be read or parsed",
            ErrorCode::E0002 => {
                "a name converter is misconfigured: module, type and constructor names \
                 must start upper-case, variable names lower-case or '_', and the shared \
                 converters may not set a case or add a prefix"
            }
            ErrorCode::E0003 => "an explicit module name or name override is empty",
            ErrorCode::E0004 => {
                "configuration options are inconsistent, e.g. `allow_rank_n_types` without \
                 `void_ptr_as_any_ptr`; the run continues"
            }
            ErrorCode::E1001 => {
                "the C/C++ front end could not produce declarations for a file; \
                 the file is skipped and counted as an error"
            }
            ErrorCode::E2001 => {
                "a builtin type (extended float, 128-bit integer, OpenCL or vendor type) \
                 has no portable FFI representation; the declaration is skipped"
            }
            ErrorCode::E2002 => {
                "C++ references (lvalue or rvalue) cannot cross a C FFI boundary; \
                 the declaration is skipped"
            }
            ErrorCode::E2003 => {
                "a function pointer does not use the C calling convention; \
                 the declaration is skipped"
            }
            ErrorCode::E2004 => {
                "a type construct was not recognized at all; this is a tool bug, \
                 please report it"
            }
            ErrorCode::E2005 => {
                "only integers, floating point numbers and pointers can be passed by \
                 value; the declaration is skipped"
            }
            ErrorCode::E2006 => "the declaration has no external formal linkage and is skipped",
            ErrorCode::E2007 => {
                "the declaration has no C language linkage and is skipped; \
                 set `assume_extern_c` to bind it anyway"
            }
            ErrorCode::E2008 => "context of a skipped declaration",
            ErrorCode::E3001 => {
                "several source identifiers convert to the same output identifier; \
                 adjust the name converters or add a name override"
            }
            ErrorCode::E3002 => {
                "an output identifier is a reserved keyword of the host language; \
                 add a prefix/suffix or a name override"
            }
            ErrorCode::E3003 => {
                "an identifier is empty once its prefix or suffix is removed; the \
                 unconverted identifier is used instead"
            }
            ErrorCode::E4001 => {
                "struct layouts are computed assuming natural alignment; packed structs \
                 will get incorrect marshalling code"
            }
            ErrorCode::E4002 => {
                "a struct contains a field of unknown size, so no marshalling instance \
                 is generated for it"
            }
            ErrorCode::E4003 => "a generated file could not be written",
        }
    }

    pub fn is_config_error(self) -> bool {
        self.as_str().starts_with("E0")
    }

    pub fn is_translation_error(self) -> bool {
        self.as_str().starts_with("E2")
    }

    pub fn is_name_error(self) -> bool {
        self.as_str().starts_with("E3")
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse error for [`ErrorCode::from_str`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownErrorCode(pub String);

impl fmt::Display for UnknownErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown error code `{}`", self.0)
    }
}

impl std::error::Error for UnknownErrorCode {}

impl FromStr for ErrorCode {
    type Err = UnknownErrorCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        ErrorCode::ALL
            .iter()
            .copied()
            .find(|code| code.as_str() == wanted)
            .ok_or_else(|| UnknownErrorCode(s.to_string()))
    }
}

#[cfg(test)]
mod tests;
