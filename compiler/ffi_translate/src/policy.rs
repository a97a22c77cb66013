//! Per-run translation switches.

/// Switches that decide which declarations are translated and how.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "independent configuration switches"
)]
pub struct TranslatePolicy {
    /// Refine typedefs named like `<stdint.h>` types outside system headers.
    pub allow_custom_fixed_size_int: bool,
    /// Treat functions and variables without C linkage as if they had it.
    pub assume_extern_c: bool,
    /// Warn when a declaration is skipped for lack of C linkage.
    pub warn_no_c_linkage: bool,
    /// Warn when a declaration is skipped for lack of external linkage.
    pub warn_no_external_formal_linkage: bool,
    /// Declarations from included non-system headers are public API too.
    pub header_group: bool,
}

impl Default for TranslatePolicy {
    fn default() -> Self {
        TranslatePolicy {
            allow_custom_fixed_size_int: false,
            assume_extern_c: false,
            warn_no_c_linkage: true,
            warn_no_external_formal_linkage: false,
            header_group: false,
        }
    }
}
