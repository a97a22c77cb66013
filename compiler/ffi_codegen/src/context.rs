//! Code generation context and state.
//!
//! The `CodegenContext` holds everything one module's generation pass needs:
//! the output buffer, the module's name resolver, the diagnostic queue, and
//! the counter for fresh type variables.

use ffi_diagnostic::{Diagnostic, DiagnosticQueue, ErrorCode};
use ffi_ir::ScopedName;
use ffi_names::{ConverterError, NameKind, NameResolver};

use crate::haskell::HaskellOptions;

const LETTERS: &[u8; 26] = b"abcdefghijklmnopqrstuvwxyz";

/// Code generation context for one module.
pub struct CodegenContext<'a> {
    pub options: &'a HaskellOptions,
    resolver: &'a mut NameResolver,
    queue: &'a mut DiagnosticQueue,
    /// Current indentation level.
    indent: usize,
    /// Generated code output.
    output: String,
    /// Number of fresh type variables handed out since the last reset.
    fresh_counter: u32,
    /// Whether `void*` currently renders as `Ptr <fresh>`.
    pub(crate) any_ptr: bool,
}

impl<'a> CodegenContext<'a> {
    pub fn new(
        options: &'a HaskellOptions,
        resolver: &'a mut NameResolver,
        queue: &'a mut DiagnosticQueue,
    ) -> Self {
        CodegenContext {
            options,
            resolver,
            queue,
            indent: 0,
            output: String::with_capacity(4096),
            fresh_counter: 0,
            any_ptr: options.void_ptr_as_any_ptr,
        }
    }

    /// Hand out the next type variable: `a` to `z`, then `za`, `zb`, ...
    pub fn fresh_var(&mut self) -> String {
        let n = self.fresh_counter;
        self.fresh_counter += 1;
        let mut var = "z".repeat((n / 26) as usize);
        var.push(char::from(LETTERS[(n % 26) as usize]));
        var
    }

    /// Forget the type variables handed out so far; returns how many there
    /// were.
    pub fn reset_fresh(&mut self) -> u32 {
        std::mem::take(&mut self.fresh_counter)
    }

    pub fn indent(&mut self) {
        self.indent += 1;
    }

    pub fn dedent(&mut self) {
        debug_assert!(self.indent > 0, "dedent called with zero indent");
        self.indent = self.indent.saturating_sub(1);
    }

    pub fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.output.push_str("  ");
        }
    }

    pub fn write(&mut self, s: &str) {
        self.output.push_str(s);
    }

    /// Write a line with the current indentation.
    pub fn writeln(&mut self, s: &str) {
        self.write_indent();
        self.output.push_str(s);
        self.output.push('\n');
    }

    pub fn newline(&mut self) {
        self.output.push('\n');
    }

    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }

    pub fn report(&mut self, diag: Diagnostic) {
        self.queue.push(diag);
    }

    /// Host name of a type constructor.
    pub fn type_name(&mut self, raw: &str) -> String {
        let name = ScopedName::unscoped(raw);
        let resolved = self.resolver.resolve_type(&name);
        self.or_unconverted(NameKind::TypeCtor, &name, resolved)
    }

    /// Host name of a data constructor or pattern synonym in `scope`.
    pub fn ctor_name(&mut self, scope: &str, raw: &str) -> String {
        let name = ScopedName::new(scope, raw);
        let resolved = self.resolver.resolve_ctor(&name);
        self.or_unconverted(NameKind::DataCtor, &name, resolved)
    }

    /// Host name of a function, variable or record field in `scope`.
    pub fn variable_name(&mut self, scope: &str, raw: &str) -> String {
        let name = ScopedName::new(scope, raw);
        let resolved = self.resolver.resolve_variable(&name);
        self.or_unconverted(NameKind::Variable, &name, resolved)
    }

    /// A name that cannot be converted is reported and used as is.
    fn or_unconverted(
        &mut self,
        kind: NameKind,
        name: &ScopedName,
        resolved: Result<String, ConverterError>,
    ) -> String {
        match resolved {
            Ok(out) => out,
            Err(err) => {
                self.queue.push(
                    Diagnostic::error(ErrorCode::E3003)
                        .with_message(format!("cannot convert {kind} name `{name}`: {err}"))
                        .with_note(format!("module `{}`", self.resolver.module()))
                        .with_suggestion("add a name override for this identifier"),
                );
                name.name.clone()
            }
        }
    }
}
