//! The batch driver.
//!
//! One configuration file drives one sequential pass over its files:
//!
//! ```text
//! front end → translate_unit → (dump) → module name → generate_module
//!     → clash scan → write <output>/<Library>/LowLevel/<Module>.hs
//! ```
//!
//! A failing file never stops the run. Each configuration contributes to the
//! error total: one per unreadable or invalid configuration, one per file the
//! front end cannot read, one per file that cannot be written, and one if any
//! name could not be converted or clashes.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Component, Path, PathBuf};

use ffi_codegen::{generate_module, haskell_keywords};
use ffi_diagnostic::emitter::DiagnosticEmitter;
use ffi_diagnostic::{Diagnostic, DiagnosticQueue, ErrorCode, Severity};
use ffi_ir::ModuleContents;
use ffi_names::{KeywordSet, ModuleNameTable, NameResolver, NameVariant};
use ffi_translate::translate_unit;
use tracing::debug;

use crate::config::Config;
use crate::frontend::{source_name, FrontEnd};

/// Which module dumps to print before generation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct DumpOptions {
    pub yaml: bool,
    pub json: bool,
}

/// Runs configurations, reporting through an emitter and printing dumps to
/// `dump_out`.
pub struct Driver<F, E, O> {
    front_end: F,
    emitter: E,
    dump_out: O,
    dump: DumpOptions,
    keywords: KeywordSet,
    packed_warning_emitted: bool,
    error_diagnostics: usize,
    warning_diagnostics: usize,
}

impl<F: FrontEnd, E: DiagnosticEmitter, O: Write> Driver<F, E, O> {
    pub fn new(front_end: F, emitter: E, dump_out: O, dump: DumpOptions) -> Self {
        Driver {
            front_end,
            emitter,
            dump_out,
            dump,
            keywords: haskell_keywords(),
            packed_warning_emitted: false,
            error_diagnostics: 0,
            warning_diagnostics: 0,
        }
    }

    /// Load and run one configuration file; returns its error count.
    pub fn run_config_file(&mut self, path: &Path) -> usize {
        debug!(config = %path.display(), "loading configuration");
        let config = match Config::load(path) {
            Ok(config) => config,
            Err(err) => {
                self.report(vec![err.to_diagnostic()]);
                return 1;
            }
        };
        let base = path.parent().unwrap_or(Path::new("."));
        self.run_config(&config, base)
    }

    /// Run a configuration whose relative paths start at `base`; returns
    /// its error count.
    pub fn run_config(&mut self, config: &Config, base: &Path) -> usize {
        let problems = config.validate();
        let invalid = problems.iter().any(Diagnostic::is_error);
        self.report(problems);
        if invalid {
            return 1;
        }

        if config.storable_instances && !self.packed_warning_emitted {
            self.packed_warning_emitted = true;
            self.report(vec![Diagnostic::warning(ErrorCode::E4001)
                .with_message("Storable instances assume natural struct layout")
                .with_note("packed structs will get incorrect peek/poke offsets")]);
        }

        let mut errors = 0;
        let mut name_errors = false;
        let mut modules = ModuleNameTable::new(config.module_names.clone());
        let output_dir = base.join(&config.output_directory);

        for file in &config.file_names {
            let mut queue = DiagnosticQueue::new();
            let processed =
                self.run_file(config, base, &output_dir, file, &mut modules, &mut queue);
            name_errors |= queue
                .peek()
                .any(|diag| diag.is_error() && diag.code.is_name_error());
            self.report(queue.flush());
            if !processed {
                errors += 1;
            }
        }

        let module_clashes: Vec<Diagnostic> = modules
            .clashes(&self.keywords)
            .iter()
            .map(|clash| clash.to_diagnostic())
            .collect();
        name_errors |= !module_clashes.is_empty();
        self.report(module_clashes);

        if name_errors {
            errors += 1;
        }
        debug!(errors, "configuration done");
        errors
    }

    /// Process one file, queueing its diagnostics. Returns `false` when the
    /// file could not be read or its module could not be written.
    fn run_file(
        &mut self,
        config: &Config,
        base: &Path,
        output_dir: &Path,
        file: &str,
        modules: &mut ModuleNameTable,
        queue: &mut DiagnosticQueue,
    ) -> bool {
        let unit = match self.front_end.parse(&base.join(file), &config.compiler_options) {
            Ok(unit) => unit,
            Err(err) => {
                queue.push(err.to_diagnostic());
                return false;
            }
        };

        let source = if unit.file.is_empty() {
            source_name(Path::new(file))
        } else {
            unit.file.clone()
        };
        let relative = relative_file(&source, &config.root_directory);
        let contents = translate_unit(&unit, &config.translate_policy(&relative), queue);
        self.dump_module(&relative, &contents);

        let file_converter = config.file_converters.get(&relative);
        let chain = config
            .converters
            .chain(NameVariant::ModuleName, file_converter);
        let raw = raw_module_name(&relative);
        let module_name = modules.resolve(&relative, &raw, &chain).unwrap_or_else(|err| {
            queue.push(
                Diagnostic::error(ErrorCode::E3003)
                    .with_message(format!("cannot convert the module name of `{relative}`: {err}"))
                    .with_suggestion("set an explicit name in `module_names`"),
            );
            raw.clone()
        });

        let overrides = config
            .name_overrides
            .get(&module_name)
            .cloned()
            .unwrap_or_default();
        let mut resolver = NameResolver::new(
            module_name.clone(),
            &config.converters,
            file_converter,
            overrides,
            &config.namespaces,
        );
        let generated = generate_module(
            &module_name,
            &contents,
            &mut resolver,
            &config.haskell_options(),
            queue,
        );
        for clash in resolver.clashes(&self.keywords) {
            queue.push(clash.to_diagnostic());
        }

        let path = output_dir.join(&generated.path);
        debug!(module = %generated.module, path = %path.display(), "writing module");
        match write_module(&path, &generated.text) {
            Ok(()) => true,
            Err(err) => {
                queue.push(
                    Diagnostic::error(ErrorCode::E4003)
                        .with_message(format!("cannot write `{}`: {err}", path.display())),
                );
                false
            }
        }
    }

    fn dump_module(&mut self, file: &str, contents: &ModuleContents) {
        if !self.dump.yaml && !self.dump.json {
            return;
        }
        let dump = BTreeMap::from([(file, contents)]);
        if self.dump.yaml {
            match serde_yaml::to_string(&dump) {
                Ok(text) => {
                    let _ = write!(self.dump_out, "{text}");
                }
                Err(err) => debug!(%err, "YAML dump failed"),
            }
        }
        if self.dump.json {
            match serde_json::to_string_pretty(&dump) {
                Ok(text) => {
                    let _ = writeln!(self.dump_out, "{text}");
                }
                Err(err) => debug!(%err, "JSON dump failed"),
            }
        }
    }

    fn report(&mut self, diagnostics: Vec<Diagnostic>) {
        for diag in &diagnostics {
            match diag.severity {
                Severity::Error => self.error_diagnostics += 1,
                Severity::Warning => self.warning_diagnostics += 1,
                Severity::Note => {}
            }
        }
        self.emitter.emit_all(&diagnostics);
    }

    /// Print the summary line and give back the emitter and dump writer.
    pub fn finish(mut self) -> (E, O) {
        self.emitter
            .emit_summary(self.error_diagnostics, self.warning_diagnostics);
        self.emitter.flush();
        let _ = self.dump_out.flush();
        (self.emitter, self.dump_out)
    }
}

fn write_module(path: &Path, text: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, text)
}

/// A source file's key in the configuration maps: its path below
/// `root_directory`, `/`-separated, without `.` or leading `/`.
pub fn relative_file(file: &str, root: &str) -> String {
    let path = Path::new(file);
    let below_root = if root.is_empty() {
        path
    } else {
        path.strip_prefix(root).unwrap_or(path)
    };
    let parts: Vec<_> = below_root
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect();
    parts.join("/")
}

/// The unconverted module name of a file: its relative path without the
/// extension (`gfx/shapes.h` is `gfx/shapes`).
pub fn raw_module_name(relative: &str) -> String {
    PathBuf::from(relative)
        .with_extension("")
        .to_string_lossy()
        .into_owned()
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
