use std::collections::BTreeMap;

use ffi_diagnostic::emitter::{ColorMode, TerminalEmitter};
use ffi_ir::{BuiltinKind, Decl, DeclKind, SourceType, TranslationUnit};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

use super::*;
use crate::frontend::FrontEndError;

/// Serves translation units from memory, keyed by file name.
#[derive(Default)]
struct MemoryFrontEnd {
    units: BTreeMap<String, TranslationUnit>,
    requested: Vec<PathBuf>,
}

impl MemoryFrontEnd {
    fn with_unit(mut self, file: &str, decls: Vec<Decl>) -> Self {
        let unit = TranslationUnit {
            file: file.to_string(),
            decls,
        };
        self.units.insert(file.to_string(), unit);
        self
    }
}

impl FrontEnd for MemoryFrontEnd {
    fn parse(
        &mut self,
        file: &Path,
        _options: &[String],
    ) -> Result<TranslationUnit, FrontEndError> {
        self.requested.push(file.to_owned());
        let name = file.file_name().map(|n| n.to_string_lossy().into_owned());
        name.and_then(|name| self.units.get(&name).cloned())
            .ok_or_else(|| FrontEndError::Read {
                path: file.to_owned(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            })
    }
}

type TestDriver = Driver<MemoryFrontEnd, TerminalEmitter<Vec<u8>>, Vec<u8>>;

fn driver(front_end: MemoryFrontEnd, dump: DumpOptions) -> TestDriver {
    let emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false);
    Driver::new(front_end, emitter, Vec::new(), dump)
}

fn finish(driver: TestDriver) -> (String, String) {
    let (emitter, dump) = driver.finish();
    (
        String::from_utf8(emitter.into_inner()).unwrap_or_default(),
        String::from_utf8(dump).unwrap_or_default(),
    )
}

fn int_var(name: &str) -> Decl {
    Decl::new(
        name,
        DeclKind::Var {
            ty: SourceType::builtin(BuiltinKind::Int),
        },
    )
}

fn config(files: &[&str]) -> Config {
    Config {
        file_names: files.iter().map(ToString::to_string).collect(),
        ..Config::default()
    }
}

#[test]
fn relative_file_strips_root() {
    assert_eq!(relative_file("include/gfx/shapes.h", "include"), "gfx/shapes.h");
    assert_eq!(relative_file("./shapes.h", ""), "shapes.h");
    assert_eq!(relative_file("/usr/include/x.h", "/usr/include"), "x.h");
    assert_eq!(relative_file("src/x.h", "include"), "src/x.h");
}

#[test]
fn raw_module_name_drops_extension() {
    assert_eq!(raw_module_name("gfx/shapes.h"), "gfx/shapes");
    assert_eq!(raw_module_name("shapes"), "shapes");
}

#[test]
fn writes_one_module_per_file() {
    let dir = tempdir().unwrap();
    let front_end = MemoryFrontEnd::default().with_unit("counter.h", vec![int_var("hits")]);
    let mut driver = driver(front_end, DumpOptions::default());

    let errors = driver.run_config(&config(&["counter.h"]), dir.path());
    assert_eq!(errors, 0);
    assert_eq!(driver.front_end.requested, vec![dir.path().join("counter.h")]);

    let text = fs::read_to_string(dir.path().join("out/Library/LowLevel/Counter.hs")).unwrap();
    assert!(text.contains("module Library.LowLevel.Counter where\n"));
    assert!(text.ends_with("foreign import ccall \"&hits\" hits :: Ptr CInt\n"));
    let (diagnostics, dump) = finish(driver);
    assert_eq!(diagnostics, "");
    assert_eq!(dump, "");
}

#[test]
fn unreadable_file_counts_and_the_run_continues() {
    let dir = tempdir().unwrap();
    let front_end = MemoryFrontEnd::default().with_unit("b.h", vec![int_var("b")]);
    let mut driver = driver(front_end, DumpOptions::default());

    let errors = driver.run_config(&config(&["a.h", "b.h"]), dir.path());
    assert_eq!(errors, 1);
    assert!(dir.path().join("out/Library/LowLevel/B.hs").exists());
    let (diagnostics, _) = finish(driver);
    assert!(diagnostics.contains("error[E1001]"), "{diagnostics}");
    assert!(diagnostics.contains("1 error"), "{diagnostics}");
}

#[test]
fn invalid_configuration_skips_everything() {
    let dir = tempdir().unwrap();
    let front_end = MemoryFrontEnd::default().with_unit("a.h", vec![int_var("a")]);
    let mut driver = driver(front_end, DumpOptions::default());
    let mut config = config(&["a.h"]);
    config.library_name = String::new();

    assert_eq!(driver.run_config(&config, dir.path()), 1);
    assert!(driver.front_end.requested.is_empty());
}

#[test]
fn clashing_names_count_once_per_configuration() {
    let dir = tempdir().unwrap();
    let front_end = MemoryFrontEnd::default()
        .with_unit("util.h", vec![int_var("max_size"), int_var("maxSize"), int_var("data")])
        .with_unit("util.c", vec![int_var("x")]);
    let mut driver = driver(front_end, DumpOptions::default());

    let errors = driver.run_config(&config(&["util.h", "util.c"]), dir.path());
    assert_eq!(errors, 1);
    let (diagnostics, _) = finish(driver);
    // Two variables collapse into `maxSize`, `data` is a keyword, and both
    // files want the module name `Util`.
    assert_eq!(diagnostics.matches("error[E3001]").count(), 2, "{diagnostics}");
    assert_eq!(diagnostics.matches("error[E3002]").count(), 1, "{diagnostics}");
}

#[test]
fn explicit_module_names_avoid_clashes() {
    let dir = tempdir().unwrap();
    let front_end = MemoryFrontEnd::default()
        .with_unit("util.h", vec![int_var("a")])
        .with_unit("util.c", vec![int_var("b")]);
    let mut driver = driver(front_end, DumpOptions::default());
    let mut config = config(&["util.h", "util.c"]);
    config
        .module_names
        .insert("util.c".to_string(), "UtilImpl".to_string());

    assert_eq!(driver.run_config(&config, dir.path()), 0);
    assert!(dir.path().join("out/Library/LowLevel/UtilImpl.hs").exists());
    assert!(dir.path().join("out/Library/LowLevel/Util.hs").exists());
}

#[test]
fn packed_struct_warning_is_emitted_once_per_run() {
    let dir = tempdir().unwrap();
    let front_end = MemoryFrontEnd::default().with_unit("a.h", vec![int_var("a")]);
    let mut driver = driver(front_end, DumpOptions::default());
    let mut config = config(&["a.h"]);
    config.storable_instances = true;

    assert_eq!(driver.run_config(&config, dir.path()), 0);
    assert_eq!(driver.run_config(&config, dir.path()), 0);
    let (diagnostics, _) = finish(driver);
    assert_eq!(diagnostics.matches("[E4001]").count(), 1, "{diagnostics}");
}

fn dump_of(dump: DumpOptions) -> String {
    let dir = tempdir().unwrap();
    let front_end = MemoryFrontEnd::default().with_unit("a.h", vec![int_var("hits")]);
    let mut driver = driver(front_end, dump);
    assert_eq!(driver.run_config(&config(&["a.h"]), dir.path()), 0);
    finish(driver).1
}

#[test]
fn dumps_module_contents() {
    let yaml = dump_of(DumpOptions {
        yaml: true,
        json: false,
    });
    let json = dump_of(DumpOptions {
        yaml: false,
        json: true,
    });

    let from_yaml: BTreeMap<String, ModuleContents> = serde_yaml::from_str(&yaml).unwrap();
    let from_json: BTreeMap<String, ModuleContents> = serde_json::from_str(&json).unwrap();
    assert_eq!(from_yaml, from_json);
    assert!(from_yaml["a.h"].entities.contains_key("hits"));
}

#[test]
fn unwritable_output_counts_as_an_error() {
    let dir = tempdir().unwrap();
    // A file where the output directory should be.
    fs::write(dir.path().join("out"), "").unwrap();
    let front_end = MemoryFrontEnd::default().with_unit("a.h", vec![int_var("a")]);
    let mut driver = driver(front_end, DumpOptions::default());

    assert_eq!(driver.run_config(&config(&["a.h"]), dir.path()), 1);
    let (diagnostics, _) = finish(driver);
    assert!(diagnostics.contains("error[E4003]"), "{diagnostics}");
}
