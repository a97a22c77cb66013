//! ffic CLI
//!
//! Runs each configuration file in turn; the exit status is the number of
//! errors (capped at 255).

use std::io::IsTerminal;
use std::path::Path;

use ffi_diagnostic::emitter::{ColorMode, TerminalEmitter};
use ffi_diagnostic::ErrorCode;
use ffic::{init_tracing, Config, Driver, DumpFrontEnd, DumpOptions};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let mut dump = DumpOptions::default();
    let mut color = ColorMode::Auto;
    let mut verbose = None;
    let mut configs = Vec::new();

    for arg in &args {
        if arg == "--dump-config" {
            dump_config();
            return;
        } else if arg == "--yaml" {
            dump.yaml = true;
        } else if arg == "--json" {
            dump.json = true;
        } else if arg == "-h" || arg == "--help" {
            print_usage();
            return;
        } else if let Some(code) = arg.strip_prefix("--explain=") {
            explain(code);
            return;
        } else if let Some(level) = arg.strip_prefix("--verbose=") {
            verbose = Some(level);
        } else if let Some(mode) = arg.strip_prefix("--color=") {
            color = match mode {
                "auto" => ColorMode::Auto,
                "always" => ColorMode::Always,
                "never" => ColorMode::Never,
                other => {
                    eprintln!("error: unknown color mode '{other}' (expected auto, always or never)");
                    std::process::exit(1);
                }
            };
        } else if arg.starts_with('-') {
            eprintln!("error: unknown option '{arg}'");
            print_usage();
            std::process::exit(1);
        } else {
            configs.push(arg.as_str());
        }
    }

    if configs.is_empty() {
        print_usage();
        std::process::exit(1);
    }

    init_tracing(verbose);

    let emitter = TerminalEmitter::stderr(color, std::io::stderr().is_terminal());
    let mut driver = Driver::new(DumpFrontEnd, emitter, std::io::stdout(), dump);
    let errors: usize = configs
        .iter()
        .map(|config| driver.run_config_file(Path::new(config)))
        .sum();
    driver.finish();

    std::process::exit(i32::try_from(errors.min(255)).unwrap_or(255));
}

fn dump_config() {
    match Config::default().to_yaml() {
        Ok(text) => print!("{text}"),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

fn explain(code: &str) {
    match code.parse::<ErrorCode>() {
        Ok(code) => println!("{code}: {}", code.description()),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!("Usage: ffic [options] <config.yaml>...");
    eprintln!();
    eprintln!("Generates one Haskell FFI module per source file named in each");
    eprintln!("configuration file. The exit status is the number of errors.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --dump-config          Print the default configuration as YAML");
    eprintln!("  --yaml                 Print each module's contents as YAML");
    eprintln!("  --json                 Print each module's contents as JSON");
    eprintln!("  --verbose=<level>      Debug logging filter (e.g. debug, ffi_names=trace)");
    eprintln!("  --color=<mode>         Diagnostic colors: auto, always, never");
    eprintln!("  --explain=<code>       Describe an error code (e.g. E3001)");
}
