//! Haskell FFI binding generator.
//!
//! Reads YAML configuration files naming C/C++ sources, obtains their
//! declarations through a [`FrontEnd`], and writes one Haskell module per
//! source file.

pub mod config;
pub mod driver;
pub mod frontend;

use std::sync::Once;

pub use config::{Config, ConfigError};
pub use driver::{Driver, DumpOptions};
pub use frontend::{DumpFrontEnd, FrontEnd, FrontEndError};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output on stderr.
///
/// `level` is an `EnvFilter` directive (`--verbose=<level>`); without it,
/// tracing is only installed when `RUST_LOG` is set. Safe to call multiple
/// times.
pub fn init_tracing(level: Option<&str>) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let filter = match level {
            Some(level) => EnvFilter::new(level),
            None if std::env::var("RUST_LOG").is_ok() => EnvFilter::from_default_env(),
            None => return,
        };
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true),
            )
            .with(filter)
            .init();
    });
}
