//! Console logging setup.
//!
//! Everything the CLI prints goes through `log`, so `--quiet` and
//! `--logfile` apply uniformly.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use log::LevelFilter;

use crate::error::CliError;

/// Library crates are chatty at info level; their messages only show with
/// `--verbose`.
const ENGINE_MODULES: &[&str] = &["retro_thumbs_lib", "retro_thumbs_catalog"];

/// Writes to stdout and to a log file with ANSI escapes removed.
struct TeeWriter {
    console: io::Stdout,
    file: strip_ansi_escapes::Writer<File>,
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.console.write_all(buf)?;
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.console.flush()?;
        self.file.flush()
    }
}

pub(crate) fn init(quiet: bool, verbose: bool, logfile: Option<&Path>) -> Result<(), CliError> {
    let level = if quiet {
        LevelFilter::Warn
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    if !verbose {
        for module in ENGINE_MODULES {
            builder.filter_module(module, LevelFilter::Warn);
        }
    }
    builder.parse_default_env();

    builder.format(move |buf, record| {
        if verbose {
            writeln!(
                buf,
                "{} {:<5} {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.args()
            )
        } else {
            writeln!(buf, "{}", record.args())
        }
    });

    match logfile {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                CliError::other(format!("Cannot create log file {}: {}", path.display(), e))
            })?;
            builder.target(env_logger::Target::Pipe(Box::new(TeeWriter {
                console: io::stdout(),
                file: strip_ansi_escapes::Writer::new(file),
            })));
        }
        None => {
            builder.target(env_logger::Target::Stdout);
        }
    }

    builder
        .try_init()
        .map_err(|e| CliError::other(format!("Failed to set up logging: {e}")))
}
