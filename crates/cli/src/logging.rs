//! Log setup: `[dd-Mon-YYYY HH:MM:SS] LEVEL - message` on stderr, optionally
//! teed into a size-capped, rotated log file.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::ValueEnum;
use log::LevelFilter;

use crate::exit_codes::{EXIT_ERROR, EXIT_UNIFY_IO};
use crate::CliError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Verbosity {
    #[value(name = "DEBUG")]
    Debug,
    #[value(name = "INFO")]
    Info,
    #[value(name = "WARN")]
    Warn,
    #[value(name = "ERROR")]
    Error,
    /// Same as ERROR; `log` has no level above it.
    #[value(name = "CRITICAL")]
    Critical,
}

impl Verbosity {
    pub fn level_filter(self) -> LevelFilter {
        match self {
            Verbosity::Debug => LevelFilter::Debug,
            Verbosity::Info => LevelFilter::Info,
            Verbosity::Warn => LevelFilter::Warn,
            Verbosity::Error | Verbosity::Critical => LevelFilter::Error,
        }
    }
}

/// Log file size at which it is rotated.
pub const LOG_MAX_BYTES: u64 = 50_000;
/// Rotated files kept next to the live one (`<file>.1`, `<file>.2`).
pub const LOG_BACKUPS: usize = 2;

/// Append-only log file that rolls over to `<file>.1 .. <file>.N` once a
/// write would take it past `max_bytes`.
pub struct RotatingFile {
    path: PathBuf,
    file: File,
    written: u64,
    max_bytes: u64,
    backups: usize,
}

impl RotatingFile {
    pub fn open(path: &Path, max_bytes: u64, backups: usize) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let written = file.metadata()?.len();
        Ok(Self {
            path: path.to_path_buf(),
            file,
            written,
            max_bytes,
            backups,
        })
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;
        if self.backups > 0 {
            for n in (1..self.backups).rev() {
                let from = backup_path(&self.path, n);
                if from.exists() {
                    std::fs::rename(&from, backup_path(&self.path, n + 1))?;
                }
            }
            std::fs::rename(&self.path, backup_path(&self.path, 1))?;
        }
        self.file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.path)?;
        self.written = 0;
        Ok(())
    }
}

impl Write for RotatingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.written > 0 && self.written + buf.len() as u64 > self.max_bytes {
            self.rotate()?;
        }
        self.file.write_all(buf)?;
        self.written += buf.len() as u64;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

fn backup_path(path: &Path, n: usize) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(format!(".{n}"));
    PathBuf::from(name)
}

/// Writes every line to stderr and to the log file.
struct Tee {
    file: RotatingFile,
}

impl Write for Tee {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stderr().write_all(buf)?;
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()?;
        self.file.flush()
    }
}

pub fn init(verbosity: Verbosity, logfile: Option<&Path>) -> Result<(), CliError> {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(verbosity.level_filter())
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {} - {}",
                chrono::Local::now().format("%d-%b-%Y %H:%M:%S"),
                record.level(),
                record.args()
            )
        });

    if let Some(path) = logfile {
        let file = RotatingFile::open(path, LOG_MAX_BYTES, LOG_BACKUPS).map_err(|e| CliError {
            code: EXIT_UNIFY_IO,
            message: format!("cannot open log file {}: {e}", path.display()),
            hint: None,
        })?;
        builder.target(env_logger::Target::Pipe(Box::new(Tee { file })));
    }

    builder.try_init().map_err(|e| CliError {
        code: EXIT_ERROR,
        message: format!("cannot initialise logging: {e}"),
        hint: None,
    })
}

/// `1h:2m:3s`; whole seconds, never below 1.
pub fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.as_secs_f64();
    let hours = (total / 3600.0).floor();
    let minutes = ((total - hours * 3600.0) / 60.0).floor();
    let seconds = total - hours * 3600.0 - minutes * 60.0;
    let seconds = if seconds > 1.0 { seconds as u64 } else { 1 };
    format!("{}h:{}m:{}s", hours as u64, minutes as u64, seconds)
}
