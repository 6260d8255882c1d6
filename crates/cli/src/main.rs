// termex CLI - forward/reverse terminal exon result unification

mod exit_codes;
mod logging;
mod unify;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, Subcommand};
use log::{error, info};
use termex_unify::UnifyError;

use exit_codes::{unify_exit_code, EXIT_SUCCESS, EXIT_UNIFY_DUPLICATE};
use logging::Verbosity;
use unify::UnifyArgs;

#[derive(Parser)]
#[command(name = "termex")]
#[command(about = "Unify forward and reverse terminal exon classification results")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    /// Verbosity/Log level
    #[arg(short = 'v', long, value_enum, default_value = "ERROR", global = true)]
    verbosity: Verbosity,

    /// Also store the log in this file
    #[arg(short = 'l', long, global = true)]
    logfile: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge both scans into one table, keeping the more confident call per region
    #[command(after_help = "\
A missing scan result is treated as empty. For a region reported by both \
scans the row with the higher terminal_probability is kept; on a tie the \
reverse row is kept.

Examples:
  termex unify --forward-tsv out/forward --reverse-tsv out/reverse --final-tsv unified.tsv
  termex -v INFO unify --forward-tsv fw --reverse-tsv rv --final-tsv u.tsv --index
  termex unify --forward-tsv fw --reverse-tsv rv --final-tsv u.tsv --on-duplicate error --json")]
    Unify(UnifyArgs),

    /// Validate a unify config without running
    #[command(after_help = "\
Examples:
  termex validate unify.toml")]
    Validate {
        /// Path to the TOML config file
        config: PathBuf,
    },
}

fn long_version() -> &'static str {
    if cfg!(debug_assertions) {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " (", env!("GIT_COMMIT_HASH"), ")",
            "\nengine:  termex-unify ", env!("CARGO_PKG_VERSION"),
            "\nbuild:   debug",
            "\ntarget:  ", env!("TARGET"),
        )
    } else {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " (", env!("GIT_COMMIT_HASH"), ")",
            "\nengine:  termex-unify ", env!("CARGO_PKG_VERSION"),
            "\nbuild:   release",
            "\ntarget:  ", env!("TARGET"),
        )
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(CliError { code, message, .. }) = logging::init(cli.verbosity, cli.logfile.as_deref()) {
        eprintln!("error: {}", message);
        return ExitCode::from(code);
    }

    let start = Instant::now();
    info!("Starting script");

    let result = match cli.command {
        Commands::Unify(args) => unify::cmd_unify(args),
        Commands::Validate { config } => unify::cmd_validate(config),
    };

    match result {
        Ok(()) => {
            info!("Successfully finished in {}", logging::format_elapsed(start.elapsed()));
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                error!("{}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    /// Create error from an engine error with the matching exit code.
    pub fn unify(err: UnifyError) -> Self {
        let code = unify_exit_code(&err);
        let hint = match code {
            EXIT_UNIFY_DUPLICATE => {
                Some("use --on-duplicate keep-max to collapse repeated regions".to_string())
            }
            _ => None,
        };
        Self { code, message: err.to_string(), hint }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_unify_args() {
        let cli = Cli::try_parse_from([
            "termex",
            "-v",
            "INFO",
            "unify",
            "--forward-tsv",
            "fw",
            "--reverse-tsv",
            "rv",
            "--final-tsv",
            "out.tsv",
            "--on-duplicate",
            "keep-last",
        ])
        .unwrap();
        assert_eq!(cli.verbosity, Verbosity::Info);
        match cli.command {
            Commands::Unify(args) => {
                assert_eq!(args.forward_tsv, PathBuf::from("fw"));
                assert_eq!(args.on_duplicate, Some(unify::DuplicateArg::KeepLast));
                assert!(!args.index);
            }
            Commands::Validate { .. } => panic!("expected unify"),
        }
    }

    #[test]
    fn final_tsv_is_required() {
        let err = Cli::try_parse_from(["termex", "unify", "--forward-tsv", "fw", "--reverse-tsv", "rv"]);
        assert!(err.is_err());
    }

    #[test]
    fn duplicate_error_carries_hint() {
        let err = CliError::unify(UnifyError::DuplicateRegion {
            source: "forward".into(),
            duplicates: vec![("chr1:1-2".into(), 2)],
        });
        assert_eq!(err.code, EXIT_UNIFY_DUPLICATE);
        assert!(err.hint.is_some());
    }
}
