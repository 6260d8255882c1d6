//! `termex unify`: merge forward and reverse scan results into one table.

use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use log::{debug, info};
use termex_unify::config::{DuplicatePolicy, UnifyConfig};
use termex_unify::writer::write_tsv_file;

use crate::exit_codes::EXIT_UNIFY_IO;
use crate::CliError;

#[derive(Args)]
pub struct UnifyArgs {
    /// Forward scan output directory (or its result file)
    #[arg(long, value_name = "DIR")]
    pub forward_tsv: PathBuf,

    /// Reverse scan output directory (or its result file)
    #[arg(long, value_name = "DIR")]
    pub reverse_tsv: PathBuf,

    /// Path of the unified TSV to write
    #[arg(long, value_name = "FILE")]
    pub final_tsv: PathBuf,

    /// TOML config (column names, duplicate policy, output options)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Prepend a 0-based row index column
    #[arg(long)]
    pub index: bool,

    /// How to treat a region repeated within one scan (overrides config)
    #[arg(long, value_enum)]
    pub on_duplicate: Option<DuplicateArg>,

    /// Print the run summary as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DuplicateArg {
    #[value(alias = "keep_max")]
    KeepMax,
    #[value(alias = "keep_last")]
    KeepLast,
    Error,
}

impl From<DuplicateArg> for DuplicatePolicy {
    fn from(arg: DuplicateArg) -> Self {
        match arg {
            DuplicateArg::KeepMax => DuplicatePolicy::KeepMax,
            DuplicateArg::KeepLast => DuplicatePolicy::KeepLast,
            DuplicateArg::Error => DuplicatePolicy::Error,
        }
    }
}

pub fn load_config(path: Option<&Path>) -> Result<UnifyConfig, CliError> {
    let Some(path) = path else {
        return Ok(UnifyConfig::default());
    };
    let config_str = std::fs::read_to_string(path).map_err(|e| CliError {
        code: EXIT_UNIFY_IO,
        message: format!("cannot read config {}: {e}", path.display()),
        hint: None,
    })?;
    UnifyConfig::from_toml(&config_str).map_err(CliError::unify)
}

pub fn cmd_unify(args: UnifyArgs) -> Result<(), CliError> {
    let mut config = load_config(args.config.as_deref())?;
    if args.index {
        config.output.index = true;
    }
    if let Some(policy) = args.on_duplicate {
        config.duplicates.policy = policy.into();
    }
    debug!("config: {config:?}");

    let outcome = termex_unify::run(&args.forward_tsv, &args.reverse_tsv, &config)
        .map_err(CliError::unify)?;

    write_tsv_file(&outcome.records, &args.final_tsv, &config.output).map_err(CliError::unify)?;

    let s = &outcome.summary;
    info!(
        "forward: {} row(s), {} unique; reverse: {} row(s), {} unique",
        s.left_rows, s.unique_left, s.right_rows, s.unique_right
    );
    info!(
        "common regions: {} ({} forward, {} reverse, {} tie(s) to reverse)",
        s.common_regions, s.left_wins, s.right_wins, s.ties
    );
    info!("wrote {} row(s) to {}", s.output_rows, args.final_tsv.display());

    if args.json {
        let report = outcome.report(&config);
        let json = serde_json::to_string_pretty(&report).map_err(|e| CliError {
            code: EXIT_UNIFY_IO,
            message: format!("JSON serialization error: {e}"),
            hint: None,
        })?;
        println!("{json}");
    }

    Ok(())
}

pub fn cmd_validate(config: PathBuf) -> Result<(), CliError> {
    let parsed = load_config(Some(&config))?;
    eprintln!(
        "ok: {} (file_name={}, region_column={}, probability_column={}, duplicates={}, index={})",
        config.display(),
        parsed.input.file_name,
        parsed.input.region_column,
        parsed.input.probability_column,
        parsed.duplicates.policy,
        parsed.output.index,
    );
    Ok(())
}
