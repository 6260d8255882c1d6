//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract: pipeline rules rely on them.
//!
//! # Exit Code Ranges
//!
//! | Code | Domain    | Description                                   |
//! |------|-----------|-----------------------------------------------|
//! | 0    | Universal | Success                                       |
//! | 1    | Universal | General error (unspecified)                   |
//! | 2    | Universal | CLI usage error (bad args, reported by clap)  |
//! | 3    | unify     | Invalid config file                           |
//! | 4    | unify     | Unparsable input table                        |
//! | 5    | unify     | Duplicate regions under the `error` policy    |
//! | 6    | unify     | IO error (read, write, rename, log file)      |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant in the appropriate range
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into `unify_exit_code` or the command's error handling

use termex_unify::UnifyError;

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
/// clap exits with this code on its own; listed for completeness.
#[allow(dead_code)]
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Unify (3-9)
// =============================================================================

/// Config file failed to parse or validate.
pub const EXIT_UNIFY_INVALID_CONFIG: u8 = 3;

/// Input table unparsable: missing column, bad probability, ragged row.
pub const EXIT_UNIFY_PARSE: u8 = 4;

/// A region occurs more than once in one source (`error` duplicate policy).
pub const EXIT_UNIFY_DUPLICATE: u8 = 5;

/// Reading inputs or writing the output failed.
pub const EXIT_UNIFY_IO: u8 = 6;

/// Map an engine error to its exit code.
pub fn unify_exit_code(err: &UnifyError) -> u8 {
    match err {
        UnifyError::ConfigParse(_) | UnifyError::ConfigValidation(_) => EXIT_UNIFY_INVALID_CONFIG,
        UnifyError::MissingColumn { .. }
        | UnifyError::ProbabilityParse { .. }
        | UnifyError::Malformed { .. } => EXIT_UNIFY_PARSE,
        UnifyError::DuplicateRegion { .. } => EXIT_UNIFY_DUPLICATE,
        UnifyError::Io(_) => EXIT_UNIFY_IO,
    }
}
