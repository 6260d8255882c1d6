use std::fmt;

#[derive(Debug)]
pub enum UnifyError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (empty column name, path in file name, etc.).
    ConfigValidation(String),
    /// Missing required column in an input table.
    MissingColumn { source: String, column: String },
    /// Probability value that is not a number.
    ProbabilityParse { source: String, line: u64, value: String },
    /// Structurally broken input (ragged row, invalid UTF-8).
    Malformed { source: String, message: String },
    /// Region keys repeated within one source under the `error` policy.
    DuplicateRegion { source: String, duplicates: Vec<(String, usize)> },
    /// IO error (file read, write, rename).
    Io(String),
}

impl fmt::Display for UnifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::MissingColumn { source, column } => {
                write!(f, "{source}: missing column '{column}'")
            }
            Self::ProbabilityParse { source, line, value } => {
                write!(f, "{source}, line {line}: cannot parse probability '{value}'")
            }
            Self::Malformed { source, message } => write!(f, "{source}: malformed input: {message}"),
            Self::DuplicateRegion { source, duplicates } => {
                write!(f, "{source}: {} region(s) appear more than once:", duplicates.len())?;
                for (region, count) in duplicates {
                    write!(f, "\n  {region:?} appears {count} times")?;
                }
                Ok(())
            }
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for UnifyError {}
