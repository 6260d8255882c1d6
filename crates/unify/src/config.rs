use serde::Deserialize;

use crate::error::UnifyError;

/// File name each scan directory is expected to contain.
pub const DEFAULT_RESULT_FILE: &str = "classified_as_terminal_with_probabilities.tsv";
pub const DEFAULT_REGION_COLUMN: &str = "region";
pub const DEFAULT_PROBABILITY_COLUMN: &str = "terminal_probability";

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnifyConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub duplicates: DuplicateConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputConfig {
    #[serde(default = "default_file_name")]
    pub file_name: String,
    #[serde(default = "default_region_column")]
    pub region_column: String,
    #[serde(default = "default_probability_column")]
    pub probability_column: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            file_name: default_file_name(),
            region_column: default_region_column(),
            probability_column: default_probability_column(),
        }
    }
}

fn default_file_name() -> String {
    DEFAULT_RESULT_FILE.into()
}

fn default_region_column() -> String {
    DEFAULT_REGION_COLUMN.into()
}

fn default_probability_column() -> String {
    DEFAULT_PROBABILITY_COLUMN.into()
}

// ---------------------------------------------------------------------------
// Duplicate regions within one source
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DuplicateConfig {
    #[serde(default)]
    pub policy: DuplicatePolicy,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Keep the highest-probability row per region; later rows win ties.
    #[default]
    KeepMax,
    /// Keep the last row per region.
    KeepLast,
    /// Reject the source.
    Error,
}

impl std::fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::KeepMax => write!(f, "keep_max"),
            Self::KeepLast => write!(f, "keep_last"),
            Self::Error => write!(f, "error"),
        }
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Prepend an unnamed 0-based row index column.
    #[serde(default)]
    pub index: bool,
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl UnifyConfig {
    pub fn from_toml(input: &str) -> Result<Self, UnifyError> {
        let config: UnifyConfig =
            toml::from_str(input).map_err(|e| UnifyError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), UnifyError> {
        let input = &self.input;

        for (key, value) in [
            ("input.file_name", &input.file_name),
            ("input.region_column", &input.region_column),
            ("input.probability_column", &input.probability_column),
        ] {
            if value.trim().is_empty() {
                return Err(UnifyError::ConfigValidation(format!("{key} must not be empty")));
            }
        }

        if input.region_column == input.probability_column {
            return Err(UnifyError::ConfigValidation(format!(
                "region and probability columns must differ, both are '{}'",
                input.region_column
            )));
        }

        // Joined onto each scan directory, so it has to stay a bare name
        if input.file_name.contains('/') || input.file_name.contains('\\') {
            return Err(UnifyError::ConfigValidation(format!(
                "input.file_name must be a file name, not a path: '{}'",
                input.file_name
            )));
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
