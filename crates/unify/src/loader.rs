use std::collections::{HashMap, HashSet};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::config::InputConfig;
use crate::error::UnifyError;
use crate::model::{ClassificationRecord, RecordSet};

/// Resolve a scan location to the result file it designates.
///
/// An existing file is used as-is; anything else is treated as the scan's
/// output directory and joined with `config.file_name`.
pub fn result_path(location: &Path, config: &InputConfig) -> PathBuf {
    if location.is_file() {
        location.to_path_buf()
    } else {
        location.join(&config.file_name)
    }
}

/// Load one scan's classification table.
///
/// A missing result file is normal (the scan produced no calls) and yields an
/// empty set. Anything unreadable or unparsable is an error.
pub fn load(location: &Path, source: &str, config: &InputConfig) -> Result<RecordSet, UnifyError> {
    let path = result_path(location, config);
    if !path.is_file() {
        info!("{source}: {} not found, treating as empty", path.display());
        return Ok(RecordSet::default());
    }

    let data = std::fs::read_to_string(&path).map_err(|e| match e.kind() {
        ErrorKind::InvalidData => UnifyError::Malformed {
            source: source.into(),
            message: format!("{} is not valid UTF-8", path.display()),
        },
        _ => UnifyError::Io(format!("cannot read {}: {e}", path.display())),
    })?;

    let set = parse_records(source, &data, config)?;
    debug!(
        "{source}: loaded {} record(s), {} column(s) from {}",
        set.len(),
        set.columns.len(),
        path.display()
    );
    Ok(set)
}

/// Parse a tab-separated classification table held in memory.
pub fn parse_records(source: &str, data: &str, config: &InputConfig) -> Result<RecordSet, UnifyError> {
    if data.trim().is_empty() {
        warn!("{source}: input is empty, treating as no records");
        return Ok(RecordSet::default());
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .from_reader(data.as_bytes());

    let raw_headers = reader.headers().map_err(|e| malformed(source, e))?;
    let headers = normalize_headers(raw_headers.iter());

    let idx = |name: &str| -> Result<usize, UnifyError> {
        headers.iter().position(|h| h == name).ok_or_else(|| UnifyError::MissingColumn {
            source: source.into(),
            column: name.into(),
        })
    };

    let region_idx = idx(&config.region_column)?;
    let probability_idx = idx(&config.probability_column)?;

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result.map_err(|e| malformed(source, e))?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);

        let raw_probability = row.get(probability_idx).unwrap_or("");
        let terminal_probability =
            parse_probability(raw_probability).ok_or_else(|| UnifyError::ProbabilityParse {
                source: source.into(),
                line,
                value: raw_probability.into(),
            })?;

        let fields: HashMap<String, String> = headers
            .iter()
            .cloned()
            .zip(row.iter().map(|v| v.to_string()))
            .collect();

        records.push(ClassificationRecord {
            region: row.get(region_idx).unwrap_or("").to_string(),
            terminal_probability,
            fields,
        });
    }

    Ok(RecordSet::new(headers, records))
}

/// Parse a probability cell. Empty, non-numeric and NaN values are rejected;
/// out-of-range values are kept as they are.
pub fn parse_probability(raw: &str) -> Option<f64> {
    let value: f64 = raw.trim().parse().ok()?;
    if value.is_nan() {
        None
    } else {
        Some(value)
    }
}

/// Name empty headers `Unnamed: <i>` and suffix repeats with `.1`, `.2`, ...
fn normalize_headers<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut headers = Vec::new();

    for (i, h) in raw.enumerate() {
        let base = if h.is_empty() {
            format!("Unnamed: {i}")
        } else {
            h.to_string()
        };
        let mut name = base.clone();
        let mut n = 0;
        while seen.contains(&name) {
            n += 1;
            name = format!("{base}.{n}");
        }
        seen.insert(name.clone());
        headers.push(name);
    }

    headers
}

fn malformed(source: &str, err: csv::Error) -> UnifyError {
    UnifyError::Malformed {
        source: source.into(),
        message: err.to_string(),
    }
}
