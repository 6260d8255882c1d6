use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::OutputConfig;
use crate::error::UnifyError;
use crate::model::RecordSet;

/// Write a record set as TSV. Fields a record lacks are written empty.
pub fn write_tsv<W: Write>(set: &RecordSet, writer: W, options: &OutputConfig) -> Result<(), UnifyError> {
    let mut out = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_writer(writer);

    if !set.columns.is_empty() || options.index {
        let mut header: Vec<&str> = Vec::with_capacity(set.columns.len() + 1);
        if options.index {
            header.push("");
        }
        header.extend(set.columns.iter().map(|c| c.as_str()));
        out.write_record(&header).map_err(csv_err)?;
    }

    for (i, record) in set.records.iter().enumerate() {
        let mut row: Vec<String> = Vec::with_capacity(set.columns.len() + 1);
        if options.index {
            row.push(i.to_string());
        }
        row.extend(set.columns.iter().map(|c| record.field(c).to_string()));
        out.write_record(&row).map_err(csv_err)?;
    }

    out.flush().map_err(|e| UnifyError::Io(e.to_string()))
}

/// Write TSV to `path` atomically: write `<path>.tmp` then rename.
pub fn write_tsv_file(set: &RecordSet, path: &Path, options: &OutputConfig) -> Result<(), UnifyError> {
    let tmp_path = tmp_path_for(path)?;

    let result = File::create(&tmp_path)
        .map_err(|e| UnifyError::Io(format!("cannot create {}: {e}", tmp_path.display())))
        .and_then(|file| write_tsv(set, BufWriter::new(file), options))
        .and_then(|()| {
            std::fs::rename(&tmp_path, path).map_err(|e| {
                UnifyError::Io(format!("failed to rename tmp to {}: {e}", path.display()))
            })
        });

    if result.is_err() {
        let _ = std::fs::remove_file(&tmp_path);
    }
    result
}

fn tmp_path_for(path: &Path) -> Result<PathBuf, UnifyError> {
    let mut name = path
        .file_name()
        .ok_or_else(|| UnifyError::Io(format!("output path has no file name: {}", path.display())))?
        .to_os_string();
    name.push(".tmp");
    Ok(path.with_file_name(name))
}

fn csv_err(e: csv::Error) -> UnifyError {
    UnifyError::Io(format!("TSV write error: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ClassificationRecord;
    use std::collections::HashMap;

    fn rec(pairs: &[(&str, &str)]) -> ClassificationRecord {
        let fields: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ClassificationRecord {
            region: fields.get("region").cloned().unwrap_or_default(),
            terminal_probability: 0.0,
            fields,
        }
    }

    fn sample() -> RecordSet {
        RecordSet::new(
            vec!["region".into(), "terminal_probability".into(), "gene".into()],
            vec![
                rec(&[("region", "chr1:100-200"), ("terminal_probability", "0.80"), ("gene", "X")]),
                rec(&[("region", "chr2:50-80"), ("terminal_probability", "0.9")]),
            ],
        )
    }

    fn render(set: &RecordSet, index: bool) -> String {
        let mut buf = Vec::new();
        write_tsv(set, &mut buf, &OutputConfig { index }).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn plain_output_keeps_raw_text_and_blanks_missing() {
        assert_eq!(
            render(&sample(), false),
            "region\tterminal_probability\tgene\nchr1:100-200\t0.80\tX\nchr2:50-80\t0.9\t\n"
        );
    }

    #[test]
    fn index_mode_prepends_row_numbers() {
        let text = render(&sample(), true);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "\tregion\tterminal_probability\tgene");
        assert_eq!(lines[1], "0\tchr1:100-200\t0.80\tX");
        assert_eq!(lines[2], "1\tchr2:50-80\t0.9\t");
    }

    #[test]
    fn file_write_leaves_no_tmp() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("final.tsv");
        write_tsv_file(&sample(), &path, &OutputConfig::default()).unwrap();
        assert!(path.is_file());
        assert!(!dir.path().join("final.tsv.tmp").exists());
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("region\t"));
    }

    #[test]
    fn unwritable_destination_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing_dir").join("final.tsv");
        let err = write_tsv_file(&sample(), &path, &OutputConfig::default()).unwrap_err();
        assert!(matches!(err, UnifyError::Io(_)));
        assert!(!path.exists());
    }
}
