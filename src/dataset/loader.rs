//! Delimited-text loading for [`Dataset`].
//!
//! Numeric columns are kept; text columns are dropped except that `reference`
//! and `translation` yield `reference_length` / `translation_length` character
//! counts when those columns are not already present.

use super::Dataset;
use crate::error::Result;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Location of the dataset relative to the project root.
pub const DEFAULT_DATASET_PATH: &str = "data/raw/filtered.tsv";

/// Text columns whose character counts feed the length distributions.
const LENGTH_SOURCES: [(&str, &str); 2] = [
    ("reference", "reference_length"),
    ("translation", "translation_length"),
];

/// Load the project dataset from `root/data/raw/filtered.tsv`.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or parsed.
pub fn load_df(root: &Path) -> Result<Dataset> {
    read_delimited(root.join(DEFAULT_DATASET_PATH))
}

/// Read a delimited file with a header row.
///
/// Files ending in `.tsv` are tab-separated and unquoted; everything else is
/// read as quoted CSV.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or a record is malformed.
pub fn read_delimited<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let path = path.as_ref();
    let tab_separated = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("tsv"));

    log::debug!("loading dataset from {}", path.display());
    let file = File::open(path)?;
    let dataset = read_from(file, if tab_separated { b'\t' } else { b',' })?;
    log::debug!(
        "loaded {} rows x {} numeric columns",
        dataset.row_count(),
        dataset.column_count()
    );
    Ok(dataset)
}

/// Read delimited records from any reader.
///
/// # Errors
///
/// Returns an error if a record is malformed or has the wrong field count.
pub fn read_from<R: Read>(reader: R, delimiter: u8) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .quoting(delimiter != b'\t')
        .has_headers(true)
        .from_reader(reader);

    let mut builders: Vec<ColumnBuilder> = reader
        .headers()?
        .iter()
        .map(|h| ColumnBuilder::new(h.trim()))
        .collect();

    for record in reader.records() {
        let record = record?;
        for (builder, field) in builders.iter_mut().zip(record.iter()) {
            builder.push(field);
        }
    }

    let mut dataset = Dataset::new();
    for builder in &mut builders {
        // Unnamed leading index columns carry no information
        if builder.numeric && !builder.name.is_empty() {
            dataset.insert_column(builder.name.clone(), std::mem::take(&mut builder.values))?;
        }
    }

    for (source, target) in LENGTH_SOURCES {
        if dataset.has_column(target) {
            continue;
        }
        if let Some(builder) = builders.iter_mut().find(|b| b.name == source && !b.numeric) {
            dataset.insert_column(target, std::mem::take(&mut builder.lengths))?;
        }
    }

    Ok(dataset)
}

/// Accumulates one column while its type is still undecided.
struct ColumnBuilder {
    name: String,
    values: Vec<f32>,
    lengths: Vec<f32>,
    numeric: bool,
}

impl ColumnBuilder {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            values: Vec::new(),
            lengths: Vec::new(),
            numeric: true,
        }
    }

    fn push(&mut self, field: &str) {
        let field = field.trim();
        self.lengths.push(field.chars().count() as f32);

        if !self.numeric {
            return;
        }
        if field.is_empty() {
            self.values.push(f32::NAN);
        } else if let Ok(value) = field.parse::<f32>() {
            self.values.push(value);
        } else {
            self.numeric = false;
            self.values = Vec::new();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::io::Write;

    #[test]
    fn test_read_csv_numeric_columns() {
        let data = "similarity,ref_tox,note\n0.5,0.9,hello\n0.7,0.1,world\n";
        let ds = read_from(data.as_bytes(), b',').unwrap();

        assert_eq!(ds.row_count(), 2);
        assert_eq!(ds.column("similarity").unwrap(), &[0.5, 0.7]);
        assert_eq!(ds.column("ref_tox").unwrap(), &[0.9, 0.1]);
        assert!(!ds.has_column("note"));
    }

    #[test]
    fn test_empty_cells_become_nan() {
        let data = "a,b\n1,\n,2\n";
        let ds = read_from(data.as_bytes(), b',').unwrap();
        let a = ds.column("a").unwrap();
        assert_eq!(a[0], 1.0);
        assert!(a[1].is_nan());
    }

    #[test]
    fn test_tsv_derives_lengths_and_skips_index() {
        let data = "\treference\ttranslation\tsimilarity\n\
                    0\tyou are bad\tyou are\t0.8\n\
                    1\t\"quoted\" text\tok\t0.6\n";
        let ds = read_from(data.as_bytes(), b'\t').unwrap();

        assert!(!ds.has_column(""));
        assert_eq!(ds.column("reference_length").unwrap(), &[11.0, 13.0]);
        assert_eq!(ds.column("translation_length").unwrap(), &[7.0, 2.0]);
        assert_eq!(ds.column("similarity").unwrap(), &[0.8, 0.6]);
    }

    #[test]
    fn test_existing_length_column_wins() {
        let data = "reference,reference_length\nabc,10\nde,20\n";
        let ds = read_from(data.as_bytes(), b',').unwrap();
        assert_eq!(ds.column("reference_length").unwrap(), &[10.0, 20.0]);
    }

    #[test]
    fn test_ragged_record_is_error() {
        let data = "a,b\n1,2\n3\n";
        assert!(matches!(read_from(data.as_bytes(), b','), Err(Error::Csv(_))));
    }

    #[test]
    fn test_read_delimited_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.tsv");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "ref_tox\ttrn_tox").unwrap();
        writeln!(file, "0.9\t0.1").unwrap();
        drop(file);

        let ds = read_delimited(&path).unwrap();
        assert_eq!(ds.column("trn_tox").unwrap(), &[0.1]);
    }

    #[test]
    fn test_load_df_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(load_df(dir.path()), Err(Error::Io(_))));
    }
}
