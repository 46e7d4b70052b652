//! Tabular dataset of named numeric columns.

mod loader;

pub use loader::{load_df, read_delimited, read_from, DEFAULT_DATASET_PATH};

use crate::error::{Error, Result};
use crate::stats::Summary;

/// Columns every report figure set draws from.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "length_diff",
    "similarity",
    "reference_length",
    "translation_length",
    "ref_tox",
    "trn_tox",
];

/// Rectangular collection of equally long `f32` columns, addressed by name.
///
/// Missing cells are stored as NaN. Column order is insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    names: Vec<String>,
    columns: Vec<Vec<f32>>,
}

impl Dataset {
    /// Create an empty dataset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a column, builder style.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataLengthMismatch`] if the column length differs from
    /// the existing row count.
    pub fn with_column(mut self, name: impl Into<String>, values: Vec<f32>) -> Result<Self> {
        self.insert_column(name, values)?;
        Ok(self)
    }

    /// Add a column, replacing any column of the same name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataLengthMismatch`] if the column length differs from
    /// the row count of the other columns.
    pub fn insert_column(&mut self, name: impl Into<String>, values: Vec<f32>) -> Result<()> {
        let name = name.into();
        let existing = self.position(&name);

        let others_define_rows = self.columns.len() > usize::from(existing.is_some());
        if others_define_rows {
            let expected = self
                .columns
                .iter()
                .enumerate()
                .find(|(i, _)| Some(*i) != existing)
                .map_or(values.len(), |(_, col)| col.len());
            if values.len() != expected {
                return Err(Error::DataLengthMismatch {
                    expected,
                    actual: values.len(),
                });
            }
        }

        match existing {
            Some(i) => self.columns[i] = values,
            None => {
                self.names.push(name);
                self.columns.push(values);
            }
        }
        Ok(())
    }

    /// Look up a column by exact name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingColumn`] if no column has that name.
    pub fn column(&self, name: &str) -> Result<&[f32]> {
        self.position(name)
            .map(|i| self.columns[i].as_slice())
            .ok_or_else(|| Error::MissingColumn {
                name: name.to_string(),
            })
    }

    /// Check that every named column is present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingColumn`] naming the first absent column.
    pub fn require(&self, names: &[&str]) -> Result<()> {
        names.iter().try_for_each(|name| self.column(name).map(|_| ()))
    }

    /// Whether a column with this name exists.
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Column names in insertion order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Number of columns.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    /// True when the dataset has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    /// Summary statistics of a column's finite values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingColumn`] for unknown names and
    /// [`Error::EmptyData`] if the column has no finite values.
    pub fn describe(&self, name: &str) -> Result<Summary> {
        Summary::of(self.column(name)?).ok_or(Error::EmptyData)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }
}
