//! Tabular dataset types.
//!
//! A [`Dataset`] is an ordered sequence of named columns with equal row
//! counts. It is produced by an external acquisition layer and is
//! read-only within the scoring engine: every metric is a pure function
//! over it.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::value::CellValue;

/// A named column of cell values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Column name as delivered by the acquisition layer.
    pub name: String,

    /// Cell values, one per dataset row.
    pub values: Vec<CellValue>,
}

impl Column {
    /// Creates a column from anything convertible to cell values.
    pub fn new(name: impl Into<String>, values: Vec<impl Into<CellValue>>) -> Self {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of non-missing cells.
    #[must_use]
    pub fn present_count(&self) -> usize {
        self.values.iter().filter(|v| !v.is_null()).count()
    }

    /// Non-missing cells with their absolute row indices.
    pub fn present(&self) -> impl Iterator<Item = (usize, &CellValue)> {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, v)| !v.is_null())
    }

    /// Returns true if every non-missing cell is numeric and at least one
    /// non-missing cell exists.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        let mut any = false;
        for (_, value) in self.present() {
            if !value.is_numeric() {
                return false;
            }
            any = true;
        }
        any
    }

    /// Returns true if all non-missing cells share one [`crate::ValueKind`].
    ///
    /// Missing cells are excluded before the check, so a column of nulls
    /// plus a single concrete kind is consistent (policy choice: absence
    /// is not a type). A fully-missing column is vacuously consistent.
    #[must_use]
    pub fn is_type_consistent(&self) -> bool {
        let mut kinds = self.values.iter().filter_map(CellValue::kind);
        match kinds.next() {
            Some(first) => kinds.all(|k| k == first),
            None => true,
        }
    }
}

/// An immutable table of named columns with equal row counts.
///
/// # Examples
///
/// ```
/// use datatrust::{CellValue, Column, Dataset};
///
/// let dataset = Dataset::new(vec![
///     Column::new("name", vec!["alice", "bob"]),
///     Column::new("age", vec![CellValue::Int(34), CellValue::Null]),
/// ])
/// .unwrap();
///
/// assert_eq!(dataset.row_count(), 2);
/// assert_eq!(dataset.cell_count(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    columns: Vec<Column>,
}

impl Dataset {
    /// Creates a dataset, validating the equal-row-count invariant.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::RaggedColumns` naming the first column
    /// whose length differs from the first column's.
    pub fn new(columns: Vec<Column>) -> Result<Self, ValidationError> {
        if let Some(first) = columns.first() {
            let expected = first.values.len();
            for column in &columns {
                if column.values.len() != expected {
                    return Err(ValidationError::RaggedColumns {
                        column: column.name.clone(),
                        expected,
                        actual: column.values.len(),
                    });
                }
            }
        }
        Ok(Self { columns })
    }

    /// Creates a dataset with no columns.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            columns: Vec::new(),
        }
    }

    /// Number of rows (0 for a column-less dataset).
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }

    /// Number of columns.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Total number of cells (rows x columns).
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.row_count() * self.column_count()
    }

    /// Returns true if the dataset has zero rows or zero columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cell_count() == 0
    }

    /// All columns, in order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Looks up a column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ragged_columns_rejected() {
        let err = Dataset::new(vec![
            Column::new("a", vec![1i64, 2]),
            Column::new("b", vec![1i64]),
        ])
        .unwrap_err();

        match err {
            ValidationError::RaggedColumns {
                column,
                expected,
                actual,
            } => {
                assert_eq!(column, "b");
                assert_eq!(expected, 2);
                assert_eq!(actual, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_dataset_counts() {
        let ds = Dataset::empty();
        assert_eq!(ds.row_count(), 0);
        assert_eq!(ds.cell_count(), 0);
        assert!(ds.is_empty());

        // Columns with zero rows are also empty.
        let ds = Dataset::new(vec![Column::new("a", Vec::<i64>::new())]).unwrap();
        assert!(ds.is_empty());
        assert_eq!(ds.column_count(), 1);
    }

    #[test]
    fn test_present_count_keeps_zero_and_empty_string() {
        let column = Column::new(
            "v",
            vec![
                CellValue::Int(0),
                CellValue::Text(String::new()),
                CellValue::Null,
            ],
        );
        assert_eq!(column.present_count(), 2);
    }

    #[test]
    fn test_numeric_column_detection() {
        let numeric = Column::new("n", vec![CellValue::Int(1), CellValue::Null, CellValue::Float(2.5)]);
        assert!(numeric.is_numeric());

        let mixed = Column::new("m", vec![CellValue::Int(1), CellValue::Text("x".into())]);
        assert!(!mixed.is_numeric());

        let all_null = Column::new("z", vec![CellValue::Null, CellValue::Null]);
        assert!(!all_null.is_numeric());
    }

    #[test]
    fn test_type_consistency_excludes_nulls() {
        let consistent = Column::new("c", vec![CellValue::Null, CellValue::Int(1), CellValue::Float(2.0)]);
        assert!(consistent.is_type_consistent());

        let inconsistent = Column::new("i", vec![CellValue::Int(1), CellValue::Bool(true)]);
        assert!(!inconsistent.is_type_consistent());

        let vacuous = Column::new("v", vec![CellValue::Null]);
        assert!(vacuous.is_type_consistent());
    }

    #[test]
    fn test_column_lookup() {
        let ds = Dataset::new(vec![Column::new("a", vec![1i64])]).unwrap();
        assert!(ds.column("a").is_some());
        assert!(ds.column("missing").is_none());
    }
}
