//! Completeness: fraction of non-missing cells.

use crate::dataset::{Column, Dataset};

/// Computes the completeness score of a dataset.
///
/// Completeness = non-missing cells / total cells. An empty dataset
/// (zero rows or zero columns) scores exactly 0.0. Only the explicit
/// `Null` marker counts as missing; a literal zero or empty string is a
/// present value.
///
/// The result is raw; round with [`crate::metrics::round4`] for display.
///
/// # Examples
///
/// ```
/// use datatrust::{completeness, CellValue, Column, Dataset};
///
/// let dataset = Dataset::new(vec![
///     Column::new("a", vec![CellValue::Int(1), CellValue::Null]),
///     Column::new("b", vec![CellValue::Int(2), CellValue::Int(3)]),
/// ])
/// .unwrap();
///
/// assert_eq!(completeness(&dataset), 0.75);
/// ```
#[must_use]
pub fn completeness(dataset: &Dataset) -> f64 {
    if dataset.is_empty() {
        return 0.0;
    }
    let present: usize = dataset.columns().iter().map(Column::present_count).sum();
    present as f64 / dataset.cell_count() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::CellValue;

    #[test]
    fn test_empty_dataset_scores_zero() {
        assert_eq!(completeness(&Dataset::empty()), 0.0);

        let zero_rows = Dataset::new(vec![Column::new("a", Vec::<i64>::new())]).unwrap();
        assert_eq!(completeness(&zero_rows), 0.0);
    }

    #[test]
    fn test_fully_present_scores_one() {
        let dataset = Dataset::new(vec![
            Column::new("a", vec![0i64, 1, 2]),
            Column::new("b", vec!["", "x", "y"]),
        ])
        .unwrap();
        assert_eq!(completeness(&dataset), 1.0);
    }

    #[test]
    fn test_three_missing_of_twelve() {
        // The 4x3 scenario: 3 missing cells out of 12.
        let dataset = Dataset::new(vec![
            Column::new(
                "name",
                vec![
                    CellValue::from("alice"),
                    CellValue::from("bob"),
                    CellValue::Null,
                    CellValue::from("david"),
                ],
            ),
            Column::new(
                "age",
                vec![
                    CellValue::Int(25),
                    CellValue::Null,
                    CellValue::Int(0),
                    CellValue::Int(0),
                ],
            ),
            Column::new(
                "city",
                vec![
                    CellValue::from("new york"),
                    CellValue::from("los angeles"),
                    CellValue::from("chicago"),
                    CellValue::Null,
                ],
            ),
        ])
        .unwrap();

        assert!((completeness(&dataset) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_range_bound() {
        let all_null = Dataset::new(vec![Column::new(
            "a",
            vec![CellValue::Null, CellValue::Null],
        )])
        .unwrap();
        assert_eq!(completeness(&all_null), 0.0);
    }
}
