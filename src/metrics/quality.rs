//! Metadata quality: composite score over column naming, type
//! consistency, duplication, and description coverage.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::dataset::Dataset;

/// Matches auto-generated placeholder column names produced by malformed
/// headers ("Unnamed", "Unnamed: 3", "unnamed_0", ...).
fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^unnamed(?:[:_ ]\s*\d+)?$").expect("placeholder pattern is valid")
    })
}

/// Computes the metadata quality score of a dataset.
///
/// Three sub-checks always contribute, each worth one point per column:
///
/// 1. **Naming** — the column name is non-empty and not an
///    auto-generated placeholder.
/// 2. **Type consistency** — all non-missing cells share one value kind
///    (missing cells are excluded before the check; this is a policy
///    choice, see `Column::is_type_consistent`).
/// 3. **Non-duplication** — per duplicate group of identical value
///    sequences, every column past the first loses its point. Content is
///    compared, not names.
///
/// A fourth check is included only when a description map is supplied:
///
/// 4. **Description coverage** — the column has a non-empty description
///    entry.
///
/// The score is earned points over possible points (3 or 4 per column);
/// an empty dataset scores 0.0. The result is invariant under column
/// reordering.
#[must_use]
pub fn metadata_quality(
    dataset: &Dataset,
    descriptions: Option<&BTreeMap<String, String>>,
) -> f64 {
    if dataset.is_empty() {
        return 0.0;
    }

    let columns = dataset.columns();
    let n = columns.len();
    let mut earned = 0usize;

    // 1) Naming.
    earned += columns
        .iter()
        .filter(|c| !c.name.is_empty() && !placeholder_pattern().is_match(&c.name))
        .count();

    // 2) Type consistency.
    earned += columns.iter().filter(|c| c.is_type_consistent()).count();

    // 3) Non-duplication: all but the first column of each duplicate
    //    group keep the blame, so the count is order-independent.
    let duplicates = columns
        .iter()
        .enumerate()
        .filter(|(i, c)| columns[..*i].iter().any(|prior| prior.values == c.values))
        .count();
    earned += n - duplicates;

    // 4) Description coverage, only when a mapping was supplied.
    let mut possible = 3 * n;
    if let Some(descriptions) = descriptions {
        possible += n;
        earned += columns
            .iter()
            .filter(|c| {
                descriptions
                    .get(&c.name)
                    .is_some_and(|text| !text.is_empty())
            })
            .count();
    }

    earned as f64 / possible as f64
}
