//! Before/after pair alignment for dumbbell charts.

use crate::error::{Error, Result};
use crate::table::{Table, Value};

/// Wide, row-ordered form of a two-marker table.
///
/// One entry per surviving row label, with `before[i]` and `after[i]`
/// aligned to `labels[i]`, ordered ascending by the after value.
#[derive(Debug, Clone)]
pub struct PairedSeries {
    /// Row labels in display order.
    pub labels: Vec<Value>,
    /// Values under the first (before) marker.
    pub before: Vec<f32>,
    /// Values under the second (after) marker.
    pub after: Vec<f32>,
    /// The (before, after) marker values the columns were built from.
    pub markers: (Value, Value),
}

impl PairedSeries {
    /// Number of surviving rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether no row survived.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Pivot a long table into aligned before/after pairs.
///
/// `markers` fixes which grouping value is "before" and which is "after";
/// when omitted the two sorted distinct values of `marker_col` are used, and
/// any other cardinality is a validation error. Row labels with a missing
/// value under either marker are dropped, and the survivors are sorted
/// ascending by the after value — that order is the display order along the
/// categorical axis.
///
/// # Errors
///
/// [`Error::ColumnNotFound`] for absent columns,
/// [`Error::MarkerCardinality`] when defaulted markers do not number exactly
/// two.
pub fn align_pairs(
    table: &Table,
    value_col: &str,
    label_col: &str,
    marker_col: &str,
    markers: Option<(Value, Value)>,
) -> Result<PairedSeries> {
    table.require_column(value_col)?;
    table.require_column(label_col)?;
    table.require_column(marker_col)?;

    let (before_marker, after_marker) = match markers {
        Some(pair) => pair,
        None => match <[Value; 2]>::try_from(table.distinct_sorted(marker_col)) {
            Ok([before, after]) => (before, after),
            Err(distinct) => {
                return Err(Error::MarkerCardinality {
                    column: marker_col.to_string(),
                    count: distinct.len(),
                })
            }
        },
    };

    // First-encountered label order before sorting
    let mut labels: Vec<Value> = Vec::new();
    for i in 0..table.n_rows() {
        let label = table.value(i, label_col);
        if !label.is_null() && !labels.contains(&label) {
            labels.push(label);
        }
    }

    // Wide form: first row matching (label, marker) supplies the cell
    let cell = |label: &Value, marker: &Value| -> Option<f32> {
        (0..table.n_rows()).find_map(|i| {
            if table.value(i, label_col) == *label && table.value(i, marker_col) == *marker {
                table.value(i, value_col).as_f32()
            } else {
                None
            }
        })
    };

    let mut rows: Vec<(Value, f32, f32)> = labels
        .into_iter()
        .filter_map(|label| {
            let before = cell(&label, &before_marker)?;
            let after = cell(&label, &after_marker)?;
            Some((label, before, after))
        })
        .collect();

    rows.sort_by(|a, b| a.2.partial_cmp(&b.2).unwrap_or(std::cmp::Ordering::Equal));

    let mut labels = Vec::with_capacity(rows.len());
    let mut before = Vec::with_capacity(rows.len());
    let mut after = Vec::with_capacity(rows.len());
    for (label, b, a) in rows {
        labels.push(label);
        before.push(b);
        after.push(a);
    }

    Ok(PairedSeries {
        labels,
        before,
        after,
        markers: (before_marker, after_marker),
    })
}
