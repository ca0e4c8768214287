//! Category axis: completion filtering, aligned series extraction, and axis
//! positions.

use crate::error::{Error, Result};
use crate::table::{Table, Value};

/// An ordered set of category values along one plotting axis.
#[derive(Debug, Clone)]
pub struct CategoryAxis {
    categories: Vec<Value>,
}

impl CategoryAxis {
    /// Create an axis from caller-supplied ordered categories.
    #[must_use]
    pub fn new(categories: Vec<Value>) -> Self {
        Self { categories }
    }

    /// Derive an axis from the sorted distinct non-null values of a column.
    #[must_use]
    pub fn from_column(table: &Table, column: &str) -> Self {
        Self::new(table.distinct_sorted(column))
    }

    /// The ordered category values.
    #[must_use]
    pub fn categories(&self) -> &[Value] {
        &self.categories
    }

    /// Number of categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Whether the axis has no categories.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Axis positions `1 + i * 2 / (n - 1)`, spanning 1.0 to 3.0.
    ///
    /// A single category sits at 1.0; the divisor is only formed for n >= 2.
    #[must_use]
    pub fn positions(&self) -> Vec<f32> {
        let n = self.categories.len();
        match n {
            0 => Vec::new(),
            1 => vec![1.0],
            _ => (0..n)
                .map(|i| 1.0 + (i as f32) * 2.0 / ((n - 1) as f32))
                .collect(),
        }
    }

    /// Group labels whose rows cover every category exactly once.
    ///
    /// A row counts toward a (group, category) cell only if its y value is
    /// numeric — a missing measurement leaves the group incomplete. Labels
    /// come back in first-encountered table order, so the ordering is fixed
    /// and caller-independent.
    pub fn complete_groups(
        &self,
        table: &Table,
        x_col: &str,
        y_col: &str,
        group_col: &str,
    ) -> Result<Vec<Value>> {
        let groups_col = table.require_column(group_col)?;
        table.require_column(x_col)?;
        table.require_column(y_col)?;

        // First-encountered order of non-null group labels
        let mut labels: Vec<Value> = Vec::new();
        for label in groups_col.iter().filter(|v| !v.is_null()) {
            if !labels.contains(label) {
                labels.push(label.clone());
            }
        }

        let mut complete = Vec::new();
        'labels: for label in labels {
            for category in &self.categories {
                let count = (0..table.n_rows())
                    .filter(|&i| {
                        table.value(i, group_col) == label
                            && table.value(i, x_col) == *category
                            && table.value(i, y_col).as_f32().is_some()
                    })
                    .count();
                if count != 1 {
                    continue 'labels;
                }
            }
            complete.push(label);
        }

        Ok(complete)
    }

    /// One value sequence per category, aligned to the given group ordering.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::SeriesMisaligned`] if any (group, category) cell
    /// cannot be filled — the group set must come from
    /// [`complete_groups`](Self::complete_groups), and a hole here means the
    /// filter and the extraction disagree. Truncating silently would draw
    /// lines between the wrong groups.
    pub fn extract_series(
        &self,
        table: &Table,
        x_col: &str,
        y_col: &str,
        group_col: &str,
        groups: &[Value],
    ) -> Result<Vec<Vec<f32>>> {
        let mut series = Vec::with_capacity(self.categories.len());

        for category in &self.categories {
            let mut values = Vec::with_capacity(groups.len());
            for group in groups {
                let found = (0..table.n_rows()).find_map(|i| {
                    if table.value(i, group_col) == *group
                        && table.value(i, x_col) == *category
                    {
                        table.value(i, y_col).as_f32()
                    } else {
                        None
                    }
                });
                if let Some(v) = found {
                    values.push(v);
                }
            }

            if values.len() != groups.len() {
                return Err(Error::SeriesMisaligned {
                    category: category.to_string(),
                    expected: groups.len(),
                    actual: values.len(),
                });
            }
            series.push(values);
        }

        Ok(series)
    }
}
