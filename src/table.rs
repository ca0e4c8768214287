//! Columnar table input model.
//!
//! Every chart consumes a [`Table`]: named columns of [`Value`]s where a cell
//! is numeric, text, or missing. Tables are built fresh per call and never
//! retained by the library.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use crate::error::{Error, Result};

/// A cell value in a table.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A numeric value.
    Number(f32),
    /// A text value.
    Text(String),
    /// A missing value.
    Null,
}

impl Value {
    /// Get as f32, or None if not a number.
    #[must_use]
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as string slice, or None if not text.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Whether the value is missing.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Total ordering over non-null values: numbers first (numeric order),
    /// then text (lexicographic). Nulls sort last.
    #[must_use]
    pub fn order(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            (Value::Number(_), Value::Text(_)) => Ordering::Less,
            (Value::Text(_), Value::Number(_)) => Ordering::Greater,
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Null, _) => Ordering::Greater,
            (_, Value::Null) => Ordering::Less,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1.0e7 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{n}")
                }
            }
            Value::Text(s) => write!(f, "{s}"),
            Value::Null => Ok(()),
        }
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Number(v)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Option<f32>> for Value {
    fn from(v: Option<f32>) -> Self {
        v.map_or(Value::Null, Value::Number)
    }
}

/// A columnar table with named columns.
///
/// Columns may differ in length; reads past a column's end yield
/// [`Value::Null`], and the row count is the longest column.
#[derive(Debug, Clone, Default)]
pub struct Table {
    /// Column data keyed by column name.
    columns: HashMap<String, Vec<Value>>,
    /// Number of rows (longest column).
    n_rows: usize,
}

impl Table {
    /// Create a new empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a column of raw values.
    pub fn add_column(&mut self, name: &str, values: Vec<Value>) {
        self.n_rows = self.n_rows.max(values.len());
        self.columns.insert(name.to_string(), values);
    }

    /// Add a numeric column.
    pub fn add_column_f32(&mut self, name: &str, data: &[f32]) {
        self.add_column(name, data.iter().map(|&v| Value::Number(v)).collect());
    }

    /// Add a nullable numeric column.
    pub fn add_column_opt_f32(&mut self, name: &str, data: &[Option<f32>]) {
        self.add_column(name, data.iter().map(|&v| Value::from(v)).collect());
    }

    /// Add a text column.
    pub fn add_column_str(&mut self, name: &str, data: &[&str]) {
        self.add_column(
            name,
            data.iter().map(|&s| Value::Text(s.to_string())).collect(),
        );
    }

    /// Get a column's values.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&[Value]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// Get a column's values, or fail with [`Error::ColumnNotFound`].
    pub fn require_column(&self, name: &str) -> Result<&[Value]> {
        self.column(name)
            .ok_or_else(|| Error::ColumnNotFound(name.to_string()))
    }

    /// Get the value at (row, column). Null for short columns or out-of-range
    /// rows.
    #[must_use]
    pub fn value(&self, row: usize, column: &str) -> Value {
        self.columns
            .get(column)
            .and_then(|col| col.get(row).cloned())
            .unwrap_or(Value::Null)
    }

    /// Get number of rows.
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Get number of columns.
    #[must_use]
    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// Check if a column exists.
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Get column names.
    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.keys().map(String::as_str).collect()
    }

    /// Sorted distinct non-null values of a column.
    ///
    /// This is the default category-axis derivation: numbers sort before
    /// text, numbers numerically, text lexicographically.
    #[must_use]
    pub fn distinct_sorted(&self, column: &str) -> Vec<Value> {
        let Some(col) = self.columns.get(column) else {
            return Vec::new();
        };

        let mut values: Vec<Value> = col.iter().filter(|v| !v.is_null()).cloned().collect();
        values.sort_by(Value::order);
        values.dedup_by(|a, b| a.order(b) == Ordering::Equal);
        values
    }

    /// Build a new table keeping only rows the predicate accepts.
    ///
    /// Row alignment across columns is preserved; short columns contribute
    /// Null cells to the rows they lack.
    #[must_use]
    pub fn filter_rows<F: Fn(usize) -> bool>(&self, keep: F) -> Table {
        let kept: Vec<usize> = (0..self.n_rows).filter(|&i| keep(i)).collect();

        let mut out = Table::new();
        for name in self.columns.keys() {
            let values: Vec<Value> = kept.iter().map(|&i| self.value(i, name)).collect();
            out.add_column(name, values);
        }
        out.n_rows = kept.len();
        out
    }

    /// Keep rows whose value under `column` is one of `values`.
    #[must_use]
    pub fn retain_in(&self, column: &str, values: &[Value]) -> Table {
        self.filter_rows(|i| {
            let v = self.value(i, column);
            values.iter().any(|w| *w == v)
        })
    }
}
