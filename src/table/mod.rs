pub mod names;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::TableError;

/// A single cell of a tabular export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Value {
    fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "a flag",
            Self::Number(_) => "a number",
            Self::Text(_) => "text",
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// One record of a table: a mapping from column name to cell value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    columns: HashMap<String, Value>,
}

impl Row {
    /// Returns the raw cell value of a column, if present.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns.get(column)
    }

    /// Returns `true` if the column holds exactly the given text.
    #[must_use]
    pub fn is(&self, column: &str, text: &str) -> bool {
        matches!(self.get(column), Some(Value::Text(t)) if t == text)
    }

    /// Returns the column's boolean value, or `false` if the column is
    /// absent or not a flag.
    #[must_use]
    pub fn flag(&self, column: &str) -> bool {
        matches!(self.get(column), Some(Value::Bool(true)))
    }

    /// Returns the column's text value if it is present and textual.
    #[must_use]
    pub fn text_opt(&self, column: &str) -> Option<&str> {
        match self.get(column) {
            Some(Value::Text(t)) => Some(t),
            _ => None,
        }
    }

    /// Returns the column's text value.
    ///
    /// # Errors
    ///
    /// Returns an error if the column is absent or holds a non-text value.
    pub fn text(&self, column: &'static str) -> Result<&str, TableError> {
        match self.get(column) {
            Some(Value::Text(t)) => Ok(t),
            Some(other) => Err(TableError::ColumnType {
                column,
                expected: "text",
                found: other.type_name(),
            }),
            None => Err(TableError::MissingColumn(column)),
        }
    }

    /// Returns the column's numeric value.
    ///
    /// # Errors
    ///
    /// Returns an error if the column is absent or holds a non-numeric value.
    pub fn number(&self, column: &'static str) -> Result<f64, TableError> {
        match self.get(column) {
            Some(Value::Number(n)) => Ok(*n),
            Some(other) => Err(TableError::ColumnType {
                column,
                expected: "a number",
                found: other.type_name(),
            }),
            None => Err(TableError::MissingColumn(column)),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            columns: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// In-memory store of an entire tabular export: table name to ordered rows.
///
/// The store is filled by an external parser and only queried here. A table
/// that was never exported reads as empty rather than as an error; absence
/// of a *specific* row is reported by [`TableStore::row_by`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableStore {
    tables: HashMap<String, Vec<Row>>,
}

impl TableStore {
    /// Creates a new, empty table store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts (or replaces) a table under the given name.
    pub fn insert(&mut self, name: impl Into<String>, rows: Vec<Row>) {
        self.tables.insert(name.into(), rows);
    }

    /// Returns the ordered rows of a table, empty if the table is absent.
    #[must_use]
    pub fn rows(&self, name: &str) -> &[Row] {
        self.tables.get(name).map_or(&[], Vec::as_slice)
    }

    /// Returns the first row of a table satisfying the predicate.
    pub fn find_row<P>(&self, name: &str, pred: P) -> Option<&Row>
    where
        P: Fn(&Row) -> bool,
    {
        self.rows(name).iter().find(|row| pred(row))
    }

    /// Returns all rows of a table satisfying the predicate, in table order.
    pub fn find_rows<'a, P>(&'a self, name: &str, pred: P) -> impl Iterator<Item = &'a Row>
    where
        P: Fn(&Row) -> bool + 'a,
    {
        self.rows(name).iter().filter(move |row| pred(row))
    }

    /// Looks up the row of a table whose `column` holds the text `key`.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::RowNotFound`] if no such row exists, so a
    /// missing reference is never conflated with an empty result.
    pub fn row_by(
        &self,
        table: &'static str,
        column: &'static str,
        key: &str,
    ) -> Result<&Row, TableError> {
        self.find_row(table, |row| row.is(column, key))
            .ok_or_else(|| TableError::RowNotFound {
                table,
                column,
                key: key.to_owned(),
            })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn store() -> TableStore {
        let mut store = TableStore::new();
        store.insert(
            "T",
            vec![
                Row::from_iter([
                    ("Name", Value::from("A")),
                    ("t3", Value::from(10.0)),
                    ("Opening", Value::from(false)),
                ]),
                Row::from_iter([
                    ("Name", Value::from("B")),
                    ("t3", Value::from(4.0)),
                    ("Opening", Value::from(true)),
                ]),
            ],
        );
        store
    }

    #[test]
    fn missing_table_reads_empty() {
        assert!(store().rows("NO SUCH TABLE").is_empty());
    }

    #[test]
    fn find_row_first_match() {
        let store = store();
        let row = store.find_row("T", |r| r.number("t3").unwrap() > 3.0).unwrap();
        assert!(row.is("Name", "A"));
    }

    #[test]
    fn find_rows_preserves_order() {
        let store = store();
        let names: Vec<_> = store
            .find_rows("T", |r| r.get("t3").is_some())
            .map(|r| r.text("Name").unwrap().to_owned())
            .collect();
        assert_eq!(names, ["A", "B"]);
    }

    #[test]
    fn row_by_reports_missing_key() {
        let store = store();
        assert!(store.row_by("T", "Name", "B").is_ok());
        let err = store.row_by("T", "Name", "Z").unwrap_err();
        assert!(matches!(err, TableError::RowNotFound { .. }));
    }

    #[test]
    fn typed_accessors_reject_wrong_types() {
        let store = store();
        let row = store.row_by("T", "Name", "A").unwrap();
        assert!(row.text("t3").is_err());
        assert!(row.number("Name").is_err());
        assert!(row.number("Absent").is_err());
        assert!(!row.flag("Opening"));
        assert!(store.row_by("T", "Name", "B").unwrap().flag("Opening"));
    }
}
