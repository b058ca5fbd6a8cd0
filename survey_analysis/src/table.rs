// ********* Tables and series ***********

use std::collections::BTreeMap;

use crate::vocabulary::Column;

/// The content of one answer. `None` means that the respondent did not answer,
/// which is different from an empty answer.
pub type Cell = Option<String>;

/// A table as exported by the survey tool, one row per respondent.
///
/// Columns are keyed by the verbatim question text. Use the [crate::builder::Builder]
/// to create one.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RawResponseTable {
    pub(crate) name: String,
    pub(crate) headers: Vec<String>,
    pub(crate) rows: Vec<Vec<Cell>>,
}

impl RawResponseTable {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// The cells of the first column with exactly this header.
    pub fn column(&self, header: &str) -> Option<Vec<&Cell>> {
        let idx = self.headers.iter().position(|h| h == header)?;
        Some(self.rows.iter().map(|row| &row[idx]).collect())
    }
}

/// A table with language-independent columns.
///
/// Every categorical cell is either missing or a member of its closed vocabulary.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct CanonicalResponseTable {
    name: String,
    num_rows: usize,
    columns: BTreeMap<Column, Vec<Cell>>,
}

impl CanonicalResponseTable {
    pub(crate) fn new(name: &str, num_rows: usize) -> CanonicalResponseTable {
        CanonicalResponseTable {
            name: name.to_string(),
            num_rows,
            columns: BTreeMap::new(),
        }
    }

    pub(crate) fn insert_column(&mut self, column: Column, cells: Vec<Cell>) {
        assert_eq!(cells.len(), self.num_rows, "column {} has the wrong length", column);
        self.columns.insert(column, cells);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn has_column(&self, column: Column) -> bool {
        self.columns.contains_key(&column)
    }

    pub fn column(&self, column: Column) -> Option<&[Cell]> {
        self.columns.get(&column).map(|v| v.as_slice())
    }
}

/// One column concatenated across several tables, in the order of the tables.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct MergedSeries {
    pub(crate) column: Column,
    pub(crate) values: Vec<Cell>,
    /// (table name, number of rows contributed)
    pub(crate) sources: Vec<(String, usize)>,
}

impl MergedSeries {
    /// A series that does not come from any table.
    pub fn from_values(column: Column, values: Vec<Cell>) -> MergedSeries {
        let n = values.len();
        MergedSeries {
            column,
            values,
            sources: vec![("".to_string(), n)],
        }
    }

    pub fn column(&self) -> Column {
        self.column
    }

    pub fn values(&self) -> &[Cell] {
        &self.values
    }

    pub fn sources(&self) -> &[(String, usize)] {
        &self.sources
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The number of answered cells.
    pub fn num_present(&self) -> usize {
        self.values.iter().filter(|c| c.is_some()).count()
    }
}
