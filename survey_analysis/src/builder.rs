pub use crate::table::*;
use crate::{AnalysisResult, RowWidthSnafu};
use snafu::ensure;

/// A builder for raw response tables.
///
/// The file loaders use it, and it is the simplest way to build tables by hand.
///
/// ```
/// pub use survey_analysis::builder::Builder;
/// # use survey_analysis::AnalysisError;
///
/// let mut builder = Builder::new(
///     "English",
///     &["What is your role in your current software development project(s)?".to_string()],
/// );
///
/// builder.add_row_simple(&["Developer;Tester"])?;
/// // An empty string is a missing answer.
/// builder.add_row_simple(&[""])?;
///
/// let table = builder.build();
/// assert_eq!(table.num_rows(), 2);
///
/// # Ok::<(), AnalysisError>(())
/// ```
pub struct Builder {
    pub(crate) _name: String,
    pub(crate) _headers: Vec<String>,
    pub(crate) _rows: Vec<Vec<Cell>>,
}

impl Builder {
    pub fn new(name: &str, headers: &[String]) -> Builder {
        Builder {
            _name: name.to_string(),
            _headers: headers.to_vec(),
            _rows: Vec::new(),
        }
    }

    /// Adds a row in which empty strings are missing answers.
    pub fn add_row_simple(&mut self, cells: &[&str]) -> AnalysisResult<()> {
        let row: Vec<Cell> = cells
            .iter()
            .map(|s| {
                if s.is_empty() {
                    None
                } else {
                    Some(s.to_string())
                }
            })
            .collect();
        self.add_row(row)
    }

    /// Adds a row. It must have exactly one cell per header.
    pub fn add_row(&mut self, cells: Vec<Cell>) -> AnalysisResult<()> {
        ensure!(
            cells.len() == self._headers.len(),
            RowWidthSnafu {
                table: self._name.clone(),
                row: self._rows.len(),
                expected: self._headers.len(),
                found: cells.len(),
            }
        );
        self._rows.push(cells);
        Ok(())
    }

    pub fn num_rows(&self) -> usize {
        self._rows.len()
    }

    pub fn build(self) -> RawResponseTable {
        RawResponseTable {
            name: self._name,
            headers: self._headers,
            rows: self._rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AnalysisError;

    #[test]
    fn rows_must_match_headers() {
        let mut builder = Builder::new("t", &["a".to_string(), "b".to_string()]);
        builder.add_row_simple(&["1", ""]).unwrap();
        let err = builder.add_row_simple(&["1"]).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::RowWidth {
                table: "t".to_string(),
                row: 1,
                expected: 2,
                found: 1
            }
        );
        let table = builder.build();
        assert_eq!(table.num_rows(), 1);
        assert_eq!(table.column("b"), Some(vec![&None]));
        assert_eq!(table.column("c"), None);
    }

    #[test]
    fn headers_are_verbatim() {
        let mut builder = Builder::new("t", &[" roles".to_string()]);
        builder.add_row_simple(&["DBA"]).unwrap();
        let table = builder.build();
        assert!(table.column("roles").is_none());
        assert_eq!(
            table.column(" roles"),
            Some(vec![&Some("DBA".to_string())])
        );
    }
}
