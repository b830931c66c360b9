pub use crate::config::*;

/// A builder for assembling a survey table one response at a time.
///
/// Readers of the various export formats go through it, and it is the
/// simplest way to set up a table by hand.
///
/// ```
/// use course_survey::builder::Builder;
///
/// let mut builder = Builder::new(&[
///     "First Name".to_string(),
///     "ART 101 [ART 101 Painting (3 credits) Jones]".to_string(),
/// ]);
///
/// builder.add_row_simple(&["Ada".to_string(), "1".to_string()]);
/// let table = builder.build();
///
/// assert_eq!(table.num_rows(), 1);
/// ```
pub struct Builder {
    pub(crate) _headers: Vec<String>,
    pub(crate) _rows: Vec<Vec<CellValue>>,
}

impl Builder {
    pub fn new(headers: &[String]) -> Builder {
        Builder {
            _headers: headers.to_vec(),
            _rows: Vec::new(),
        }
    }

    /// Adds a response given as raw text cells.
    ///
    /// Blank cells are read as empty, everything else is kept as text.
    pub fn add_row_simple(&mut self, cells: &[String]) {
        let row: Vec<CellValue> = cells.iter().map(|s| cell_from_text(s)).collect();
        self.add_row(row)
    }

    /// Adds a response with already typed cells.
    ///
    /// Rows shorter than the header are padded with empty cells when read,
    /// extra cells are ignored.
    pub fn add_row(&mut self, cells: Vec<CellValue>) {
        self._rows.push(cells);
    }

    pub fn num_rows(&self) -> usize {
        self._rows.len()
    }

    pub fn build(self) -> SurveyTable {
        SurveyTable::new(self._headers, self._rows)
    }
}

/// Interprets the text of a cell, as found in CSV exports.
///
/// The text is kept as written: names such as `Nan` or `007` must come back
/// unchanged. Rankings are read from it by `CellValue::as_rank`.
pub fn cell_from_text(s: &str) -> CellValue {
    if s.trim().is_empty() {
        CellValue::Empty
    } else {
        CellValue::Text(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_from_text() {
        assert_eq!(cell_from_text(""), CellValue::Empty);
        assert_eq!(cell_from_text("  "), CellValue::Empty);
        assert_eq!(cell_from_text("2"), CellValue::Text("2".to_string()));
        assert_eq!(cell_from_text("Ada"), CellValue::Text("Ada".to_string()));
    }

    #[test]
    fn numeric_looking_names_are_kept() {
        let mut builder = Builder::new(&["a".to_string(), "b".to_string(), "c".to_string(), "d".to_string()]);
        builder.add_row_simple(&["Nan", "Inf", "007", "1e3"].map(|s| s.to_string()));
        let table = builder.build();
        let texts: Vec<String> = ["a", "b", "c", "d"]
            .iter()
            .map(|h| table.cell(0, h).unwrap().as_text())
            .collect();
        assert_eq!(texts, vec!["Nan", "Inf", "007", "1e3"]);
        assert_eq!(table.cell(0, "a").unwrap().as_rank(), 0);
        assert_eq!(table.cell(0, "b").unwrap().as_rank(), 0);
        assert_eq!(table.cell(0, "c").unwrap().as_rank(), 7);
    }

    #[test]
    fn short_rows_read_as_empty() {
        let mut builder = Builder::new(&["a".to_string(), "b".to_string()]);
        builder.add_row_simple(&["x".to_string()]);
        let table = builder.build();
        assert_eq!(table.cell(0, "b"), Some(&CellValue::Empty));
        assert_eq!(table.cell(0, "c"), None);
        assert_eq!(table.cell(1, "a"), None);
    }

    #[test]
    fn repeated_header_resolves_to_first_column() {
        let mut builder = Builder::new(&["a".to_string(), "a".to_string()]);
        builder.add_row_simple(&["1".to_string(), "2".to_string()]);
        let table = builder.build();
        assert_eq!(table.cell(0, "a"), Some(&CellValue::Text("1".to_string())));
    }

    #[test]
    fn ranks_from_cells() {
        assert_eq!(CellValue::Empty.as_rank(), 0);
        assert_eq!(CellValue::Number(f64::NAN).as_rank(), 0);
        assert_eq!(CellValue::Number(-1.0).as_rank(), 0);
        assert_eq!(CellValue::Number(2.7).as_rank(), 2);
        assert_eq!(CellValue::Text("maybe".to_string()).as_rank(), 0);
        assert_eq!(CellValue::Text(" 3 ".to_string()).as_rank(), 3);
        assert_eq!(CellValue::Text("3.0".to_string()).as_rank(), 3);
        assert_eq!(CellValue::Text("inf".to_string()).as_rank(), 0);
    }

    #[test]
    fn text_from_cells() {
        assert_eq!(CellValue::Empty.as_text(), "");
        assert_eq!(CellValue::Number(12.0).as_text(), "12");
        assert_eq!(CellValue::Number(1.5).as_text(), "1.5");
    }
}
