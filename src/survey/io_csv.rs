// Primitives for reading CSV files.

use course_survey::builder::{cell_from_text, Builder};

use crate::survey::*;

/// Reads a survey export in CSV format.
///
/// The first line holds the questions. The lines may have different lengths.
pub fn read_csv_table(path: &str) -> SurveyResult<SurveyTable> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;
    let mut records = rdr.into_records();

    let header = records
        .next()
        .context(EmptyCsvSnafu { path })?
        .context(CsvLineParseSnafu { lineno: 1usize })?;
    let headers: Vec<String> = header
        .iter()
        .enumerate()
        .map(|(idx, s)| match idx {
            0 => s.trim_start_matches('\u{feff}').to_string(),
            _ => s.to_string(),
        })
        .collect();
    debug!("read_csv_table: headers: {:?}", headers);

    let mut builder = Builder::new(&headers);
    for (idx, line_r) in records.enumerate() {
        // The header is line 1.
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu { lineno })?;
        if line.iter().all(|s| s.trim().is_empty()) {
            debug!("read_csv_table: skipping blank line {}", lineno);
            continue;
        }
        let row = line.iter().map(cell_from_text).collect();
        builder.add_row(row);
    }
    debug!("read_csv_table: {} rows", builder.num_rows());
    Ok(builder.build())
}
