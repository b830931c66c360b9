use calamine::{open_workbook, DataType, Range, Reader, Xlsx};

use course_survey::builder::{cell_from_text, Builder};

use crate::survey::*;

/// Reads a survey export from an Excel workbook.
///
/// The first row of the worksheet holds the questions.
pub fn read_xlsx_table(path: &str, worksheet_name: Option<&str>) -> SurveyResult<SurveyTable> {
    let wrange = get_range(path, worksheet_name)?;

    let mut iter = wrange.rows();
    let header = iter.next().context(EmptyExcelSnafu { path })?;
    let headers: Vec<String> = header.iter().map(header_text).collect();
    debug!("read_xlsx_table: headers: {:?}", headers);

    let mut builder = Builder::new(&headers);
    for (idx, row) in iter.enumerate() {
        if row.iter().all(|c| matches!(c, DataType::Empty)) {
            continue;
        }
        // The header is row 1.
        let lineno = idx + 2;
        let cells: Vec<CellValue> = row.iter().map(|c| read_cell(c, lineno)).collect();
        builder.add_row(cells);
    }
    debug!("read_xlsx_table: {} rows", builder.num_rows());
    Ok(builder.build())
}

fn header_text(cell: &DataType) -> String {
    match cell {
        DataType::String(s) => s.clone(),
        DataType::Int(i) => i.to_string(),
        DataType::Float(f) => f.to_string(),
        _ => "".to_string(),
    }
}

fn read_cell(cell: &DataType, lineno: usize) -> CellValue {
    match cell {
        DataType::Empty => CellValue::Empty,
        DataType::Int(i) => CellValue::Number(*i as f64),
        DataType::Float(f) => CellValue::Number(*f),
        DataType::DateTime(f) => CellValue::Number(*f),
        DataType::Bool(b) => CellValue::Text(b.to_string()),
        DataType::String(s) => cell_from_text(s),
        _ => {
            warn!(
                "read_xlsx_table: line {}: could not understand cell {:?}, reading it as empty",
                lineno, cell
            );
            CellValue::Empty
        }
    }
}

fn get_range(path: &str, worksheet_name: Option<&str>) -> SurveyResult<Range<DataType>> {
    debug!(
        "read_xlsx_table: path: {:?} worksheet: {:?}",
        path, worksheet_name
    );
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;

    // A worksheet name was provided, use it.
    if let Some(name) = worksheet_name {
        let wrange = workbook
            .worksheet_range(name)
            .context(MissingWorksheetSnafu { path, name })?
            .context(OpeningExcelSnafu { path })?;
        return Ok(wrange);
    }

    let mut all_worksheets = workbook.worksheets();
    match all_worksheets.len() {
        0 => EmptyExcelSnafu { path }.fail(),
        1 => {
            let (name, wrange) = all_worksheets.remove(0);
            debug!("read_xlsx_table: using worksheet {:?}", name);
            Ok(wrange)
        }
        _ => AmbiguousWorksheetSnafu {
            path,
            names: all_worksheets
                .into_iter()
                .map(|(name, _)| name)
                .collect::<Vec<String>>(),
        }
        .fail(),
    }
}
