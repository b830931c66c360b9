// Writing of the programming spreadsheet.

use rust_xlsxwriter::{Note, Workbook, XlsxError};

use crate::survey::config_reader::ExportConfig;
use crate::survey::*;

pub const WORKSHEET_NAME: &str = "PageStyle_Sheet1";

pub const FIXED_COLUMNS: [&str; 8] = [
    "SchoolDbn",
    "SchoolYear",
    "TermId",
    "StudentId",
    "LastName",
    "FirstName",
    "OffClass",
    "Gender",
];

/// The number of `CourseN` columns expected by the student information system.
pub const COURSE_COLUMNS: usize = 15;

// Default size of an Excel note, in pixels.
const NOTE_WIDTH: f64 = 128.0;
const NOTE_HEIGHT: f64 = 74.0;

/// The size of the choice notes in pixels, enlarged from the Excel default so
/// that a few ranks fit without scrolling.
pub fn note_size() -> (u32, u32) {
    ((NOTE_WIDTH * 1.4) as u32, (NOTE_HEIGHT * 4.0) as u32)
}

/// How the course types are placed in the `CourseN` columns.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum ColumnLayout {
    /// Every course type has its own column, in sorted order. Students without a
    /// first choice for a type leave a blank cell.
    Aligned,
    /// Types without a first choice are skipped and the next types move left.
    /// The same column may hold different types for different students.
    Compact,
}

/// A course column of a student.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct CourseCell {
    pub course_type: String,
    pub top_choice: String,
    /// All the choices of the student for this type.
    pub note: String,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ExportRow {
    pub fixed: [String; 8],
    pub courses: Vec<Option<CourseCell>>,
}

/// The code written for the first choice of a student.
///
/// Courses without an external code are written as `tutorial` or `other`.
pub fn top_choice_code(course: &Course) -> String {
    match &course.external_code {
        Some(code) => code.clone(),
        None if course.name.to_lowercase().contains("tutorial") => "tutorial".to_string(),
        None => "other".to_string(),
    }
}

pub fn header_row(num_course_columns: usize) -> Vec<String> {
    let mut res: Vec<String> = FIXED_COLUMNS.iter().map(|s| s.to_string()).collect();
    for idx in 0..num_course_columns.max(COURSE_COLUMNS) {
        res.push(format!("Course{}", idx + 1));
    }
    res
}

pub fn build_rows(
    config: &ExportConfig,
    catalog: &CourseCatalog,
    students: &[Student],
    layout: ColumnLayout,
) -> Vec<ExportRow> {
    let types: Vec<&String> = catalog.distinct_types().iter().collect();
    if types.len() > COURSE_COLUMNS {
        warn!(
            "build_rows: {} course types for {} course columns, adding columns",
            types.len(),
            COURSE_COLUMNS
        );
    }
    let mut res: Vec<ExportRow> = Vec::with_capacity(students.len());
    for (idx, student) in students.iter().enumerate() {
        let notes = pretty_preferences(student);
        let cell = |course_type: &String| -> Option<CourseCell> {
            let top = student.top_choices(course_type)?.first()?;
            Some(CourseCell {
                course_type: course_type.clone(),
                top_choice: top_choice_code(top),
                note: notes.get(course_type).cloned().unwrap_or_default(),
            })
        };

        let courses: Vec<Option<CourseCell>> = match layout {
            ColumnLayout::Aligned => types.iter().map(|t| cell(*t)).collect(),
            ColumnLayout::Compact => {
                let cells: Vec<Option<CourseCell>> = notes
                    .keys()
                    .filter_map(|t| cell(t))
                    .map(Some)
                    .collect();
                if cells.len() < notes.len() {
                    warn!(
                        "build_rows: student {} ({} {}): {} course types without a first choice, shifting the next columns",
                        idx,
                        student.first_name,
                        student.last_name,
                        notes.len() - cells.len()
                    );
                }
                cells
            }
        };

        let row = ExportRow {
            fixed: [
                config.school_id(),
                config.school_year(),
                config.term_id(),
                "<StudentID>".to_string(),
                student.last_name.to_uppercase(),
                student.first_name.to_uppercase(),
                "<OffClass>".to_string(),
                "<Gender>".to_string(),
            ],
            courses,
        };
        debug!("build_rows: {:?}", row);
        res.push(row);
    }
    res
}

pub fn write_workbook(path: &str, rows: &[ExportRow]) -> SurveyResult<()> {
    let num_course_columns = rows.iter().map(|r| r.courses.len()).max().unwrap_or(0);
    let mut workbook = Workbook::new();
    fill_workbook(&mut workbook, rows, num_course_columns)
        .context(WritingWorkbookSnafu { path })?;
    workbook.save(path).context(WritingWorkbookSnafu { path })?;
    info!("write_workbook: {} students written to {:?}", rows.len(), path);
    Ok(())
}

fn fill_workbook(
    workbook: &mut Workbook,
    rows: &[ExportRow],
    num_course_columns: usize,
) -> Result<(), XlsxError> {
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(WORKSHEET_NAME)?;

    for (col, name) in header_row(num_course_columns).iter().enumerate() {
        worksheet.write_string(0, col as u16, name)?;
    }

    for (idx, row) in rows.iter().enumerate() {
        let row_num = (idx + 1) as u32;
        for (col, value) in row.fixed.iter().enumerate() {
            worksheet.write_string(row_num, col as u16, value)?;
        }
        for (offset, cell) in row.courses.iter().enumerate() {
            // Blank cell: no first choice for this type.
            if let Some(cell) = cell {
                let col = (FIXED_COLUMNS.len() + offset) as u16;
                worksheet.write_string(row_num, col, &cell.top_choice)?;
                let (width, height) = note_size();
                let note = Note::new(&cell.note).set_width(width).set_height(height);
                worksheet.insert_note(row_num, col, &note)?;
            }
        }
    }
    Ok(())
}
