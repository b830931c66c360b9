use log::{debug, info, warn};

use course_survey::*;
use snafu::{prelude::*, Snafu};

use std::collections::BTreeMap;
use std::fs;

use serde::Serialize;
use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

pub mod config_reader;
pub mod export;
pub mod io_common;
pub mod io_csv;
pub mod io_xlsx;

use crate::survey::config_reader::*;
use crate::survey::export::*;
use crate::survey::io_common::InputType;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum SurveyError {
    #[snafu(display(
        "No configuration found: default values were written to {path}. Edit this file and run the program again."
    ))]
    ConfigurationMissing { path: String },
    #[snafu(display("Error reading configuration {path}"))]
    OpeningConfig {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing configuration {path}"))]
    ParsingConfig {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error serializing configuration {path}"))]
    SerializingConfig {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error writing configuration {path}"))]
    WritingConfig {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Invalid value for {key:?} in the configuration: {value}"))]
    InvalidConfigValue { key: String, value: String },
    #[snafu(display("Unknown column layout {layout:?}, expected 'aligned' or 'compact'"))]
    UnknownColumnLayout { layout: String },
    #[snafu(display("Unknown input type {input_type:?}, expected 'csv' or 'xlsx'"))]
    UnknownInputType { input_type: String },

    #[snafu(display("Error opening file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading line {lineno} of the CSV file"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("The CSV file {path} is empty"))]
    EmptyCsv { path: String },
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("The Excel file {path} has no data"))]
    EmptyExcel { path: String },
    #[snafu(display("The Excel file {path} has no worksheet named {name:?}"))]
    MissingWorksheet { path: String, name: String },
    #[snafu(display(
        "The Excel file {path} has several worksheets ({names:?}), the worksheet name must be provided"
    ))]
    AmbiguousWorksheet { path: String, names: Vec<String> },

    #[snafu(display("Invalid course column"))]
    CourseHeader { source: ParseError },
    #[snafu(display("Invalid survey response"))]
    StudentRow { source: AggregationError },

    #[snafu(display("Error writing workbook {path}"))]
    WritingWorkbook {
        source: rust_xlsxwriter::XlsxError,
        path: String,
    },
    #[snafu(display("Error reading file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error serializing JSON summary"))]
    SerializingSummary { source: serde_json::Error },
    #[snafu(display("Error writing summary {path}"))]
    WritingSummary {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Difference detected between calculated summary and reference summary {path}"))]
    SummaryMismatch { path: String },
}

pub type SurveyResult<T> = Result<T, SurveyError>;

/// What the command line asks for, on top of the configuration file.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct RunSettings {
    pub config_path: String,
    pub input: Option<String>,
    pub input_type: Option<String>,
    pub output: Option<String>,
    pub excel_worksheet_name: Option<String>,
    pub summary: Option<String>,
    pub reference: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize)]
struct StudentSummary {
    #[serde(rename = "firstName")]
    first_name: String,
    #[serde(rename = "lastName")]
    last_name: String,
    email: String,
    advisor: String,
    #[serde(rename = "topChoices")]
    top_choices: BTreeMap<String, String>,
    preferences: BTreeMap<String, String>,
}

fn student_summary(student: &Student) -> StudentSummary {
    let top_choices: BTreeMap<String, String> = student
        .rankings
        .keys()
        .filter_map(|t| {
            student
                .top_choices(t)
                .and_then(|cs| cs.first())
                .map(|c| (t.clone(), top_choice_code(c)))
        })
        .collect();
    StudentSummary {
        first_name: student.first_name.clone(),
        last_name: student.last_name.clone(),
        email: student.email.clone(),
        advisor: student.advisor.clone(),
        top_choices,
        preferences: pretty_preferences(student),
    }
}

fn build_summary_js(config: &ExportConfig, catalog: &CourseCatalog, students: &[Student]) -> JSValue {
    let summaries: Vec<StudentSummary> = students.iter().map(student_summary).collect();
    json!({
        "config": {
            "schoolId": config.school_id(),
            "schoolYear": config.school_year(),
            "termId": config.term_id(),
        },
        "courseTypes": catalog.distinct_types(),
        "students": summaries,
    })
}

pub fn read_summary(path: &str) -> SurveyResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    debug!("read_summary: {:?}", js);
    Ok(js)
}

fn write_summary(location: &str, pretty_js: &str) -> SurveyResult<()> {
    if location == "stdout" {
        println!("{}", pretty_js);
    } else {
        info!("Writing summary to {:?}", location);
        fs::write(location, pretty_js).context(WritingSummarySnafu { path: location })?;
    }
    Ok(())
}

fn read_table(path: &str, input_type: InputType, worksheet: Option<&str>) -> SurveyResult<SurveyTable> {
    info!("Attempting to read survey file {:?} as {:?}", path, input_type);
    match input_type {
        InputType::Csv => io_csv::read_csv_table(path),
        InputType::Xlsx => io_xlsx::read_xlsx_table(path, worksheet),
    }
}

pub fn run_export(settings: &RunSettings) -> SurveyResult<()> {
    let config = read_config(&settings.config_path)?;
    info!("config: {:?}", config);

    let layout = config.column_layout()?;
    let input_path = settings
        .input
        .clone()
        .unwrap_or_else(|| config.input_file.clone());
    let output_path = settings
        .output
        .clone()
        .unwrap_or_else(|| config.output_file.clone());
    let input_type = io_common::input_type(&input_path, settings.input_type.as_deref())?;

    let table = read_table(
        &input_path,
        input_type,
        settings.excel_worksheet_name.as_deref(),
    )?;
    info!(
        "Read {} responses and {} columns from {}",
        table.num_rows(),
        table.headers().len(),
        io_common::simplify_file_name(&input_path)
    );

    let catalog = CourseCatalog::build(table.headers()).context(CourseHeaderSnafu {})?;
    if catalog.is_empty() {
        warn!("No course column found in {:?}", input_path);
    }
    let students = build_students(&table, &catalog).context(StudentRowSnafu {})?;

    let rows = build_rows(&config, &catalog, &students, layout);
    write_workbook(&output_path, &rows)?;

    if settings.summary.is_none() && settings.reference.is_none() {
        return Ok(());
    }

    let summary_js = build_summary_js(&config, &catalog, &students);
    let pretty_js =
        serde_json::to_string_pretty(&summary_js).context(SerializingSummarySnafu {})?;
    if let Some(location) = settings.summary.as_deref() {
        write_summary(location, &pretty_js)?;
    }

    // The reference summary, if provided for comparison
    if let Some(reference_path) = settings.reference.as_deref() {
        let reference = read_summary(reference_path)?;
        let pretty_reference =
            serde_json::to_string_pretty(&reference).context(SerializingSummarySnafu {})?;
        if pretty_reference != pretty_js {
            warn!("Found differences with the reference summary");
            print_diff(pretty_reference.as_str(), pretty_js.as_str(), "\n");
            return SummaryMismatchSnafu {
                path: reference_path,
            }
            .fail();
        }
        info!("The summary matches the reference {:?}", reference_path);
    }

    Ok(())
}
