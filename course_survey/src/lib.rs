pub mod builder;
mod config;
pub mod manual;
pub mod parser;
pub mod quick_start;

use log::{debug, info, warn};

use std::collections::{BTreeMap, BTreeSet, HashMap};

pub use crate::config::*;
use crate::parser::{is_course_header, parse_course};

/// The columns every survey export must provide, besides the courses.
pub const FIRST_NAME_FIELD: &str = "First Name";
pub const LAST_NAME_FIELD: &str = "Last Name";
pub const EMAIL_FIELD: &str = "Email Address";
pub const ADVISOR_FIELD: &str = "Advisor (last name of academic advisor)";

/// The courses offered in a survey, in the order of the survey columns.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct CourseCatalog {
    courses: Vec<Course>,
    by_header: HashMap<String, usize>,
    types: BTreeSet<String>,
}

impl CourseCatalog {
    /// Builds the catalog from the column headers of a survey.
    ///
    /// Columns that are not courses (free-response questions, names, ...) are
    /// skipped. The first header that cannot be parsed aborts the construction.
    pub fn build<S: AsRef<str>>(headers: &[S]) -> Result<CourseCatalog, ParseError> {
        let mut catalog = CourseCatalog::default();
        for header in headers.iter().map(|h| h.as_ref()) {
            if !is_course_header(header) {
                debug!("CourseCatalog::build: skipping non-course column {:?}", header);
                continue;
            }
            if catalog.by_header.contains_key(header) {
                warn!("CourseCatalog::build: skipping repeated column {:?}", header);
                continue;
            }
            let course = parse_course(header)?;
            debug!("CourseCatalog::build: course: {}", course);
            catalog.push(course);
        }
        info!(
            "CourseCatalog::build: {} courses, types: {:?}",
            catalog.len(),
            catalog.types
        );
        Ok(catalog)
    }

    fn push(&mut self, course: Course) {
        self.by_header
            .insert(course.source_header.clone(), self.courses.len());
        self.types.insert(course.course_type.clone());
        self.courses.push(course);
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// All the course types, sorted.
    pub fn distinct_types(&self) -> &BTreeSet<String> {
        &self.types
    }

    pub fn contains_type(&self, course_type: &str) -> bool {
        self.types.contains(course_type)
    }

    pub fn by_header(&self, header: &str) -> Option<&Course> {
        self.by_header.get(header).map(|idx| &self.courses[*idx])
    }

    pub fn by_type(&self, course_type: &str) -> Vec<&Course> {
        self.courses
            .iter()
            .filter(|c| c.course_type == course_type)
            .collect()
    }
}

/// Reads every response of the survey into a student.
///
/// Arguments:
/// * `table` the survey responses
/// * `catalog` the courses, as built from the headers of the same table
pub fn build_students(
    table: &SurveyTable,
    catalog: &CourseCatalog,
) -> Result<Vec<Student>, AggregationError> {
    info!(
        "build_students: processing {} responses over {} courses",
        table.num_rows(),
        catalog.len()
    );
    let mut students: Vec<Student> = Vec::with_capacity(table.num_rows());
    for row in 0..table.num_rows() {
        let student = build_student(table, catalog, row)?;
        debug!(
            "build_students: row {}: {} {}: {:?}",
            row,
            student.first_name,
            student.last_name,
            student
                .rankings
                .iter()
                .map(|(t, ranks)| (t.clone(), ranks.keys().copied().collect::<Vec<u32>>()))
                .collect::<Vec<_>>()
        );
        students.push(student);
    }
    Ok(students)
}

fn build_student(
    table: &SurveyTable,
    catalog: &CourseCatalog,
    row: usize,
) -> Result<Student, AggregationError> {
    let field = |name: &str| -> Result<String, AggregationError> {
        table
            .cell(row, name)
            .map(|c| c.as_text())
            .ok_or_else(|| AggregationError::MissingField {
                row,
                field: name.to_string(),
            })
    };

    let first_name = field(FIRST_NAME_FIELD)?;
    let last_name = field(LAST_NAME_FIELD)?;
    let email = field(EMAIL_FIELD)?;
    let advisor = field(ADVISOR_FIELD)?;

    let mut rankings: Rankings = BTreeMap::new();
    for course in catalog.courses() {
        let rank = table
            .cell(row, &course.source_header)
            .map(|c| c.as_rank())
            .unwrap_or(0);
        if !catalog.contains_type(&course.course_type) {
            continue;
        }
        rankings
            .entry(course.course_type.clone())
            .or_default()
            .entry(rank)
            .or_default()
            .push(course.clone());
    }

    Ok(Student {
        first_name,
        last_name,
        email,
        advisor,
        rankings,
    })
}

/// The suffix written after a rank: `st`, `nd`, `rd`, and `th` for everything else.
pub fn ordinal_suffix(rank: u32) -> &'static str {
    match rank {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

/// Renders the choices of a student, one block of text per course type.
///
/// The courses without a preference (rank 0) are not shown.
///
/// ```text
/// ART:
///   1st Choices:
///     - "Painting" (ABC12D)
///
///   2nd Choices:
///     - "Sculpture" (None)
///
/// ```
pub fn pretty_preferences(student: &Student) -> BTreeMap<String, String> {
    let mut preferences: BTreeMap<String, String> = BTreeMap::new();
    for (course_type, ranks) in student.rankings.iter() {
        let mut pretty = format!("{}:\n", course_type);
        for (rank, courses) in ranks.iter() {
            if *rank == 0 {
                continue;
            }
            pretty.push_str(&format!("  {}{} Choices:\n", rank, ordinal_suffix(*rank)));
            for course in courses.iter() {
                pretty.push_str(&format!(
                    "    - \"{}\" ({})\n",
                    course.name,
                    course.external_code.as_deref().unwrap_or("None")
                ));
            }
            pretty.push('\n');
        }
        preferences.insert(course_type.clone(), pretty);
    }
    preferences
}
