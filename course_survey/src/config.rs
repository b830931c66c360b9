// ********* Input data structures ***********

use std::collections::{BTreeMap, HashMap};
use std::error::Error;
use std::fmt::Display;
use std::hash::{Hash, Hasher};

/// The content of one cell of a survey export.
///
/// Text cells keep the text as written. `Number` holds the cells that were
/// typed as numbers in the source workbook.
#[derive(PartialEq, Debug, Clone)]
pub enum CellValue {
    /// A blank cell, or a cell past the end of a short row.
    Empty,
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Reads the cell as a text field.
    ///
    /// Blank cells become the empty string. Whole numbers are rendered without
    /// a fractional part.
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Empty => "".to_string(),
            CellValue::Number(f) if f.fract() == 0.0 && f.is_finite() => format!("{}", *f as i64),
            CellValue::Number(f) => f.to_string(),
            CellValue::Text(s) => s.clone(),
        }
    }

    /// Reads the cell as a ranking.
    ///
    /// Anything that is not a finite, non-negative number is treated as "no
    /// preference" (rank 0). Fractional ranks are truncated.
    pub fn as_rank(&self) -> u32 {
        let value = match self {
            CellValue::Empty => None,
            CellValue::Number(f) => Some(*f),
            CellValue::Text(s) => s.trim().parse::<f64>().ok(),
        };
        match value {
            Some(f) if f.is_finite() && f >= 0.0 => f.trunc() as u32,
            _ => 0,
        }
    }
}

/// A survey export held in memory: the column headers and the responses.
///
/// When a header is repeated, lookups by name resolve to its first column.
#[derive(PartialEq, Debug, Clone)]
pub struct SurveyTable {
    pub(crate) headers: Vec<String>,
    pub(crate) rows: Vec<Vec<CellValue>>,
    pub(crate) column_index: HashMap<String, usize>,
}

impl SurveyTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> SurveyTable {
        let mut column_index: HashMap<String, usize> = HashMap::new();
        for (idx, h) in headers.iter().enumerate() {
            column_index.entry(h.clone()).or_insert(idx);
        }
        SurveyTable {
            headers,
            rows,
            column_index,
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn has_column(&self, header: &str) -> bool {
        self.column_index.contains_key(header)
    }

    /// The cell of the given row under the given header.
    ///
    /// Returns `None` if the header is not part of the table. A row that is
    /// shorter than the header row reads as `Empty`.
    pub fn cell(&self, row: usize, header: &str) -> Option<&CellValue> {
        let col = *self.column_index.get(header)?;
        let r = self.rows.get(row)?;
        Some(r.get(col).unwrap_or(&CellValue::Empty))
    }
}

// ******** Output data structures *********

/// A course offered in the survey, as parsed from the header of its column.
///
/// Two courses are the same course if and only if they come from the same
/// header text.
#[derive(Debug, Clone)]
pub struct Course {
    pub name: String,
    /// The category code, for example `ART` or `MATH`. Preferences are grouped by it.
    pub course_type: String,
    pub teachers: Option<String>,
    /// The internal catalog number (`101`, `250L`, ...).
    pub catalog_code: Option<String>,
    /// The standardized course code (`ABC12D`), when the header carries one.
    pub external_code: Option<String>,
    pub credits: Option<u32>,
    pub source_header: String,
}

impl PartialEq for Course {
    fn eq(&self, other: &Self) -> bool {
        self.source_header == other.source_header
    }
}

impl Eq for Course {}

impl Hash for Course {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.source_header.hash(state);
    }
}

impl Display for Course {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}, {}. [{}:{}]",
            self.name,
            self.teachers.as_deref().unwrap_or("None"),
            self.course_type,
            self.external_code.as_deref().unwrap_or("None")
        )
    }
}

/// The choices of a student: course type -> rank -> courses.
///
/// Rank 0 means that no preference was expressed.
pub type Rankings = BTreeMap<String, BTreeMap<u32, Vec<Course>>>;

/// One survey response.
#[derive(PartialEq, Debug, Clone)]
pub struct Student {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub advisor: String,
    pub rankings: Rankings,
}

impl Student {
    /// The courses ranked first for a type, if any.
    pub fn top_choices(&self, course_type: &str) -> Option<&[Course]> {
        self.rankings
            .get(course_type)
            .and_then(|ranks| ranks.get(&1))
            .map(|v| v.as_slice())
            .filter(|v| !v.is_empty())
    }
}

// ********* Errors **********

/// A course header that does not follow the expected layout.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum ParseError {
    /// No `[...]` segment could be isolated.
    MissingBrackets { header: String },
    /// A tutorial header without the `in <TYPE>` part.
    MissingTutorialType { header: String },
    /// No `(N credit)` or `(N credits)` segment.
    MissingCredits { header: String },
    /// The number of credits does not fit.
    InvalidCredits { header: String, credits: String },
    /// The header does not have enough parts around the credits.
    Malformed { header: String },
}

impl Error for ParseError {}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::MissingBrackets { header } => {
                write!(f, "course header without a [...] segment: {:?}", header)
            }
            ParseError::MissingTutorialType { header } => {
                write!(f, "tutorial header without a course type: {:?}", header)
            }
            ParseError::MissingCredits { header } => {
                write!(f, "course header without credits: {:?}", header)
            }
            ParseError::InvalidCredits { header, credits } => {
                write!(f, "invalid credits {:?} in course header {:?}", credits, header)
            }
            ParseError::Malformed { header } => {
                write!(f, "course header does not follow the expected layout: {:?}", header)
            }
        }
    }
}

/// A survey response that cannot be turned into a student.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum AggregationError {
    MissingField { row: usize, field: String },
}

impl Error for AggregationError {}

impl Display for AggregationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AggregationError::MissingField { row, field } => {
                write!(f, "row {}: missing required field {:?}", row, field)
            }
        }
    }
}
