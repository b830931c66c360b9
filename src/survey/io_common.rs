use std::path::Path;

use crate::survey::*;

/// The supported survey exports.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum InputType {
    Csv,
    Xlsx,
}

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

/// The type of the input, as requested or guessed from the extension of the file.
pub fn input_type(path: &str, requested: Option<&str>) -> SurveyResult<InputType> {
    let extension = Path::new(path)
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase());
    let name = requested
        .map(|s| s.to_lowercase())
        .or(extension)
        .unwrap_or_else(|| "csv".to_string());
    debug!("input_type: {:?} -> {:?}", path, name);
    match name.as_str() {
        "csv" => Ok(InputType::Csv),
        "xlsx" => Ok(InputType::Xlsx),
        x => UnknownInputTypeSnafu { input_type: x }.fail(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_types() {
        assert_eq!(input_type("a/b/survey.csv", None).unwrap(), InputType::Csv);
        assert_eq!(input_type("survey.XLSX", None).unwrap(), InputType::Xlsx);
        assert_eq!(input_type("survey", None).unwrap(), InputType::Csv);
        assert_eq!(
            input_type("survey.txt", Some("xlsx")).unwrap(),
            InputType::Xlsx
        );
        assert!(matches!(
            input_type("survey.ods", None),
            Err(SurveyError::UnknownInputType { .. })
        ));
    }

    #[test]
    fn file_names() {
        assert_eq!(simplify_file_name("/tmp/responses.csv"), "responses.csv");
        assert_eq!(simplify_file_name("responses.csv"), "responses.csv");
    }
}
