use crate::survey::*;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::survey::export::ColumnLayout;

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    // The identifiers may be written as strings or as numbers.
    #[serde(rename = "School ID")]
    _school_id: JSValue,
    #[serde(rename = "School Year")]
    _school_year: JSValue,
    #[serde(rename = "Term ID")]
    _term_id: JSValue,
    #[serde(rename = "Input File")]
    pub input_file: String,
    #[serde(rename = "Output File")]
    pub output_file: String,
    #[serde(
        rename = "Column Layout",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub column_layout: Option<String>,
}

impl Default for ExportConfig {
    fn default() -> ExportConfig {
        ExportConfig {
            _school_id: json!("<SchoolDbn>"),
            _school_year: json!("<SchoolYear>"),
            _term_id: json!("<TermId>"),
            input_file: "input.csv".to_string(),
            output_file: "output.xlsx".to_string(),
            column_layout: Some("aligned".to_string()),
        }
    }
}

impl ExportConfig {
    pub fn new(school_id: &str, school_year: &str, term_id: &str) -> ExportConfig {
        ExportConfig {
            _school_id: json!(school_id),
            _school_year: json!(school_year),
            _term_id: json!(term_id),
            ..ExportConfig::default()
        }
    }

    pub fn school_id(&self) -> String {
        read_js_string(&self._school_id)
    }

    pub fn school_year(&self) -> String {
        read_js_string(&self._school_year)
    }

    pub fn term_id(&self) -> String {
        read_js_string(&self._term_id)
    }

    pub fn column_layout(&self) -> SurveyResult<ColumnLayout> {
        match self.column_layout.as_deref() {
            None | Some("aligned") => Ok(ColumnLayout::Aligned),
            Some("compact") => Ok(ColumnLayout::Compact),
            Some(x) => UnknownColumnLayoutSnafu { layout: x }.fail(),
        }
    }

    fn validate(&self) -> SurveyResult<()> {
        let fields = [
            ("School ID", &self._school_id),
            ("School Year", &self._school_year),
            ("Term ID", &self._term_id),
        ];
        for (key, value) in fields {
            ensure!(
                matches!(value, JSValue::String(_) | JSValue::Number(_)),
                InvalidConfigValueSnafu {
                    key,
                    value: value.to_string()
                }
            );
        }
        self.column_layout().map(|_| ())
    }
}

/// Reads the configuration.
///
/// On the first run, the configuration file does not exist yet: it is created
/// with placeholder values and `ConfigurationMissing` is returned so that the
/// user can fill it in.
pub fn read_config(path: &str) -> SurveyResult<ExportConfig> {
    if !Path::new(path).exists() {
        warn!("Configuration file {:?} not found, writing the defaults", path);
        write_config(path, &ExportConfig::default())?;
        return ConfigurationMissingSnafu { path }.fail();
    }
    let contents = fs::read_to_string(path).context(OpeningConfigSnafu { path })?;
    let config: ExportConfig =
        serde_json::from_str(contents.as_str()).context(ParsingConfigSnafu { path })?;
    config.validate()?;
    Ok(config)
}

pub fn write_config(path: &str, config: &ExportConfig) -> SurveyResult<()> {
    let contents =
        serde_json::to_string_pretty(config).context(SerializingConfigSnafu { path })?;
    fs::write(path, contents).context(WritingConfigSnafu { path })
}

fn read_js_string(x: &JSValue) -> String {
    match x {
        JSValue::String(s) => s.clone(),
        JSValue::Null => "".to_string(),
        other => other.to_string(),
    }
}
