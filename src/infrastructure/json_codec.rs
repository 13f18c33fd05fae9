// JSON import/export of the whole panel collection
use crate::domain::panel::Panel;
use chrono::NaiveDate;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("import file is not UTF-8 text")]
    NotUtf8,
    #[error("import file is not valid JSON: {0}")]
    MalformedSyntax(#[source] serde_json::Error),
    #[error("import file must contain a JSON array of panels, found {0}")]
    WrongShape(&'static str),
    #[error("panel #{index} is invalid: {reason}")]
    InvalidPanel { index: usize, reason: String },
}

/// Pretty-printed JSON array, two-space indent.
pub fn export(panels: &[Panel]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(panels)
}

pub fn export_file_name(prefix: &str, date: NaiveDate) -> String {
    format!("{}-{}.json", prefix, date.format("%Y-%m-%d"))
}

pub fn decode_utf8(bytes: &[u8]) -> Result<&str, ImportError> {
    std::str::from_utf8(bytes).map_err(|_| ImportError::NotUtf8)
}

pub fn import(text: &str) -> Result<Vec<Panel>, ImportError> {
    let value: Value = serde_json::from_str(text).map_err(ImportError::MalformedSyntax)?;

    let Value::Array(items) = value else {
        return Err(ImportError::WrongShape(json_kind(&value)));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item).map_err(|e| ImportError::InvalidPanel {
                index,
                reason: e.to_string(),
            })
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
