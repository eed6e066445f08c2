use std::fmt;

use serde::Serialize;
use serde_json::{Map, Number, Value};

/// Message shown for every transport or server failure.
pub const GENERIC_FAILURE: &str = "Server Error or Invalid Input";

pub const NO_DATA_NOTICE: &str = "No data received from server. Try again or check inputs.";

/// Fields the scoring service may send back. All are optional.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MatchReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compatibility_percent: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Latest submission outcome held by the session.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MatchResult {
    Report(MatchReport),
    Failure { error: String },
}

impl MatchResult {
    pub fn generic_failure() -> Self {
        MatchResult::Failure {
            error: GENERIC_FAILURE.to_string(),
        }
    }

    /// Interprets an opaque response body. Only a non-empty `error` string is a failure.
    pub fn from_response(body: Value) -> Self {
        let Value::Object(fields) = body else {
            return MatchResult::Report(MatchReport::default());
        };

        if let Some(error) = error_message(&fields) {
            return MatchResult::Failure { error };
        }

        MatchResult::Report(MatchReport {
            name1: text_field(&fields, "name1"),
            name2: text_field(&fields, "name2"),
            compatibility_percent: fields
                .get("compatibility_percent")
                .filter(|value| !value.is_null())
                .cloned(),
            description: text_field(&fields, "description"),
        })
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, MatchResult::Failure { .. })
    }
}

fn error_message(fields: &Map<String, Value>) -> Option<String> {
    match fields.get("error")? {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        _ => None,
    }
}

fn text_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    match fields.get(key)? {
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// What the result area shows for a given result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultView {
    Success {
        heading: Option<String>,
        score: Option<String>,
        description: Option<String>,
        no_data: bool,
    },
    Error(String),
}

impl ResultView {
    pub fn render(result: Option<&MatchResult>) -> Option<Self> {
        let view = match result? {
            MatchResult::Failure { error } => ResultView::Error(error.clone()),
            MatchResult::Report(report) => {
                let heading = match (&report.name1, &report.name2) {
                    (Some(first), Some(second)) => Some(format!("❤️ {first} & {second}")),
                    _ => None,
                };
                let score = report
                    .compatibility_percent
                    .as_ref()
                    .map(|percent| format!("Score: {}%", percent_text(percent)));
                let description = report.description.clone();
                let no_data = heading.is_none() && score.is_none() && description.is_none();

                ResultView::Success {
                    heading,
                    score,
                    description,
                    no_data,
                }
            }
        };
        Some(view)
    }

    pub fn lines(&self) -> Vec<String> {
        match self {
            ResultView::Error(message) => vec![format!("❌ {message}")],
            ResultView::Success {
                heading,
                score,
                description,
                no_data,
            } => {
                let mut lines: Vec<String> = [heading, score, description]
                    .into_iter()
                    .flatten()
                    .cloned()
                    .collect();
                if *no_data {
                    lines.push(format!("⚠ {NO_DATA_NOTICE}"));
                }
                lines
            }
        }
    }
}

impl fmt::Display for ResultView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines().join("\n"))
    }
}

fn percent_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => number_text(number),
        other => other.to_string(),
    }
}

fn number_text(number: &Number) -> String {
    match number.as_f64() {
        Some(float) if number.is_f64() && float.fract() == 0.0 => format!("{float:.0}"),
        _ => number.to_string(),
    }
}
