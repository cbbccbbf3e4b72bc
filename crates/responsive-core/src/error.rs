use thiserror::Error;

/// Errors surfaced as `Result`s. Everything else the engine reports is a
/// [`Diagnostic`].
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Non-fatal problems. They are logged and processing continues with
/// whatever partial input was given.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Diagnostic {
    #[error("invalid input provided to create_styles(), needs to be an object but found {found}")]
    InvalidSheet { found: &'static str },
    #[error(
        "invalid input provided to create_styles(), property `{key}` needs to be an object but found {found}"
    )]
    InvalidSheetEntry { key: String, found: &'static str },
    #[error(
        "`{view}` computes its style from a function but no dependency tracker is installed; \
         styles only follow broadcasts and prop changes"
    )]
    MissingTracker { view: String },
    #[error("component `{view}` passed to Styled isn't a valid view type")]
    InvalidViewType { view: String },
    #[error("breakpoint table is empty, using the default breakpoints")]
    EmptyBreakpoints,
}

impl Diagnostic {
    pub fn report(&self) {
        log::warn!("{self}");
    }
}

pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;

    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
