use std::fmt;

// The tool's contract pins the exit codes: 0 means fully transmitted and
// drained, 1 means any failure.
pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Wrap an underlying error with context as a fatal CLI failure.
pub fn failure(context: &str, err: impl fmt::Display) -> CliError {
    CliError::new(FAILURE, format!("{context}: {err}"))
}
