use derive_more::Display;

/// Errors raised by the row-building utilities.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum AbsenceError {
    /// start date does not parse, or the day count is negative
    #[display(fmt = "invalid input: {}", _0)]
    InvalidInput(String),
}

impl std::error::Error for AbsenceError {}

impl AbsenceError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        AbsenceError::InvalidInput(msg.into())
    }
}
