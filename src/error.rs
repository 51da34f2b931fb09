use thiserror::Error;

/// Failures raised while turning raw command-line tokens into an operation.
///
/// Both variants are recoverable: the intent builder converts any of them
/// into a `Help` operation instead of letting them escape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A date or time token matched none of the accepted shapes, or named
    /// an invalid calendar/clock value. Carries the offending raw string.
    #[error("failed to parse date/time option: {raw}")]
    Format { raw: String },

    /// Tokens were individually well-formed but mutually unsatisfiable.
    #[error("{0}")]
    Value(String),
}
