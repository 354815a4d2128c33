/// Errors produced while decoding a create request body.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ParseError {
    /// The body is not well-formed JSON.
    #[error("invalid json: {0}")]
    InvalidJson(String),

    /// The body is valid JSON but its top-level value is not an object.
    #[error("request body must be a JSON object")]
    NotAnObject,
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidJson(err.to_string())
    }
}

/// A client-supplied value failed one of the item field or parameter rules.
///
/// The `Display` output is the exact message returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ValidationError {
    /// `title` is missing, not a string, blank, or longer than 200 characters.
    #[error("title is required (1-200 chars)")]
    Title,

    /// `body` is missing, not a string, blank, or longer than 4000 characters.
    #[error("body is required (1-4000 chars)")]
    Body,

    /// An optional field is not a string or exceeds 100 characters.
    #[error("{field} must be <= 100 chars")]
    OptionalTooLong { field: &'static str },

    /// A path identifier is not 32 hex digits.
    #[error("id must be 32 hex chars (uuid4 hex)")]
    InvalidId,

    /// The `limit` query value is not an integer.
    #[error("limit must be an integer")]
    LimitNotInteger,

    /// The `limit` query value is an integer outside `[1, 100]`.
    #[error("limit must be between 1 and 100")]
    LimitOutOfRange,
}
