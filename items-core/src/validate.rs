//! Field and parameter rules for untrusted input.

use std::num::IntErrorKind;

use crate::error::ValidationError;
use crate::input::{RawField, RawInput};

/// Maximum trimmed length of `title`, in characters.
pub const TITLE_MAX_CHARS: usize = 200;
/// Maximum trimmed length of `body`, in characters.
pub const BODY_MAX_CHARS: usize = 4000;
/// Maximum trimmed length of each optional field, in characters.
pub const OPTIONAL_MAX_CHARS: usize = 100;

/// Create-request fields that passed validation, trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedFields {
    pub title: String,
    pub body: String,
    pub category: String,
    pub priority: String,
    pub author: String,
}

/// Applies the create rules in order; the first failing field wins.
///
/// `title` and `body` must be strings whose trimmed length is within
/// bounds. Each optional field passes unchanged when missing or the empty
/// string, and otherwise must be a string of at most 100 trimmed characters.
/// Non-string values are rejected, never coerced.
///
/// # Errors
/// Returns the [`ValidationError`] for the first field that breaks its rule.
pub fn validate_create_input(raw: &RawInput) -> Result<ValidatedFields, ValidationError> {
    let title = bounded_text(&raw.title, TITLE_MAX_CHARS).ok_or(ValidationError::Title)?;
    let body = bounded_text(&raw.body, BODY_MAX_CHARS).ok_or(ValidationError::Body)?;
    let category = optional_text(&raw.category, "category")?;
    let priority = optional_text(&raw.priority, "priority")?;
    let author = optional_text(&raw.author, "author")?;
    Ok(ValidatedFields { title, body, category, priority, author })
}

/// Strips Unicode whitespace plus the ASCII separators `\x1c`..=`\x1f`.
fn trim_text(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_whitespace() || ('\x1c'..='\x1f').contains(&c))
}

fn bounded_text(field: &RawField, max_chars: usize) -> Option<String> {
    let RawField::Text(s) = field else {
        return None;
    };
    let trimmed = trim_text(s);
    let len = trimmed.chars().count();
    (1..=max_chars).contains(&len).then(|| trimmed.to_owned())
}

fn optional_text(field: &RawField, name: &'static str) -> Result<String, ValidationError> {
    match field {
        RawField::Missing => Ok(String::new()),
        RawField::Text(s) if s.is_empty() => Ok(String::new()),
        RawField::Text(s) if trim_text(s).chars().count() <= OPTIONAL_MAX_CHARS => {
            Ok(trim_text(s).to_owned())
        }
        RawField::Text(_) | RawField::Other(_) => {
            Err(ValidationError::OptionalTooLong { field: name })
        }
    }
}

/// Page size for the list operation, always within `[1, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListLimit(usize);

impl ListLimit {
    /// Used when the query omits `limit` or leaves it blank.
    pub const DEFAULT: Self = Self(20);
    pub const MIN: usize = 1;
    pub const MAX: usize = 100;

    /// Parses the optional `limit` query value.
    ///
    /// # Errors
    /// Returns [`ValidationError::LimitNotInteger`] for non-numeric input and
    /// [`ValidationError::LimitOutOfRange`] for integers outside `[1, 100]`,
    /// including values too large to represent.
    pub fn parse(raw: Option<&str>) -> Result<Self, ValidationError> {
        let trimmed = raw.map(str::trim).unwrap_or_default();
        if trimmed.is_empty() {
            return Ok(Self::DEFAULT);
        }
        let value = match trimmed.parse::<i64>() {
            Ok(v) => v,
            Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
                return Err(ValidationError::LimitOutOfRange);
            }
            Err(_) => return Err(ValidationError::LimitNotInteger),
        };
        usize::try_from(value)
            .ok()
            .filter(|v| (Self::MIN..=Self::MAX).contains(v))
            .map(Self)
            .ok_or(ValidationError::LimitOutOfRange)
    }

    /// Returns the limit as a record count.
    #[must_use]
    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for ListLimit {
    fn default() -> Self {
        Self::DEFAULT
    }
}
