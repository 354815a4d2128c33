use std::fmt;

use serde::Serialize;
use uuid::Uuid;

use crate::error::ValidationError;

/// Number of hex digits in an item identifier.
pub const ITEM_ID_LEN: usize = 32;

/// Prefix prepended to an item id to form its primary key.
pub const PRIMARY_KEY_PREFIX: &str = "ITEM#";

/// Unique identifier for an item: 32 lowercase hex digits, no separators.
///
/// Always holds the lowercase form, whether generated or parsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Creates a new random `ItemId` from a v4 UUID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Parses a client-supplied identifier.
    ///
    /// Surrounding whitespace is ignored and hex digits are accepted in
    /// either case. The result is deliberately normalised to lowercase, the
    /// only form ids are stored in, so an uppercase spelling of an existing
    /// id finds that item instead of missing it.
    ///
    /// # Errors
    /// Returns [`ValidationError::InvalidId`] unless the trimmed input is
    /// exactly 32 ASCII hex digits.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.len() != ITEM_ID_LEN || !trimmed.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ValidationError::InvalidId);
        }
        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the primary key under which this item is stored.
    #[must_use]
    pub fn primary_key(&self) -> String {
        format!("{PRIMARY_KEY_PREFIX}{}", self.0)
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
