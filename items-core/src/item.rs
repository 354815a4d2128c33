//! Public and storage representations of an item, and the codec between them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::ItemId;
use crate::validate::ValidatedFields;

/// Partition value shared by every item in the listing index unless
/// configured otherwise.
pub const DEFAULT_LISTING_PARTITION: &str = "ITEM";

/// Format of `created_at`: UTC, second precision, fixed width.
///
/// Fixed width and zero padding make lexicographic order match
/// chronological order, which the listing index relies on.
pub const CREATED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Formats a timestamp the way `created_at` is stored and returned.
#[must_use]
pub fn format_created_at(at: DateTime<Utc>) -> String {
    at.format(CREATED_AT_FORMAT).to_string()
}

/// An item as exposed to callers. Index keys are never part of this shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicItem {
    pub id: String,
    pub title: String,
    pub category: String,
    pub priority: String,
    pub body: String,
    pub author: String,
    pub created_at: String,
}

/// An item as persisted, with its primary key and listing index entry.
///
/// Every field defaults to the empty string when absent, so records written
/// by older producers still decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InternalRecord {
    /// `"ITEM#" + id`; unique point-lookup key.
    #[serde(rename = "pk")]
    pub primary_key: String,
    /// Listing index partition; identical for all items.
    #[serde(rename = "gsi1pk")]
    pub listing_partition: String,
    /// Listing index sort key; equal to `created_at`.
    #[serde(rename = "gsi1sk")]
    pub listing_sort_key: String,
    pub id: String,
    pub title: String,
    pub category: String,
    pub priority: String,
    pub body: String,
    pub author: String,
    pub created_at: String,
}

/// Builds the storage record for a newly created item.
#[must_use]
pub fn to_storage(
    fields: ValidatedFields,
    id: &ItemId,
    created_at: &str,
    listing_partition: &str,
) -> InternalRecord {
    let ValidatedFields { title, body, category, priority, author } = fields;
    InternalRecord {
        primary_key: id.primary_key(),
        listing_partition: listing_partition.to_owned(),
        listing_sort_key: created_at.to_owned(),
        id: id.as_str().to_owned(),
        title,
        category,
        priority,
        body,
        author,
        created_at: created_at.to_owned(),
    }
}

/// Projects a stored record onto its public fields, dropping index keys.
///
/// Total: fields missing from a partially populated record are already
/// empty strings, so this never fails.
#[must_use]
pub fn to_public(record: InternalRecord) -> PublicItem {
    let InternalRecord { id, title, category, priority, body, author, created_at, .. } = record;
    PublicItem { id, title, category, priority, body, author, created_at }
}

impl From<InternalRecord> for PublicItem {
    fn from(record: InternalRecord) -> Self {
        to_public(record)
    }
}
