//! Core types for the items service.
//!
//! Defines the item data model, the codec between its storage and public
//! representations, and the rules applied to untrusted request input.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod id;
pub mod input;
pub mod item;
pub mod validate;

pub use error::{ParseError, ValidationError};
pub use id::{ItemId, ITEM_ID_LEN, PRIMARY_KEY_PREFIX};
pub use input::{RawField, RawInput};
pub use item::{
    format_created_at, to_public, to_storage, InternalRecord, PublicItem,
    DEFAULT_LISTING_PARTITION,
};
pub use validate::{validate_create_input, ListLimit, ValidatedFields};
