//! Store gateway for item records.
//!
//! Defines the contract handlers use to reach the key-value store and an
//! in-process implementation of it.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod backend;
pub mod error;
pub mod memory;

pub use backend::ItemStore;
pub use error::StoreError;
pub use memory::MemoryStore;
