//! Runtime configuration for the gateway.

use items_core::DEFAULT_LISTING_PARTITION;

use crate::error::GatewayError;

/// Listing index name used when none is configured.
pub const DEFAULT_INDEX_NAME: &str = "gsi1";

/// Settings resolved once at startup and shared by every handler.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct GatewayConfig {
    /// Store table identifier. Item requests fail with a configuration
    /// error while this is unset.
    pub table_name: Option<String>,
    /// Name of the secondary index used for listing.
    pub index_name: String,
    /// Partition value every item is listed under.
    pub listing_partition: String,
}

impl GatewayConfig {
    /// Create a config with default index name and listing partition.
    ///
    /// A blank `table_name` counts as unset.
    #[must_use]
    pub fn new(table_name: Option<String>) -> Self {
        Self {
            table_name: table_name.filter(|t| !t.trim().is_empty()),
            index_name: DEFAULT_INDEX_NAME.to_owned(),
            listing_partition: DEFAULT_LISTING_PARTITION.to_owned(),
        }
    }

    #[must_use]
    pub fn with_index_name(mut self, index_name: impl Into<String>) -> Self {
        self.index_name = index_name.into();
        self
    }

    #[must_use]
    pub fn with_listing_partition(mut self, partition: impl Into<String>) -> Self {
        self.listing_partition = partition.into();
        self
    }

    /// Returns the configured table identifier.
    ///
    /// # Errors
    /// Returns [`GatewayError::Configuration`] if no table is configured.
    pub fn table_name(&self) -> Result<&str, GatewayError> {
        self.table_name
            .as_deref()
            .ok_or_else(|| GatewayError::Configuration("TABLE_NAME is not configured".to_owned()))
    }
}
