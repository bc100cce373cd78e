//! The store client seam.
//!
//! The pipeline only needs "get one item from this table by this key". The
//! AWS SDK implementation lives in `dynq-client`; tests use an in-memory one.
//!
//! # Object safety
//!
//! The trait uses `#[async_trait]` so it can be used as `&dyn ItemClient`.

use dynq_model::{KeyDescriptor, LookupResult};

use crate::error::ClientError;

/// Point-read access to a key-value table.
#[async_trait::async_trait]
pub trait ItemClient: Send + Sync {
    /// Fetch the item with exactly this primary key.
    ///
    /// A missing item is `Ok(LookupResult::NotFound)`. Every other failure
    /// (auth, network, throttling, unknown table) is a [`ClientError`].
    async fn get_item(
        &self,
        table_name: &str,
        key: &KeyDescriptor,
    ) -> Result<LookupResult, ClientError>;
}

#[async_trait::async_trait]
impl<T: ItemClient + ?Sized> ItemClient for &T {
    async fn get_item(
        &self,
        table_name: &str,
        key: &KeyDescriptor,
    ) -> Result<LookupResult, ClientError> {
        (**self).get_item(table_name, key).await
    }
}
