use async_trait::async_trait;

use crate::errors::Result;

/// Contract for the external file storage used for receipts and campaign images.
#[async_trait]
pub trait FileStoreTrait: Send + Sync {
    /// Stores `bytes` under `proposed_path` and returns the reference to persist.
    async fn store(&self, bytes: Vec<u8>, proposed_path: &str) -> Result<String>;

    /// Deletes a previously stored file. Missing files are not an error.
    async fn delete(&self, reference: &str) -> Result<()>;
}
