use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
    pub key: String,
    pub public_url: String,
    pub size: i64,
}

#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Writes `bytes` under `key` and returns where the object can be fetched.
    async fn put(
        &self,
        key: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> anyhow::Result<StoredBlob>;
    /// Removes the object behind a URL previously returned by `put`.
    async fn delete_by_url(&self, public_url: &str) -> anyhow::Result<()>;
}
