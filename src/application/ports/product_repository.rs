use async_trait::async_trait;

use crate::domain::products::product::{Product, ProductDraft};

#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All rows, newest (highest id) first.
    async fn list(&self) -> anyhow::Result<Vec<Product>>;
    async fn get_by_id(&self, id: i32) -> anyhow::Result<Option<Product>>;
    async fn insert(&self, draft: &ProductDraft) -> anyhow::Result<Product>;
    // Returns false when no row matched
    async fn delete(&self, id: i32) -> anyhow::Result<bool>;
}
