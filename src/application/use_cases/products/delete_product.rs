use futures_util::future::join_all;

use crate::application::ports::blob_store::BlobStore;
use crate::application::ports::product_repository::ProductRepository;

#[derive(thiserror::Error, Debug)]
pub enum DeleteProductError {
    #[error("product not found")]
    NotFound,
    #[error("failed to delete product")]
    StorageUnavailable(#[source] anyhow::Error),
}

pub struct DeleteProduct<'a, R, B>
where
    R: ProductRepository + ?Sized,
    B: BlobStore + ?Sized,
{
    pub repo: &'a R,
    pub blobs: &'a B,
}

impl<'a, R, B> DeleteProduct<'a, R, B>
where
    R: ProductRepository + ?Sized,
    B: BlobStore + ?Sized,
{
    /// Returns the deleted id. Once the row is gone the call succeeds, whatever
    /// happens to the stored objects.
    pub async fn execute(&self, raw_id: &str) -> Result<i32, DeleteProductError> {
        let Ok(id) = raw_id.trim().parse::<i32>() else {
            tracing::debug!(raw_id, "delete_product_unparsable_id");
            return Err(DeleteProductError::NotFound);
        };
        let product = self
            .repo
            .get_by_id(id)
            .await
            .map_err(DeleteProductError::StorageUnavailable)?
            .ok_or(DeleteProductError::NotFound)?;

        // Lost a race with a concurrent delete; that request owns the cleanup.
        if !self
            .repo
            .delete(id)
            .await
            .map_err(DeleteProductError::StorageUnavailable)?
        {
            return Err(DeleteProductError::NotFound);
        }
        tracing::info!(product_id = id, "product_deleted");

        let blobs = self.blobs;
        let attempts = product.blob_urls().into_iter().map(|url| async move {
            let res = blobs.delete_by_url(url).await;
            (url, res)
        });
        for (url, res) in join_all(attempts).await {
            if let Err(err) = res {
                tracing::warn!(error = ?err, product_id = id, url = %url, "blob_cleanup_failed");
            }
        }
        Ok(id)
    }
}
