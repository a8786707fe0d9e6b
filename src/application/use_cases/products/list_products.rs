use crate::application::ports::product_repository::ProductRepository;
use crate::domain::products::product::Product;

#[derive(thiserror::Error, Debug)]
pub enum ListProductsError {
    #[error("failed to load products")]
    StorageUnavailable(#[source] anyhow::Error),
}

pub struct ListProducts<'a, R: ProductRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ProductRepository + ?Sized> ListProducts<'a, R> {
    pub async fn execute(&self) -> Result<Vec<Product>, ListProductsError> {
        self.repo
            .list()
            .await
            .map_err(ListProductsError::StorageUnavailable)
    }
}
