use std::sync::Arc;

use crate::application::ports::blob_store::BlobStore;
use crate::application::ports::product_repository::ProductRepository;
use crate::bootstrap::config::Config;

#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    services: Arc<AppServices>,
}

#[derive(Clone)]
pub struct AppServices {
    product_repo: Arc<dyn ProductRepository>,
    blob_store: Arc<dyn BlobStore>,
}

impl AppServices {
    pub fn new(product_repo: Arc<dyn ProductRepository>, blob_store: Arc<dyn BlobStore>) -> Self {
        Self {
            product_repo,
            blob_store,
        }
    }
}

impl AppContext {
    pub fn new(cfg: Config, services: AppServices) -> Self {
        Self {
            cfg,
            services: Arc::new(services),
        }
    }

    pub fn product_repo(&self) -> Arc<dyn ProductRepository> {
        self.services.product_repo.clone()
    }

    pub fn blob_store(&self) -> Arc<dyn BlobStore> {
        self.services.blob_store.clone()
    }
}
