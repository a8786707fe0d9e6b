//! In-memory port implementations shared by use-case and handler tests.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::application::ports::blob_store::{BlobStore, StoredBlob};
use crate::application::ports::product_repository::ProductRepository;
use crate::domain::products::product::{Product, ProductDraft};

pub const BLOB_BASE_URL: &str = "https://blobs.test/produtos";

#[derive(Default)]
pub struct InMemoryProducts {
    rows: Mutex<BTreeMap<i32, Product>>,
    calls: Mutex<Vec<String>>,
    pub unavailable: bool,
}

impl InMemoryProducts {
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub fn seed(&self, product: Product) {
        self.rows.lock().unwrap().insert(product.id, product);
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: &str) -> anyhow::Result<()> {
        self.calls.lock().unwrap().push(call.to_string());
        if self.unavailable {
            anyhow::bail!("connection refused");
        }
        Ok(())
    }
}

#[async_trait]
impl ProductRepository for InMemoryProducts {
    async fn list(&self) -> anyhow::Result<Vec<Product>> {
        self.record("list")?;
        Ok(self.rows.lock().unwrap().values().rev().cloned().collect())
    }

    async fn get_by_id(&self, id: i32) -> anyhow::Result<Option<Product>> {
        self.record("get")?;
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn insert(&self, draft: &ProductDraft) -> anyhow::Result<Product> {
        self.record("insert")?;
        let mut rows = self.rows.lock().unwrap();
        let id = rows.keys().next_back().copied().unwrap_or(0) + 1;
        let product = Product {
            id,
            name: draft.name.clone(),
            image_url: Some(draft.image_url.clone()),
            document_url: Some(draft.document_url.clone()),
            video_link: Some(draft.video_link.clone()),
        };
        rows.insert(id, product.clone());
        Ok(product)
    }

    async fn delete(&self, id: i32) -> anyhow::Result<bool> {
        self.record("delete")?;
        Ok(self.rows.lock().unwrap().remove(&id).is_some())
    }
}

#[derive(Default)]
pub struct RecordingBlobStore {
    puts: Mutex<Vec<(String, String, usize)>>,
    deletes: Mutex<Vec<String>>,
    /// Uploads with this content type fail.
    pub fail_put_for: Option<String>,
    pub fail_deletes: bool,
}

impl RecordingBlobStore {
    pub fn failing_uploads_of(content_type: &str) -> Self {
        Self {
            fail_put_for: Some(content_type.to_string()),
            ..Self::default()
        }
    }

    pub fn failing_deletes() -> Self {
        Self {
            fail_deletes: true,
            ..Self::default()
        }
    }

    pub fn put_keys(&self) -> Vec<String> {
        self.puts
            .lock()
            .unwrap()
            .iter()
            .map(|(key, _, _)| key.clone())
            .collect()
    }

    pub fn deleted_urls(&self) -> Vec<String> {
        self.deletes.lock().unwrap().clone()
    }
}

#[async_trait]
impl BlobStore for RecordingBlobStore {
    async fn put(
        &self,
        key: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> anyhow::Result<StoredBlob> {
        if self.fail_put_for.as_deref() == Some(content_type) {
            anyhow::bail!("bucket rejected {key}");
        }
        self.puts
            .lock()
            .unwrap()
            .push((key.to_string(), content_type.to_string(), bytes.len()));
        Ok(StoredBlob {
            key: key.to_string(),
            public_url: format!("{BLOB_BASE_URL}/{key}"),
            size: bytes.len() as i64,
        })
    }

    async fn delete_by_url(&self, public_url: &str) -> anyhow::Result<()> {
        self.deletes.lock().unwrap().push(public_url.to_string());
        if self.fail_deletes {
            anyhow::bail!("access denied for {public_url}");
        }
        Ok(())
    }
}
