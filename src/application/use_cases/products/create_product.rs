use std::fmt;

use crate::application::ports::blob_store::BlobStore;
use crate::application::ports::product_repository::ProductRepository;
use crate::domain::products::payload::{EncodedPayload, PayloadError};
use crate::domain::products::product::{Product, ProductDraft};

/// Request fields, named as clients send them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductField {
    Name,
    Image,
    Document,
    VideoLink,
}

impl ProductField {
    pub fn as_str(self) -> &'static str {
        match self {
            ProductField::Name => "nome",
            ProductField::Image => "imagem",
            ProductField::Document => "pdfDataUrl",
            ProductField::VideoLink => "youtubeLink",
        }
    }
}

impl fmt::Display for ProductField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attachment {
    Image,
    Document,
}

impl fmt::Display for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attachment::Image => f.write_str("image"),
            Attachment::Document => f.write_str("document"),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum CreateProductError {
    #[error("missing required field `{0}`")]
    MissingField(ProductField),
    #[error("invalid {0} payload")]
    InvalidFormat(Attachment, #[source] PayloadError),
    #[error("failed to upload {0}")]
    UploadFailed(Attachment, #[source] anyhow::Error),
    #[error("failed to save product")]
    StorageUnavailable(#[source] anyhow::Error),
}

#[derive(Debug, Clone, Default)]
pub struct NewProduct {
    pub name: Option<String>,
    pub image: Option<String>,
    pub document: Option<String>,
    pub video_link: Option<String>,
}

pub struct CreateProduct<'a, R, B>
where
    R: ProductRepository + ?Sized,
    B: BlobStore + ?Sized,
{
    pub repo: &'a R,
    pub blobs: &'a B,
}

impl<'a, R, B> CreateProduct<'a, R, B>
where
    R: ProductRepository + ?Sized,
    B: BlobStore + ?Sized,
{
    pub async fn execute(&self, input: NewProduct) -> Result<Product, CreateProductError> {
        let name = required(input.name, ProductField::Name)?;
        let image = required(input.image, ProductField::Image)?;
        let document = required(input.document, ProductField::Document)?;
        let video_link = required(input.video_link, ProductField::VideoLink)?;

        // A failed document upload leaves the image object behind.
        let image_url = self.upload(Attachment::Image, &image).await?;
        let document_url = self.upload(Attachment::Document, &document).await?;

        let draft = ProductDraft {
            name,
            image_url,
            document_url,
            video_link,
        };
        let product = self.repo.insert(&draft).await.map_err(|err| {
            tracing::error!(error = ?err, name = %draft.name, "insert_product_failed");
            CreateProductError::StorageUnavailable(err)
        })?;
        tracing::info!(product_id = product.id, "product_created");
        Ok(product)
    }

    async fn upload(
        &self,
        attachment: Attachment,
        raw: &str,
    ) -> Result<String, CreateProductError> {
        let payload = EncodedPayload::parse(raw)
            .map_err(|err| CreateProductError::InvalidFormat(attachment, err))?;
        let key = payload.object_key();
        let content_type = payload.content_type().to_string();
        let stored = self
            .blobs
            .put(&key, &content_type, payload.into_bytes())
            .await
            .map_err(|err| {
                tracing::error!(error = ?err, %attachment, key = %key, "blob_upload_failed");
                CreateProductError::UploadFailed(attachment, err)
            })?;
        tracing::debug!(%attachment, key = %stored.key, size = stored.size, "blob_uploaded");
        Ok(stored.public_url)
    }
}

fn required(value: Option<String>, field: ProductField) -> Result<String, CreateProductError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(CreateProductError::MissingField(field)),
    }
}
