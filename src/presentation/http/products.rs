use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::{delete, get},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::use_cases::products::create_product::{CreateProduct, NewProduct};
use crate::application::use_cases::products::delete_product::DeleteProduct;
use crate::application::use_cases::products::list_products::ListProducts;
use crate::bootstrap::app_context::AppContext;
use crate::domain::products::product::Product;
use crate::presentation::http::error::{ApiError, ErrorBody};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: i32,
    pub name: String,
    /// Public URL of the stored image
    pub image: Option<String>,
    /// Public URL of the stored PDF
    pub pdf_data_url: Option<String>,
    pub youtube_link: Option<String>,
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            name: p.name,
            image: p.image_url,
            pdf_data_url: p.document_url,
            youtube_link: p.video_link,
        }
    }
}

/// Files travel inline as `data:<mime>;base64,<body>`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub nome: Option<String>,
    pub imagem: Option<String>,
    #[serde(rename = "pdfDataUrl")]
    pub pdf_data_url: Option<String>,
    #[serde(rename = "youtubeLink")]
    pub youtube_link: Option<String>,
}

impl From<CreateProductRequest> for NewProduct {
    fn from(req: CreateProductRequest) -> Self {
        Self {
            name: req.nome,
            image: req.imagem,
            document: req.pdf_data_url,
            video_link: req.youtube_link,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteProductResponse {
    pub message: String,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/produtos", get(list_products).post(create_product))
        .route("/produtos/:id", delete(delete_product))
        .with_state(ctx)
}

#[utoipa::path(get, path = "/produtos", tag = "Products",
    responses(
        (status = 200, body = [ProductResponse]),
        (status = 500, body = ErrorBody)
    ))]
pub async fn list_products(
    State(ctx): State<AppContext>,
) -> Result<Json<Vec<ProductResponse>>, ApiError> {
    let repo = ctx.product_repo();
    let uc = ListProducts {
        repo: repo.as_ref(),
    };
    let products = uc.execute().await?;
    Ok(Json(products.into_iter().map(ProductResponse::from).collect()))
}

#[utoipa::path(post, path = "/produtos", tag = "Products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, body = ProductResponse),
        (status = 400, description = "A required field is missing", body = ErrorBody),
        (status = 500, description = "Upload or database failure", body = ErrorBody)
    ))]
pub async fn create_product(
    State(ctx): State<AppContext>,
    payload: Result<Json<CreateProductRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ProductResponse>), ApiError> {
    let Json(req) = payload?;

    let repo = ctx.product_repo();
    let blobs = ctx.blob_store();
    let uc = CreateProduct {
        repo: repo.as_ref(),
        blobs: blobs.as_ref(),
    };
    let product = uc.execute(req.into()).await?;
    Ok((StatusCode::CREATED, Json(product.into())))
}

#[utoipa::path(delete, path = "/produtos/{id}", tag = "Products",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, body = DeleteProductResponse),
        (status = 404, body = ErrorBody),
        (status = 500, body = ErrorBody)
    ))]
pub async fn delete_product(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<Json<DeleteProductResponse>, ApiError> {
    let repo = ctx.product_repo();
    let blobs = ctx.blob_store();
    let uc = DeleteProduct {
        repo: repo.as_ref(),
        blobs: blobs.as_ref(),
    };
    let id = uc.execute(&id).await?;
    Ok(Json(DeleteProductResponse {
        message: format!("Product {id} deleted"),
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{Body, to_bytes};
    use http::Request;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::application::ports::fakes::{InMemoryProducts, RecordingBlobStore};
    use crate::bootstrap::app_context::AppServices;
    use crate::bootstrap::config::Config;

    fn test_config() -> Config {
        Config::from_lookup(|key| match key {
            "STORAGE_BACKEND" => Some("filesystem".into()),
            _ => None,
        })
        .unwrap()
    }

    fn app(repo: Arc<InMemoryProducts>, blobs: Arc<RecordingBlobStore>) -> Router {
        let ctx = AppContext::new(test_config(), AppServices::new(repo, blobs));
        routes(ctx)
    }

    async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
        let res = app.oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn post_json(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/produtos")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn stored(id: i32) -> Product {
        Product {
            id,
            name: format!("Product {id}"),
            image_url: Some(format!("https://blobs.test/produtos/{id}.png")),
            document_url: Some(format!("https://blobs.test/produtos/{id}.pdf")),
            video_link: Some("https://youtu.be/x".into()),
        }
    }

    #[tokio::test]
    async fn create_returns_201_with_external_field_names() {
        let repo = Arc::new(InMemoryProducts::default());
        let blobs = Arc::new(RecordingBlobStore::default());

        let (status, body) = send(
            app(repo.clone(), blobs.clone()),
            post_json(json!({
                "nome": "Widget",
                "imagem": "data:image/png;base64,iVBORw0KGgo=",
                "pdfDataUrl": "data:application/pdf;base64,JVBERi0=",
                "youtubeLink": "https://youtu.be/x"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert!(body["id"].is_i64());
        assert_eq!(body["name"], "Widget");
        assert_eq!(body["youtubeLink"], "https://youtu.be/x");
        let image = body["image"].as_str().unwrap();
        let pdf = body["pdfDataUrl"].as_str().unwrap();
        assert!(image.starts_with("https://") && image.ends_with(".png"));
        assert!(pdf.starts_with("https://") && pdf.ends_with(".pdf"));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn create_with_missing_field_is_400_without_side_effects() {
        let repo = Arc::new(InMemoryProducts::default());
        let blobs = Arc::new(RecordingBlobStore::default());

        let (status, body) = send(
            app(repo.clone(), blobs.clone()),
            post_json(json!({
                "nome": "Widget",
                "imagem": "data:image/png;base64,iVBORw0KGgo=",
                "pdfDataUrl": ""
            })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "missing required field `pdfDataUrl`");
        assert!(blobs.put_keys().is_empty());
        assert!(repo.calls().is_empty());
    }

    #[tokio::test]
    async fn malformed_json_is_400_with_error_body() {
        let repo = Arc::new(InMemoryProducts::default());
        let blobs = Arc::new(RecordingBlobStore::default());
        let req = Request::builder()
            .method("POST")
            .uri("/produtos")
            .header("content-type", "application/json")
            .body(Body::from("{\"nome\": "))
            .unwrap();

        let (status, body) = send(app(repo, blobs), req).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn upload_failure_is_500() {
        let repo = Arc::new(InMemoryProducts::default());
        let blobs = Arc::new(RecordingBlobStore::failing_uploads_of("image/png"));

        let (status, body) = send(
            app(repo.clone(), blobs),
            post_json(json!({
                "nome": "Widget",
                "imagem": "data:image/png;base64,iVBORw0KGgo=",
                "pdfDataUrl": "data:application/pdf;base64,JVBERi0=",
                "youtubeLink": "https://youtu.be/x"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "failed to upload image");
        assert_eq!(repo.len(), 0);
    }

    #[tokio::test]
    async fn list_returns_newest_first() {
        let repo = Arc::new(InMemoryProducts::default());
        for id in [1, 2, 3] {
            repo.seed(stored(id));
        }

        let req = Request::builder()
            .uri("/produtos")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app(repo, Arc::default()), req).await;

        assert_eq!(status, StatusCode::OK);
        let items = body.as_array().unwrap();
        let ids: Vec<i64> = items.iter().map(|p| p["id"].as_i64().unwrap()).collect();
        assert_eq!(ids, vec![3, 2, 1]);
        assert_eq!(items[0]["pdfDataUrl"], "https://blobs.test/produtos/3.pdf");
    }

    #[tokio::test]
    async fn list_failure_is_500() {
        let req = Request::builder()
            .uri("/produtos")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(
            app(Arc::new(InMemoryProducts::unavailable()), Arc::default()),
            req,
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "failed to load products");
    }

    #[tokio::test]
    async fn delete_succeeds_even_when_blob_cleanup_fails() {
        let repo = Arc::new(InMemoryProducts::default());
        repo.seed(stored(4));
        let blobs = Arc::new(RecordingBlobStore::failing_deletes());

        let req = Request::builder()
            .method("DELETE")
            .uri("/produtos/4")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app(repo.clone(), blobs.clone()), req).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Product 4 deleted");
        assert_eq!(repo.len(), 0);
        assert_eq!(blobs.deleted_urls().len(), 2);
    }

    #[tokio::test]
    async fn delete_unknown_or_garbage_id_is_404() {
        for uri in ["/produtos/99", "/produtos/abc"] {
            let repo = Arc::new(InMemoryProducts::default());
            let blobs = Arc::new(RecordingBlobStore::default());

            let req = Request::builder()
                .method("DELETE")
                .uri(uri)
                .body(Body::empty())
                .unwrap();
            let (status, body) = send(app(repo.clone(), blobs.clone()), req).await;

            assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
            assert_eq!(body["error"], "product not found");
            assert!(!repo.calls().contains(&"delete".to_string()));
            assert!(blobs.deleted_urls().is_empty());
        }
    }
}
