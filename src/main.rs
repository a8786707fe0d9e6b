use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::extract::MatchedPath;
use dotenvy::dotenv;
use http::HeaderValue;
use tokio::signal;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use catalog_api::application::ports::blob_store::BlobStore;
use catalog_api::bootstrap::app_context::{AppContext, AppServices};
use catalog_api::bootstrap::config::{Config, StorageBackend};
use catalog_api::infrastructure::db::repositories::product_repository_sqlx::SqlxProductRepository;
use catalog_api::infrastructure::storage::{fs::FsBlobStore, s3::S3BlobStore};
use catalog_api::presentation::http::{health, products};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
        paths(
            catalog_api::presentation::http::products::list_products,
            catalog_api::presentation::http::products::create_product,
            catalog_api::presentation::http::products::delete_product,
            catalog_api::presentation::http::health::health,
        ),
        components(schemas(
            catalog_api::presentation::http::products::ProductResponse,
            catalog_api::presentation::http::products::CreateProductRequest,
            catalog_api::presentation::http::products::DeleteProductResponse,
            catalog_api::presentation::http::error::ErrorBody,
            catalog_api::presentation::http::health::HealthResp,
        )),
        tags(
            (name = "Products", description = "Product catalog"),
            (name = "Health", description = "System health checks")
        )
    )]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "catalog_api=debug,axum=info,tower_http=info".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(
        port = cfg.api_port,
        backend = ?cfg.storage_backend,
        public_base_url = %cfg.public_base_url,
        "Starting catalog API"
    );

    // Database
    let pool = catalog_api::infrastructure::db::connect_pool(
        &cfg.database_url,
        cfg.database_max_connections,
    )
    .await?;
    catalog_api::infrastructure::db::migrate(&pool).await?;

    let blob_store: Arc<dyn BlobStore> = match cfg.storage_backend {
        StorageBackend::Filesystem => {
            tokio::fs::create_dir_all(&cfg.storage_root).await?;
            Arc::new(FsBlobStore::new(
                &cfg.storage_root,
                cfg.public_base_url.clone(),
            ))
        }
        StorageBackend::S3 => Arc::new(S3BlobStore::new(&cfg).await?),
    };
    let product_repo = Arc::new(SqlxProductRepository::new(pool.clone()));

    let ctx = AppContext::new(cfg.clone(), AppServices::new(product_repo, blob_store));

    let methods = [
        http::Method::GET,
        http::Method::POST,
        http::Method::DELETE,
        http::Method::OPTIONS,
    ];
    let cors = match cfg.frontend_url.as_deref().map(HeaderValue::from_str) {
        Some(Ok(origin)) => CorsLayer::new().allow_origin(origin),
        Some(Err(_)) | None if cfg.is_production => {
            // Production refuses to start without FRONTEND_URL, so this only denies
            CorsLayer::new().allow_origin(AllowOrigin::exact(HeaderValue::from_static(
                "http://invalid",
            )))
        }
        _ => CorsLayer::new().allow_origin(AllowOrigin::mirror_request()),
    }
    .allow_methods(methods)
    .allow_headers([http::header::CONTENT_TYPE]);

    let mut app = Router::new()
        .merge(health::routes(pool.clone()))
        .merge(products::routes(ctx.clone()))
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()));

    if cfg.storage_backend == StorageBackend::Filesystem {
        app = app.nest_service("/uploads", ServeDir::new(&cfg.storage_root));
    }

    let app = app
        .layer(cors)
        .layer(DefaultBodyLimit::max(cfg.upload_max_bytes))
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        );

    let api_addr = SocketAddr::from(([0, 0, 0, 0], cfg.api_port));
    let listener = tokio::net::TcpListener::bind(api_addr).await?;
    info!(%api_addr, "HTTP API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    info!("Catalog API stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = ?e, "ctrl_c_handler_failed");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = ?e, "sigterm_handler_failed");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
