use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;

use crate::application::ports::product_repository::ProductRepository;
use crate::domain::products::product::{Product, ProductDraft};
use crate::infrastructure::db::PgPool;

pub struct SqlxProductRepository {
    pub pool: PgPool,
}

impl SqlxProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn product_from_row(r: PgRow) -> Product {
    Product {
        id: r.get("id"),
        name: r.get("nome"),
        image_url: r.try_get("imagem_url").ok().flatten(),
        document_url: r.try_get("pdf_url").ok().flatten(),
        video_link: r.try_get("youtube_link").ok().flatten(),
    }
}

#[async_trait]
impl ProductRepository for SqlxProductRepository {
    async fn list(&self) -> anyhow::Result<Vec<Product>> {
        let rows = sqlx::query(
            r#"SELECT id, nome, imagem_url, pdf_url, youtube_link
               FROM produtos
               ORDER BY id DESC"#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(product_from_row).collect())
    }

    async fn get_by_id(&self, id: i32) -> anyhow::Result<Option<Product>> {
        let row = sqlx::query(
            r#"SELECT id, nome, imagem_url, pdf_url, youtube_link
               FROM produtos
               WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(product_from_row))
    }

    async fn insert(&self, draft: &ProductDraft) -> anyhow::Result<Product> {
        let row = sqlx::query(
            r#"INSERT INTO produtos (nome, imagem_url, pdf_url, youtube_link)
               VALUES ($1, $2, $3, $4)
               RETURNING id, nome, imagem_url, pdf_url, youtube_link"#,
        )
        .bind(&draft.name)
        .bind(&draft.image_url)
        .bind(&draft.document_url)
        .bind(&draft.video_link)
        .fetch_one(&self.pool)
        .await?;
        Ok(product_from_row(row))
    }

    async fn delete(&self, id: i32) -> anyhow::Result<bool> {
        let res = sqlx::query(r#"DELETE FROM produtos WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
