pub mod product_repository_sqlx;
