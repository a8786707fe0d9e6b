pub mod payload;
pub mod product;
