pub mod blob_store;
pub mod product_repository;

#[cfg(test)]
pub mod fakes;
