//! Catalog module: products and categories over pluggable stores.
//!
//! Layout mirrors the other service modules: `domain` holds request and
//! response shapes, `repository` the store traits, `repo` the
//! implementations, and one service per aggregate.

pub mod domain;
pub mod repository;
pub mod repo;
pub mod product_service;
pub mod category_service;

pub use category_service::CategoryService;
pub use product_service::ProductService;
pub use repository::CatalogStores;
