//! 商品目录：数据模型、搜索过滤与远端 API 客户端

pub mod client;
pub mod model;
pub mod search;

pub use client::{CatalogClient, CatalogError};
pub use model::{DraftError, Product, ProductDraft, AMAZON_URL_PREFIX};
pub use search::filter_products;
