//! 访客页面：只读商品目录与搜索

pub mod handler;
pub mod model;
pub mod service;

pub use service::StorefrontService;
