//! # 商品店铺与管理后台
//!
//! 基于托管表格 API 的商品目录服务，包括：
//! - 访客页面：只读商品卡片与按标题/描述的搜索
//! - 管理后台：新增、行内编辑、删除商品
//! - 远端表格 API 客户端：列表、新增、按 id 修改、按 id 删除
//!
//! 应用本身不持有任何商品数据，每次渲染都从远端重新拉取完整列表。

pub mod app;
pub mod catalog;
pub mod config;
pub mod core;
pub mod infrastructure;

pub use app::{router, AppState};
pub use catalog::{CatalogClient, CatalogError, Product, ProductDraft};
pub use config::{load_config, Config, ConfigError};
