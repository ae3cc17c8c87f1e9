//! 应用层：访客页面、管理后台与路由

pub mod admin;
pub mod storefront;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    middleware,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::catalog::CatalogClient;
use crate::config::Config;
use crate::core::{error::CoreError, middleware::request_logging_middleware};
use crate::infrastructure::Templates;
use admin::AdminService;
use storefront::StorefrontService;

/// 搜索框内容，缺省为空字符串
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Clone)]
pub struct AppState {
    pub storefront: StorefrontService,
    pub admin: Arc<AdminService>,
    pub templates: Arc<Templates>,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self, CoreError> {
        let client = CatalogClient::new(&config.catalog)
            .map_err(|e| CoreError::InternalServerError(e.to_string()))?;
        Ok(Self {
            storefront: StorefrontService::new(client.clone()),
            admin: Arc::new(AdminService::new(client, config.admin.notice_seconds)?),
            templates: Arc::new(Templates::new()?),
        })
    }
}

/// 组装全部路由
pub fn router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/", get(storefront::handler::storefront_page))
        .route("/api/products", get(storefront::handler::list_products))
        .route("/admin", get(admin::handler::admin_page))
        .route("/admin/products", post(admin::handler::add_product))
        .route("/admin/products/:id", post(admin::handler::submit_edit_form))
        .route("/admin/products/:id/edit", post(admin::handler::show_edit_form))
        .route("/admin/products/:id/cancel", post(admin::handler::cancel_edit))
        .route("/admin/products/:id/delete", post(admin::handler::delete_product))
        .route("/health", get(health_check))
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// 健康检查
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
