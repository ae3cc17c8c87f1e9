//! 访客页面处理器

use axum::{
    extract::{Query, State},
    response::{Html, Json},
};
use minijinja::context;

use crate::app::{AppState, SearchQuery};
use crate::catalog::Product;
use crate::core::{error::CoreError, response::ApiResponse};

/// 商品目录页面
pub async fn storefront_page(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Html<String>, CoreError> {
    let page = state.storefront.render(&query.q).await?;
    let html = state.templates.render(
        "storefront.html",
        context! {
            search => &page.search,
            empty => page.view.is_empty(),
            cards => page.view.cards(),
        },
    )?;
    Ok(Html(html))
}

/// 过滤后的商品列表 (JSON)
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<Product>>>, CoreError> {
    let products = state.storefront.search(&query.q).await?;
    let message = format!("获取到 {} 个商品", products.len());
    Ok(Json(ApiResponse::success(products, message)))
}
