//! 访客页面服务

use super::model::{CatalogView, ProductCard, StorefrontPage};
use crate::catalog::{filter_products, CatalogClient, Product};
use crate::core::error::CoreError;

/// 由记录和搜索词推导出要展示的卡片，不涉及任何 I/O
pub fn catalog_view(products: &[Product], search_term: &str) -> CatalogView {
    let filtered = filter_products(products, search_term);
    if filtered.is_empty() {
        CatalogView::Empty
    } else {
        CatalogView::Cards(filtered.into_iter().map(ProductCard::from).collect())
    }
}

#[derive(Clone)]
pub struct StorefrontService {
    client: CatalogClient,
}

impl StorefrontService {
    pub fn new(client: CatalogClient) -> Self {
        Self { client }
    }

    /// 每次渲染都重新拉取完整列表
    pub async fn render(&self, search_term: &str) -> Result<StorefrontPage, CoreError> {
        let products = self.client.fetch_all().await?;
        Ok(StorefrontPage {
            search: search_term.to_string(),
            view: catalog_view(&products, search_term),
        })
    }

    /// 过滤后的原始记录，供 JSON 接口使用
    pub async fn search(&self, search_term: &str) -> Result<Vec<Product>, CoreError> {
        let products = self.client.fetch_all().await?;
        Ok(filter_products(&products, search_term)
            .into_iter()
            .cloned()
            .collect())
    }
}
