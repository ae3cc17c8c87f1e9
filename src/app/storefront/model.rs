//! 访客页面视图模型

use serde::Serialize;

use crate::catalog::Product;

/// 只读商品卡片
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductCard {
    pub id: String,
    pub title: String,
    pub image: String,
    pub amazon_url: String,
    pub description: String,
}

impl From<&Product> for ProductCard {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id_str().to_string(),
            title: product.title.clone(),
            image: product.image.clone(),
            amazon_url: product.amazon_url.clone(),
            description: product.description.clone(),
        }
    }
}

/// 过滤后的目录：要么是空提示，要么是一组卡片
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogView {
    Empty,
    Cards(Vec<ProductCard>),
}

impl CatalogView {
    pub fn cards(&self) -> &[ProductCard] {
        match self {
            CatalogView::Empty => &[],
            CatalogView::Cards(cards) => cards,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CatalogView::Empty)
    }
}

#[derive(Debug, Clone)]
pub struct StorefrontPage {
    pub search: String,
    pub view: CatalogView,
}
