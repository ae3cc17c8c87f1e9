//! 商品搜索过滤

use super::model::Product;

/// 按标题或描述做不区分大小写的子串匹配
///
/// 搜索词为空时返回全部记录，保持原有顺序。
pub fn filter_products<'a>(products: &'a [Product], search_term: &str) -> Vec<&'a Product> {
    let term = search_term.to_lowercase();
    if term.is_empty() {
        return products.iter().collect();
    }

    products
        .iter()
        .filter(|p| {
            p.title.to_lowercase().contains(&term) || p.description.to_lowercase().contains(&term)
        })
        .collect()
}
