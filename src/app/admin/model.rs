//! 管理后台数据模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::app::storefront::model::ProductCard;
use crate::catalog::{DraftError, ProductDraft};

/// 行内编辑表单，以记录 id 而不是行号定位
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditForm {
    pub id: String,
    pub draft: ProductDraft,
}

/// 编辑表单状态机：全局只有一个槽位，因此任意时刻最多一个表单处于打开状态
#[derive(Debug, Clone, Default, PartialEq)]
pub enum EditState {
    #[default]
    Closed,
    Open(EditForm),
}

impl EditState {
    pub fn open(&mut self, id: &str, draft: ProductDraft) {
        *self = EditState::Open(EditForm {
            id: id.to_string(),
            draft,
        });
    }

    pub fn close(&mut self) {
        *self = EditState::Closed;
    }

    /// 只关闭属于该 id 的表单
    pub fn close_for(&mut self, id: &str) -> bool {
        if self.is_open_for(id) {
            self.close();
            true
        } else {
            false
        }
    }

    pub fn is_open_for(&self, id: &str) -> bool {
        matches!(self, EditState::Open(form) if form.id == id)
    }

    pub fn form(&self) -> Option<&EditForm> {
        match self {
            EditState::Closed => None,
            EditState::Open(form) => Some(form),
        }
    }
}

/// 新增成功后的短暂提示
#[derive(Debug, Clone)]
pub struct Notice {
    pub message: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoticeView {
    pub message: String,
    pub hide_after_ms: i64,
}

/// 管理后台的一行：商品卡片以及（可能打开的）编辑表单
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminRow {
    pub card: ProductCard,
    pub edit: Option<EditForm>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminPage {
    pub search: String,
    pub rows: Vec<AdminRow>,
    pub empty: bool,
    pub notice: Option<NoticeView>,
    pub alert: Option<String>,
    pub add_form: ProductDraft,
}

/// 表单提交结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted,
    Rejected(DraftError),
}

/// 新增与编辑表单的提交内容，`q` 是提交时搜索框中的文本
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub image: String,
    #[serde(default, rename = "amazonUrl")]
    pub amazon_url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub q: String,
}

impl ProductForm {
    pub fn draft(&self) -> ProductDraft {
        ProductDraft {
            title: self.title.clone(),
            image: self.image.clone(),
            amazon_url: self.amazon_url.clone(),
            description: self.description.clone(),
        }
    }
}

/// 只携带搜索文本的操作表单（编辑、取消、删除）
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RowActionForm {
    #[serde(default)]
    pub q: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opening_second_form_closes_first() {
        let mut state = EditState::default();
        state.open("1", ProductDraft::default());
        assert!(state.is_open_for("1"));

        state.open("2", ProductDraft::default());
        assert!(state.is_open_for("2"));
        assert!(!state.is_open_for("1"));
    }

    #[test]
    fn test_close_for_ignores_other_rows() {
        let mut state = EditState::default();
        state.open("1", ProductDraft::default());

        assert!(!state.close_for("2"));
        assert!(state.is_open_for("1"));

        assert!(state.close_for("1"));
        assert_eq!(state, EditState::Closed);
        assert!(state.form().is_none());
    }
}
