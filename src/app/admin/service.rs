//! 管理后台服务：商品增删改与行内编辑表单状态

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{Duration, Utc};
use tracing::{debug, info, warn};

use super::model::{AdminPage, AdminRow, EditState, Notice, NoticeView, SubmitOutcome};
use crate::app::storefront::model::ProductCard;
use crate::catalog::{filter_products, CatalogClient, ProductDraft};
use crate::core::error::CoreError;

pub const ADD_SUCCESS_MESSAGE: &str = "Product added successfully!";

pub struct AdminService {
    client: CatalogClient,
    edit: Mutex<EditState>,
    notice: Mutex<Option<Notice>>,
    notice_duration: Duration,
}

impl AdminService {
    pub fn new(client: CatalogClient, notice_seconds: u64) -> Result<Self, CoreError> {
        let notice_duration = i64::try_from(notice_seconds)
            .ok()
            .and_then(Duration::try_seconds)
            .ok_or_else(|| {
                CoreError::InternalServerError(format!("无效的提示显示时长: {}秒", notice_seconds))
            })?;

        Ok(Self {
            client,
            edit: Mutex::new(EditState::Closed),
            notice: Mutex::new(None),
            notice_duration,
        })
    }

    fn edit_state(&self) -> MutexGuard<'_, EditState> {
        self.edit.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn notice_slot(&self) -> MutexGuard<'_, Option<Notice>> {
        self.notice.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// 当前编辑状态的快照
    pub fn edit_snapshot(&self) -> EditState {
        self.edit_state().clone()
    }

    /// 拉取、过滤并生成管理页面
    ///
    /// 打开的编辑表单对应的记录已不存在时，顺带关闭该表单。
    pub async fn render(&self, search_term: &str) -> Result<AdminPage, CoreError> {
        let products = self.client.fetch_all().await?;
        let filtered = filter_products(&products, search_term);

        let open_form = {
            let mut state = self.edit_state();
            let vanished = state
                .form()
                .map(|form| form.id.clone())
                .filter(|id| !products.iter().any(|p| p.id_str() == id.as_str()));
            if let Some(id) = vanished {
                debug!("编辑中的商品 {} 已不存在，关闭表单", id);
                state.close();
            }
            state.form().cloned()
        };

        let rows: Vec<AdminRow> = filtered
            .into_iter()
            .map(|product| AdminRow {
                card: ProductCard::from(product),
                edit: open_form
                    .as_ref()
                    .filter(|form| !form.id.is_empty() && form.id == product.id_str())
                    .cloned(),
            })
            .collect();

        Ok(AdminPage {
            search: search_term.to_string(),
            empty: rows.is_empty(),
            rows,
            notice: self.current_notice(),
            alert: None,
            add_form: ProductDraft::default(),
        })
    }

    /// 打开某一行的编辑表单，并用最新的字段值填充；其它行的表单随之关闭
    pub async fn show_edit_form(&self, id: &str) -> Result<(), CoreError> {
        let products = self.client.fetch_all().await?;
        let product = products
            .iter()
            .find(|p| !id.is_empty() && p.id_str() == id)
            .ok_or_else(|| CoreError::NotFound(format!("商品 {} 不存在", id)))?;

        self.edit_state().open(id, product.to_draft());
        debug!("打开商品 {} 的编辑表单", id);
        Ok(())
    }

    /// 提交编辑表单
    ///
    /// 校验失败时表单保持打开并保留输入内容，不发起任何请求。
    pub async fn submit_edit_form(
        &self,
        id: &str,
        draft: ProductDraft,
    ) -> Result<SubmitOutcome, CoreError> {
        let cleaned = draft.clone().trimmed();
        if let Err(reason) = cleaned.check() {
            info!("商品 {} 的修改未通过校验: {}", id, reason);
            self.edit_state().open(id, draft);
            return Ok(SubmitOutcome::Rejected(reason));
        }

        self.client.update_by_id(id, &cleaned).await?;
        self.edit_state().close_for(id);
        Ok(SubmitOutcome::Accepted)
    }

    /// 关闭编辑表单，不发起任何请求
    pub fn cancel_edit(&self, id: &str) {
        if self.edit_state().close_for(id) {
            debug!("取消商品 {} 的编辑", id);
        }
    }

    /// 新增商品，成功后显示短暂提示
    pub async fn add_product(&self, draft: ProductDraft) -> Result<SubmitOutcome, CoreError> {
        let cleaned = draft.trimmed();
        if let Err(reason) = cleaned.check() {
            info!("新增商品未通过校验: {}", reason);
            return Ok(SubmitOutcome::Rejected(reason));
        }

        self.client.create(&cleaned).await?;

        // 商品已写入远端，提示时间溢出时只放弃提示
        match Utc::now().checked_add_signed(self.notice_duration) {
            Some(expires_at) => {
                *self.notice_slot() = Some(Notice {
                    message: ADD_SUCCESS_MESSAGE.to_string(),
                    expires_at,
                });
            }
            None => warn!("提示过期时间超出范围，跳过新增成功提示"),
        }
        Ok(SubmitOutcome::Accepted)
    }

    /// 删除商品；id 为空时什么也不做
    pub async fn delete_product(&self, id: &str) -> Result<(), CoreError> {
        if id.is_empty() {
            return Ok(());
        }
        self.client.delete_by_id(id).await?;
        Ok(())
    }

    fn current_notice(&self) -> Option<NoticeView> {
        let mut slot = self.notice_slot();
        let now = Utc::now();
        match slot.as_ref() {
            Some(notice) if notice.expires_at > now => Some(NoticeView {
                message: notice.message.clone(),
                hide_after_ms: (notice.expires_at - now).num_milliseconds(),
            }),
            Some(_) => {
                *slot = None;
                None
            }
            None => None,
        }
    }
}
