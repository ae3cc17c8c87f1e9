//! 管理后台处理器

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use minijinja::context;
use tracing::info;

use super::model::{AdminPage, ProductForm, RowActionForm, SubmitOutcome};
use crate::app::{AppState, SearchQuery};
use crate::core::error::CoreError;

/// 回到管理页面并保留搜索词
fn admin_location(search: &str, anchor: Option<&str>) -> String {
    let mut location = "/admin".to_string();
    if !search.is_empty() {
        let encoded: String = url::form_urlencoded::byte_serialize(search.as_bytes()).collect();
        location.push_str("?q=");
        location.push_str(&encoded);
    }
    if let Some(id) = anchor {
        let encoded: String = url::form_urlencoded::byte_serialize(id.as_bytes()).collect();
        location.push_str("#product-");
        location.push_str(&encoded);
    }
    location
}

fn render_page(state: &AppState, page: &AdminPage) -> Result<Html<String>, CoreError> {
    let html = state.templates.render(
        "admin.html",
        context! {
            search => &page.search,
            rows => &page.rows,
            empty => page.empty,
            notice => &page.notice,
            alert => &page.alert,
            add_form => &page.add_form,
        },
    )?;
    Ok(Html(html))
}

/// 管理页面
pub async fn admin_page(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Html<String>, CoreError> {
    let page = state.admin.render(&query.q).await?;
    render_page(&state, &page)
}

/// 新增商品
pub async fn add_product(
    State(state): State<AppState>,
    Form(form): Form<ProductForm>,
) -> Result<Response, CoreError> {
    match state.admin.add_product(form.draft()).await? {
        SubmitOutcome::Accepted => {
            info!("商品新增成功: {}", form.title.trim());
            Ok(Redirect::to("/admin").into_response())
        }
        SubmitOutcome::Rejected(reason) => {
            let mut page = state.admin.render(&form.q).await?;
            page.alert = Some(reason.to_string());
            page.add_form = form.draft();
            Ok((StatusCode::UNPROCESSABLE_ENTITY, render_page(&state, &page)?).into_response())
        }
    }
}

/// 打开编辑表单
pub async fn show_edit_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<RowActionForm>,
) -> Result<Redirect, CoreError> {
    state.admin.show_edit_form(&id).await?;
    Ok(Redirect::to(&admin_location(&form.q, Some(&id))))
}

/// 保存编辑表单
pub async fn submit_edit_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<ProductForm>,
) -> Result<Response, CoreError> {
    match state.admin.submit_edit_form(&id, form.draft()).await? {
        SubmitOutcome::Accepted => {
            info!("商品 {} 修改成功", id);
            Ok(Redirect::to(&admin_location(&form.q, None)).into_response())
        }
        SubmitOutcome::Rejected(reason) => {
            let mut page = state.admin.render(&form.q).await?;
            page.alert = Some(reason.to_string());
            Ok((StatusCode::UNPROCESSABLE_ENTITY, render_page(&state, &page)?).into_response())
        }
    }
}

/// 取消编辑
pub async fn cancel_edit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<RowActionForm>,
) -> Redirect {
    state.admin.cancel_edit(&id);
    Redirect::to(&admin_location(&form.q, None))
}

/// 删除商品
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<RowActionForm>,
) -> Result<Redirect, CoreError> {
    state.admin.delete_product(&id).await?;
    info!("商品 {} 已删除", id);
    Ok(Redirect::to(&admin_location(&form.q, None)))
}
