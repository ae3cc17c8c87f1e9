//! 远端商品表格 API 客户端
//!
//! 每次调用最多发起一次请求：不重试，也不附带幂等标识。

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response};
use serde::Deserialize;
use tracing::{debug, info};
use url::Url;

use super::model::{Product, ProductDraft};
use crate::config::CatalogConfig;

/// 客户端错误类型
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("HTTP 客户端创建失败: {0}")]
    Client(reqwest::Error),
    #[error("无效的服务地址: {0}")]
    InvalidBaseUrl(String),
    #[error("请求失败: {0}")]
    Transport(reqwest::Error),
    #[error("远端返回错误状态 {status}: {body}")]
    Status { status: u16, body: String },
    #[error("响应解析失败: {0}")]
    Decode(String),
}

// 列表接口既可能直接返回数组，也可能包一层 `{ "data": [...] }`
#[derive(Deserialize)]
#[serde(untagged)]
enum Listing {
    Rows(Vec<Product>),
    Envelope { data: Vec<Product> },
}

impl Listing {
    fn into_products(self) -> Vec<Product> {
        match self {
            Listing::Rows(rows) => rows,
            Listing::Envelope { data } => data,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CatalogClient {
    base_url: Url,
    client: Client,
}

impl CatalogClient {
    /// 根据配置创建客户端；未配置超时时沿用底层传输的默认行为
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| CatalogError::InvalidBaseUrl(format!("{}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(CatalogError::InvalidBaseUrl(config.base_url.clone()));
        }

        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(CatalogError::Client)?;

        Ok(Self { base_url, client })
    }

    /// 拉取全部商品
    pub async fn fetch_all(&self) -> Result<Vec<Product>, CatalogError> {
        debug!("拉取商品列表: {}", self.base_url);
        let response = self
            .client
            .get(self.base_url.clone())
            .send()
            .await
            .map_err(CatalogError::Transport)?;

        let body = checked_body(response).await?;
        let listing: Listing =
            serde_json::from_str(&body).map_err(|e| CatalogError::Decode(e.to_string()))?;

        let products = listing.into_products();
        debug!("获取到 {} 个商品", products.len());
        Ok(products)
    }

    /// 新增一条商品，请求体是只含一个元素的数组
    pub async fn create(&self, draft: &ProductDraft) -> Result<serde_json::Value, CatalogError> {
        info!("新增商品: {}", draft.title);
        let response = self
            .client
            .post(self.base_url.clone())
            .header(CONTENT_TYPE, "application/json")
            .json(&[draft])
            .send()
            .await
            .map_err(CatalogError::Transport)?;

        let body = checked_body(response).await?;
        if body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_str(&body).map_err(|e| CatalogError::Decode(e.to_string()))
    }

    /// 用四个内容字段整体覆盖指定 id 的记录；id 为空时直接返回
    pub async fn update_by_id(&self, id: &str, draft: &ProductDraft) -> Result<(), CatalogError> {
        if id.is_empty() {
            return Ok(());
        }

        info!("更新商品 {}", id);
        let response = self
            .client
            .patch(self.record_url(id)?)
            .header(CONTENT_TYPE, "application/json")
            .json(draft)
            .send()
            .await
            .map_err(CatalogError::Transport)?;

        checked_body(response).await?;
        Ok(())
    }

    /// 删除指定 id 的记录；id 为空时直接返回
    pub async fn delete_by_id(&self, id: &str) -> Result<(), CatalogError> {
        if id.is_empty() {
            return Ok(());
        }

        info!("删除商品 {}", id);
        let response = self
            .client
            .delete(self.record_url(id)?)
            .send()
            .await
            .map_err(CatalogError::Transport)?;

        checked_body(response).await?;
        Ok(())
    }

    fn record_url(&self, id: &str) -> Result<Url, CatalogError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| CatalogError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push("id")
            .push(id);
        Ok(url)
    }
}

async fn checked_body(response: Response) -> Result<String, CatalogError> {
    let status = response.status();
    let body = response.text().await.map_err(CatalogError::Transport)?;

    if status.is_success() {
        Ok(body)
    } else {
        Err(CatalogError::Status {
            status: status.as_u16(),
            body,
        })
    }
}
