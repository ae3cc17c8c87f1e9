//! 商品数据模型

use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

/// Amazon 链接必须使用的前缀
pub const AMAZON_URL_PREFIX: &str = "https://www.amazon";

/// 远端表格中的一条商品记录
///
/// `id` 由远端分配，创建前不存在。内容字段缺失或为 `null` 时按空字符串处理。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub image: String,
    #[serde(default, rename = "amazonUrl", deserialize_with = "deserialize_text")]
    pub amazon_url: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub description: String,
}

impl Product {
    /// 记录 id，未分配时为空字符串
    pub fn id_str(&self) -> &str {
        self.id.as_deref().unwrap_or("")
    }

    /// 取出四个内容字段作为表单草稿
    pub fn to_draft(&self) -> ProductDraft {
        ProductDraft {
            title: self.title.clone(),
            image: self.image.clone(),
            amazon_url: self.amazon_url.clone(),
            description: self.description.clone(),
        }
    }
}

/// 新增与修改时提交的四个内容字段
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct ProductDraft {
    #[serde(default)]
    #[validate(length(min = 1, message = "Please fill all fields!"))]
    pub title: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Please fill all fields!"))]
    pub image: String,

    #[serde(default, rename = "amazonUrl")]
    #[validate(
        length(min = 1, message = "Please fill all fields!"),
        custom(function = "validate_amazon_url")
    )]
    pub amazon_url: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Please fill all fields!"))]
    pub description: String,
}

/// 表单校验失败的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    #[error("Please fill all fields!")]
    MissingField,
    #[error("Amazon URL must start with https://www.amazon")]
    AmazonUrlPrefix,
}

impl ProductDraft {
    /// 去掉四个字段两端的空白
    pub fn trimmed(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            image: self.image.trim().to_string(),
            amazon_url: self.amazon_url.trim().to_string(),
            description: self.description.trim().to_string(),
        }
    }

    /// 提交前校验：先检查空字段，再检查 Amazon 链接前缀
    pub fn check(&self) -> Result<(), DraftError> {
        match self.validate() {
            Ok(()) => Ok(()),
            Err(errors) => Err(classify(&errors)),
        }
    }
}

fn classify(errors: &ValidationErrors) -> DraftError {
    let missing = errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .any(|e| e.code == "length");

    if missing {
        DraftError::MissingField
    } else {
        DraftError::AmazonUrlPrefix
    }
}

fn validate_amazon_url(url: &str) -> Result<(), ValidationError> {
    if url.starts_with(AMAZON_URL_PREFIX) {
        Ok(())
    } else {
        Err(ValidationError::new("amazon_url_prefix"))
    }
}

// 表格服务的 id 通常是字符串，这里同时兼容数字
fn deserialize_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) if !s.is_empty() => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => s,
        Some(serde_json::Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    })
}
