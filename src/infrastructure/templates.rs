//! HTML 模板
//!
//! 模板在编译期嵌入；`.html` 模板默认开启 HTML 转义。

use minijinja::{Environment, Value};

use crate::core::error::CoreError;

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../../templates/base.html")),
    ("storefront.html", include_str!("../../templates/storefront.html")),
    ("admin.html", include_str!("../../templates/admin.html")),
];

#[derive(Debug)]
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub fn new() -> Result<Self, CoreError> {
        let mut env = Environment::new();
        for &(name, source) in TEMPLATES {
            env.add_template(name, source).map_err(|e| {
                CoreError::Template(format!("注册模板 '{}' 失败: {}", name, e))
            })?;
        }
        Ok(Self { env })
    }

    pub fn render(&self, name: &str, ctx: Value) -> Result<String, CoreError> {
        let template = self
            .env
            .get_template(name)
            .map_err(|e| CoreError::Template(format!("加载模板 '{}' 失败: {}", name, e)))?;

        template
            .render(ctx)
            .map_err(|e| CoreError::Template(format!("渲染模板 '{}' 失败: {}", name, e)))
    }
}
