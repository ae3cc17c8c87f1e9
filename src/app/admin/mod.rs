//! 管理后台：商品增删改与行内编辑

pub mod handler;
pub mod model;
pub mod service;

pub use service::AdminService;
