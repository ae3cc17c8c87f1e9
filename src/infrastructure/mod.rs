//! 基础设施层

pub mod logger;
pub mod templates;

pub use logger::Logger;
pub use templates::Templates;
