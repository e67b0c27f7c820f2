//! # 工具模块
//!
//! URL 处理和解析工具。

pub mod url;

// Re-export commonly used items for convenience
pub use url::{absolutize, is_http_url};
