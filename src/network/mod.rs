//! # 网络模块
//!
//! 出站 HTTP：页面抓取与图片代理抓取。

pub mod fetch;

// Re-export commonly used items for convenience
pub use fetch::{build_http_client, fetch_image, fetch_page, FetchedPage, BROWSER_USER_AGENT};
