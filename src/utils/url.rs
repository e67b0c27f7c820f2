//! URL 工具函数

use url::Url;

/// 把相对地址解析为绝对地址
///
/// `data:` URL 原样保留；空串返回 None；解析失败返回 None。
pub fn absolutize(base: &Url, src: &str) -> Option<String> {
    let trimmed = src.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.starts_with("data:") {
        return Some(trimmed.to_string());
    }
    base.join(trimmed).ok().map(|u| u.to_string())
}

/// 判断字符串是否是 http(s) 地址
pub fn is_http_url(value: &str) -> bool {
    let lower = value.trim().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}
