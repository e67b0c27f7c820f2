//! 页面与图片抓取
//!
//! 用拟真的浏览器 User-Agent 和 Accept-Language 抓取，很多站点会按
//! 客户端特征返回不同内容。响应体有大小上限，超限按抓取失败处理。

use std::time::Duration;

use reqwest::header;
use url::Url;

use crate::core::PerevodError;

/// 拟真浏览器 UA
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

/// 页面请求的 Accept 头
pub const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// 页面请求的 Accept-Language 头
pub const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9,ru;q=0.8";

/// 页面响应体上限
pub const MAX_PAGE_BYTES: usize = 7 * 1024 * 1024;

/// 图片响应体上限
pub const MAX_IMAGE_BYTES: usize = 4 * 1024 * 1024;

/// 页面/图片抓取超时（秒）
pub const FETCH_TIMEOUT_SECS: u64 = 20;

/// 抓取到的页面
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// 原始响应字节
    pub bytes: Vec<u8>,
    /// Content-Type 里声明的字符集（如果有）
    pub charset: Option<String>,
    /// 跟随重定向后的最终地址
    pub final_url: Url,
}

/// 构建出站 HTTP 客户端
pub fn build_http_client() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
        .build()
}

/// 抓取一个页面
pub async fn fetch_page(client: &reqwest::Client, url: &Url) -> Result<FetchedPage, PerevodError> {
    let response = client
        .get(url.clone())
        .header(header::USER_AGENT, BROWSER_USER_AGENT)
        .header(header::ACCEPT, ACCEPT_HTML)
        .header(header::ACCEPT_LANGUAGE, ACCEPT_LANGUAGE)
        .send()
        .await
        .map_err(|e| PerevodError::Fetch(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(PerevodError::Fetch(format!("HTTP {}", status.as_u16())));
    }
    if let Some(length) = response.content_length() {
        if length as usize > MAX_PAGE_BYTES {
            return Err(PerevodError::Fetch(format!("响应体过大: {} 字节", length)));
        }
    }

    let charset = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_charset);
    let final_url = response.url().clone();

    let bytes = response
        .bytes()
        .await
        .map_err(|e| PerevodError::Fetch(e.to_string()))?;
    if bytes.len() > MAX_PAGE_BYTES {
        return Err(PerevodError::Fetch(format!(
            "响应体过大: {} 字节",
            bytes.len()
        )));
    }

    Ok(FetchedPage {
        bytes: bytes.to_vec(),
        charset,
        final_url,
    })
}

/// 抓取一张图片，返回（字节, Content-Type）
pub async fn fetch_image(
    client: &reqwest::Client,
    url: &Url,
) -> Result<(Vec<u8>, String), PerevodError> {
    let response = client
        .get(url.clone())
        .header(header::USER_AGENT, BROWSER_USER_AGENT)
        .send()
        .await
        .map_err(|e| PerevodError::Fetch(e.to_string()))?;

    if !response.status().is_success() {
        return Err(PerevodError::Fetch(format!(
            "HTTP {}",
            response.status().as_u16()
        )));
    }
    if let Some(length) = response.content_length() {
        if length as usize > MAX_IMAGE_BYTES {
            return Err(PerevodError::Fetch(format!("图片过大: {} 字节", length)));
        }
    }

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("image/jpeg")
        .to_string();

    let bytes = response
        .bytes()
        .await
        .map_err(|e| PerevodError::Fetch(e.to_string()))?;
    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(PerevodError::Fetch(format!(
            "图片过大: {} 字节",
            bytes.len()
        )));
    }

    Ok((bytes.to_vec(), content_type))
}

/// 从 Content-Type 头里解析 charset
fn parse_charset(content_type: &str) -> Option<String> {
    content_type
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("charset="))
        .map(|cs| cs.trim_matches('"').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_charset() {
        assert_eq!(
            parse_charset("text/html; charset=utf-8"),
            Some("utf-8".to_string())
        );
        assert_eq!(
            parse_charset("text/html; charset=\"windows-1251\""),
            Some("windows-1251".to_string())
        );
        assert_eq!(parse_charset("text/html"), None);
    }
}
