//! 翻译提供方策略
//!
//! 提供方按顺序组成一个策略列表，统一实现 `TranslationProvider`，
//! 追加新的提供方不需要改动客户端的控制流。
//!
//! - `MyMemoryProvider`: 免费层主力，GET + 查询串，响应里带状态码字段
//! - `SelfHostedProvider`: 自托管回退（LibreTranslate 风格），POST + JSON

use async_trait::async_trait;
use thiserror::Error;

use crate::network::fetch::BROWSER_USER_AGENT;

/// 提供方错误
#[derive(Error, Debug)]
pub enum ProviderError {
    /// 请求错误或超时
    #[error("网络错误: {0}")]
    Network(String),

    /// 提供方在载荷里报告了非成功状态
    #[error("提供方返回状态 {0}")]
    BadStatus(i64),

    /// 返回的译文为空
    #[error("提供方返回空译文")]
    Empty,

    /// 响应结构不符合预期
    #[error("无法解析提供方响应: {0}")]
    Malformed(String),
}

/// 翻译提供方的统一接口
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// 提供方名称（用于日志）
    fn name(&self) -> &'static str;

    /// 翻译一段文本
    async fn translate(&self, text: &str, from: &str, to: &str) -> Result<String, ProviderError>;
}

/// MyMemory 风格的免费层提供方
pub struct MyMemoryProvider {
    client: reqwest::Client,
    base_url: String,
}

impl MyMemoryProvider {
    pub fn new(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }
}

#[async_trait]
impl TranslationProvider for MyMemoryProvider {
    fn name(&self) -> &'static str {
        "mymemory"
    }

    async fn translate(&self, text: &str, from: &str, to: &str) -> Result<String, ProviderError> {
        let langpair = format!("{}|{}", from, to);
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("q", text), ("langpair", langpair.as_str())])
            .header(reqwest::header::USER_AGENT, BROWSER_USER_AGENT)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;

        // responseStatus 可能是数字也可能是数字字符串
        let status = payload.get("responseStatus").and_then(|v| {
            v.as_i64()
                .or_else(|| v.as_str().and_then(|s| s.trim().parse().ok()))
        });
        if let Some(code) = status {
            if code != 200 {
                return Err(ProviderError::BadStatus(code));
            }
        }

        let translated = payload
            .pointer("/responseData/translatedText")
            .and_then(|v| v.as_str())
            .unwrap_or("");
        if translated.trim().is_empty() {
            return Err(ProviderError::Empty);
        }
        Ok(translated.to_string())
    }
}

/// 自托管回退提供方（LibreTranslate 风格）
pub struct SelfHostedProvider {
    client: reqwest::Client,
    url: String,
    api_key: Option<String>,
}

impl SelfHostedProvider {
    pub fn new(client: reqwest::Client, url: String, api_key: Option<String>) -> Self {
        Self {
            client,
            url,
            api_key,
        }
    }
}

#[async_trait]
impl TranslationProvider for SelfHostedProvider {
    fn name(&self) -> &'static str {
        "self-hosted"
    }

    async fn translate(&self, text: &str, from: &str, to: &str) -> Result<String, ProviderError> {
        let mut body = serde_json::json!({
            "q": text,
            "source": from,
            "target": to,
            "format": "text",
        });
        if let Some(key) = &self.api_key {
            body["api_key"] = serde_json::Value::String(key.clone());
        }

        let response = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::BadStatus(status.as_u16() as i64));
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;

        let translated = payload
            .get("translatedText")
            .and_then(|v| v.as_str())
            .unwrap_or("");
        if translated.trim().is_empty() {
            return Err(ProviderError::Empty);
        }
        Ok(translated.to_string())
    }
}
