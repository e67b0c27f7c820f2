//! 集成测试共享工具

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use markup5ever_rcdom::RcDom;

use perevod::parsers::html::html_to_dom;
use perevod::translation::providers::{ProviderError, TranslationProvider};
use perevod::translation::{TranslationConfig, TranslationService};

/// 模拟翻译提供方：按注入的闭包回应，并统计调用次数
pub struct MockProvider {
    calls: AtomicUsize,
    responder: Box<dyn Fn(&str) -> Result<String, ProviderError> + Send + Sync>,
}

impl MockProvider {
    pub fn new<F>(responder: F) -> Arc<Self>
    where
        F: Fn(&str) -> Result<String, ProviderError> + Send + Sync + 'static,
    {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            responder: Box::new(responder),
        })
    }

    /// 把文本转大写——占位符和分隔符不含小写字母，天然原样保留
    pub fn uppercase() -> Arc<Self> {
        Self::new(|text| Ok(text.to_uppercase()))
    }

    /// 永远失败的提供方
    pub fn always_failing() -> Arc<Self> {
        Self::new(|_| Err(ProviderError::Network("simulated outage".to_string())))
    }

    /// 吃掉批次分隔符的提供方（模拟提供方折叠分隔符）
    pub fn delimiter_collapsing() -> Arc<Self> {
        Self::new(|text| Ok(text.replace("@@SEG@@", " ").to_uppercase()))
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranslationProvider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn translate(&self, text: &str, _from: &str, _to: &str) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.responder)(text)
    }
}

/// 用模拟提供方构建一个每测试独立的翻译服务
pub fn test_service(provider: Arc<MockProvider>) -> TranslationService {
    let mut config = TranslationConfig::default();
    // 测试不需要真实的限流间隔
    config.min_interval = Duration::from_millis(1);
    let providers: Vec<Arc<dyn TranslationProvider>> = vec![provider];
    TranslationService::with_providers(config, providers).expect("test service should build")
}

/// 解析 HTML 字符串为 DOM
pub fn parse_html(html: &str) -> RcDom {
    html_to_dom(html.as_bytes(), "utf-8".to_string())
}

/// 足够通过提取下限的英文文章页面
pub const ENGLISH_ARTICLE: &str = r#"<html>
<head><title>Sample Article</title></head>
<body>
  <article>
    <h1>Hello World Heading Example</h1>
    <p>This is a test paragraph with more than twenty characters.</p>
    <p>Another paragraph keeps the extracted fragment above the floor.</p>
    <script>var secret = 1;</script>
  </article>
</body>
</html>"#;
