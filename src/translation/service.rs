//! 翻译服务门面
//!
//! 显式构造、随处注入的服务对象：拥有缓存、限流器、提供方客户端和
//! 批次翻译器，生命周期与进程绑定。测试可以用 `with_providers`
//! 注入模拟提供方，每个测试一个全新实例。

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::translation::batch::{BatchOutcome, BatchTranslator};
use crate::translation::cache::TranslationCache;
use crate::translation::client::{split_long_text, TranslationClient};
use crate::translation::config::{constants, TranslationConfig};
use crate::translation::error::{TranslationError, TranslationResult};
use crate::translation::filters::{looks_english, TextFilter};
use crate::translation::limiter::RateLimiter;
use crate::translation::protect::{protect, restore};
use crate::translation::providers::{
    MyMemoryProvider, SelfHostedProvider, TranslationProvider,
};

/// 服务统计信息（原子计数，无锁读写）
#[derive(Debug, Default)]
pub struct ServiceStats {
    segments_requested: AtomicU64,
    batches_issued: AtomicU64,
    deadline_truncations: AtomicU64,
}

/// 统计信息快照
#[derive(Debug, Clone)]
pub struct StatsSnapshot {
    pub segments_requested: u64,
    pub batches_issued: u64,
    pub deadline_truncations: u64,
}

/// 翻译服务
pub struct TranslationService {
    config: TranslationConfig,
    cache: Arc<TranslationCache>,
    client: Arc<TranslationClient>,
    batcher: BatchTranslator,
    filter: TextFilter,
    stats: ServiceStats,
}

impl TranslationService {
    /// 用真实提供方创建翻译服务
    ///
    /// 主力提供方总是存在；只有配置了回退地址时才构造回退提供方。
    pub fn new(config: TranslationConfig) -> TranslationResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| TranslationError::ConfigError(format!("HTTP客户端创建失败: {}", e)))?;

        let mut providers: Vec<Arc<dyn TranslationProvider>> = vec![Arc::new(
            MyMemoryProvider::new(http.clone(), config.mymemory_url.clone()),
        )];
        if let Some(url) = &config.fallback_url {
            providers.push(Arc::new(SelfHostedProvider::new(
                http.clone(),
                url.clone(),
                config.fallback_api_key.clone(),
            )));
        }

        Self::with_providers(config, providers)
    }

    /// 用注入的提供方创建翻译服务（测试入口）
    pub fn with_providers(
        config: TranslationConfig,
        providers: Vec<Arc<dyn TranslationProvider>>,
    ) -> TranslationResult<Self> {
        if providers.is_empty() {
            return Err(TranslationError::ConfigError(
                "至少需要一个翻译提供方".to_string(),
            ));
        }

        let cache = Arc::new(TranslationCache::new(config.cache_capacity));
        let limiter = Arc::new(RateLimiter::new(config.concurrency, config.min_interval));
        let client = Arc::new(TranslationClient::new(
            providers,
            limiter,
            cache.clone(),
            config.source_lang.clone(),
            config.target_lang.clone(),
        ));
        let batcher = BatchTranslator::new(client.clone(), config.batch_char_budget);
        let filter = TextFilter::new(config.min_segment_chars);

        Ok(Self {
            config,
            cache,
            client,
            batcher,
            filter,
            stats: ServiceStats::default(),
        })
    }

    pub fn config(&self) -> &TranslationConfig {
        &self.config
    }

    pub fn filter(&self) -> &TextFilter {
        &self.filter
    }

    pub fn cache(&self) -> &TranslationCache {
        &self.cache
    }

    pub fn client(&self) -> &TranslationClient {
        &self.client
    }

    /// 翻译单个文本段（带令牌保护的单段路径）
    pub async fn translate_segment(&self, text: &str) -> String {
        let clean = text.trim();
        if clean.is_empty() {
            return String::new();
        }
        let protection = protect(clean);
        let translated = self.client.translate_short(&protection.masked).await;
        restore(&translated, &protection.replacements)
    }

    /// 只在文本看起来是英文时翻译，否则原样返回
    ///
    /// 用于标题、天气描述这类可能已经是目标语言的字段。
    pub async fn translate_if_english(&self, text: &str) -> String {
        let clean = text.trim();
        if !looks_english(clean) {
            return clean.to_string();
        }
        self.translate_segment(clean).await
    }

    /// 翻译任意长度的文本（/api/translate-text 路径）
    ///
    /// 整体做令牌保护，过长的掩码文本按空格边界分块后逐块翻译。
    pub async fn translate_text(
        &self,
        text: &str,
        from: Option<&str>,
        to: Option<&str>,
    ) -> String {
        let clean = text.trim();
        if clean.is_empty() {
            return String::new();
        }
        let from = from.unwrap_or(self.config.source_lang.as_str());
        let to = to.unwrap_or(self.config.target_lang.as_str());

        let protection = protect(clean);
        let chunks = split_long_text(&protection.masked, constants::LONG_TEXT_CHUNK_CHARS);
        let mut translated_chunks = Vec::with_capacity(chunks.len());
        for chunk in chunks {
            translated_chunks.push(self.client.translate_with(&chunk, from, to).await);
        }
        restore(&translated_chunks.join(" "), &protection.replacements)
    }

    /// 在可选的时间预算内批量翻译文本段
    pub async fn translate_segments(
        &self,
        segments: &[String],
        deadline: Option<Instant>,
    ) -> BatchOutcome {
        self.stats
            .segments_requested
            .fetch_add(segments.len() as u64, Ordering::Relaxed);

        let outcome = self.batcher.translate_batch(segments, deadline).await;

        self.stats
            .batches_issued
            .fetch_add(outcome.batches_issued as u64, Ordering::Relaxed);
        if outcome.truncated {
            self.stats
                .deadline_truncations
                .fetch_add(1, Ordering::Relaxed);
        }
        outcome
    }

    /// 获取统计信息快照
    pub fn stats_snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            segments_requested: self.stats.segments_requested.load(Ordering::Relaxed),
            batches_issued: self.stats.batches_issued.load(Ordering::Relaxed),
            deadline_truncations: self.stats.deadline_truncations.load(Ordering::Relaxed),
        }
    }
}
