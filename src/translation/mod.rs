//! 翻译模块
//!
//! 提供完整的翻译管道，采用清晰的模块化架构：
//! - **filters**: 文本分类（西里尔字母、英文、类代码片段的启发式判定）
//! - **protect**: 代码令牌保护（翻译前掩码、翻译后还原）
//! - **cache**: 有界 FIFO 翻译缓存
//! - **limiter**: 提供方限流队列（并发上限 + 最小启动间隔）
//! - **providers**: 翻译提供方策略（主力 MyMemory + 可选自托管回退）
//! - **client**: 带重试/回退/降级的单段翻译客户端
//! - **batch**: 批次翻译器（分隔符拼接、计数校验、逐段回退）
//! - **service**: 组合以上全部组件的注入式服务门面

pub mod batch;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod filters;
pub mod limiter;
pub mod protect;
pub mod providers;
pub mod service;

pub use batch::{pack_segments, BatchOutcome, BatchTranslator};
pub use cache::{cache_key, CacheStats, TranslationCache};
pub use client::TranslationClient;
pub use config::{constants, TranslationConfig};
pub use error::{TranslationError, TranslationResult};
pub use filters::{has_cyrillic, looks_codey, looks_english, normalize_segment, TextFilter};
pub use limiter::RateLimiter;
pub use protect::{protect, restore, TokenProtection};
pub use providers::{MyMemoryProvider, ProviderError, SelfHostedProvider, TranslationProvider};
pub use service::{ServiceStats, StatsSnapshot, TranslationService};

/// 判断一段文本是否应该送去翻译（便利函数）
///
/// 使用默认的最小长度阈值。过短、非英文或类代码的文本不翻译。
pub fn should_translate(text: &str) -> bool {
    TextFilter::new(constants::MIN_SEGMENT_CHARS).should_translate(text)
}
