//! 翻译配置
//!
//! 管道的所有启发式阈值都集中在 `constants` 中作为文档化常量，
//! 运行时可调的部分通过 `TranslationConfig` 从环境变量加载。

use std::time::Duration;

use crate::env::{translation as env_translation, EnvVar};

/// 管道常量
///
/// 这些阈值是从线上行为校准出来的经验值，属于尽力而为的过滤器，
/// 不是精确保证。调整时保持相邻组件的预算一致（批次预算必须
/// 明显小于提供方的请求长度上限）。
pub mod constants {
    /// 翻译缓存容量（条目数），FIFO 淘汰
    pub const CACHE_CAPACITY: usize = 3000;

    /// 同时在途的提供方请求上限
    pub const PROVIDER_CONCURRENCY: usize = 2;

    /// 任意两次提供方请求启动之间的最小间隔
    pub const PROVIDER_MIN_INTERVAL_MS: u64 = 150;

    /// 单次提供方 HTTP 请求超时
    pub const PROVIDER_TIMEOUT_SECS: u64 = 15;

    /// 每个提供方的最大尝试次数
    pub const PROVIDER_ATTEMPTS: usize = 3;

    /// 各次失败后的退避延迟（毫秒）
    pub const RETRY_BACKOFF_MS: [u64; 3] = [300, 800, 1500];

    /// 退避延迟上叠加的随机抖动上限（毫秒）
    pub const RETRY_JITTER_MS: u64 = 250;

    /// 批次拼接后的字符预算（含分隔符）
    pub const BATCH_CHAR_BUDGET: usize = 1700;

    /// 送翻译的文本段最小字符数（速度/噪声过滤）
    pub const MIN_SEGMENT_CHARS: usize = 20;

    /// 单个页面送翻译的去重文本段上限
    pub const MAX_SEGMENTS_PER_PAGE: usize = 170;

    /// 单次 translate-url 请求的翻译阶段时间预算（秒）
    pub const TRANSLATE_BUDGET_SECS: u64 = 12;

    /// 长文本路径的分块大小（字符）
    pub const LONG_TEXT_CHUNK_CHARS: usize = 480;

    /// 分块时回退到空格边界的最小位置
    pub const LONG_TEXT_SOFT_FLOOR: usize = 220;

    /// 提取：非百科站点的元素数上限
    pub const MAX_ELEMENTS: usize = 650;

    /// 提取：非百科站点的累计文本字符预算
    pub const MAX_TEXT_CHARS: usize = 150_000;

    /// 提取：百科类站点（维基百科）的元素数上限
    pub const WIKI_MAX_ELEMENTS: usize = 350;

    /// 提取：百科类站点的累计文本字符预算
    pub const WIKI_MAX_TEXT_CHARS: usize = 60_000;

    /// 提取：div 的最小正文长度（过滤菜单碎片）
    pub const MIN_DIV_TEXT_CHARS: usize = 25;

    /// 提取结果序列化后的最小合理长度，低于即判定提取失败
    pub const MIN_FRAGMENT_HTML_CHARS: usize = 120;
}

/// 翻译配置
#[derive(Debug, Clone)]
pub struct TranslationConfig {
    /// 源语言（ISO 639-1）
    pub source_lang: String,
    /// 目标语言（ISO 639-1）
    pub target_lang: String,
    /// 主力提供方（MyMemory 风格 GET 接口）地址
    pub mymemory_url: String,
    /// 可选的自托管回退提供方（LibreTranslate 风格 POST 接口）地址
    pub fallback_url: Option<String>,
    /// 回退提供方的 API key（如果它需要）
    pub fallback_api_key: Option<String>,
    /// 缓存容量
    pub cache_capacity: usize,
    /// 并发上限
    pub concurrency: usize,
    /// 最小请求启动间隔
    pub min_interval: Duration,
    /// 提供方请求超时
    pub request_timeout: Duration,
    /// 批次字符预算
    pub batch_char_budget: usize,
    /// 单页去重文本段上限
    pub max_segments: usize,
    /// 文本段最小字符数
    pub min_segment_chars: usize,
    /// 翻译阶段时间预算
    pub translate_budget: Duration,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            source_lang: "en".to_string(),
            target_lang: "ru".to_string(),
            mymemory_url: "https://api.mymemory.translated.net/get".to_string(),
            fallback_url: None,
            fallback_api_key: None,
            cache_capacity: constants::CACHE_CAPACITY,
            concurrency: constants::PROVIDER_CONCURRENCY,
            min_interval: Duration::from_millis(constants::PROVIDER_MIN_INTERVAL_MS),
            request_timeout: Duration::from_secs(constants::PROVIDER_TIMEOUT_SECS),
            batch_char_budget: constants::BATCH_CHAR_BUDGET,
            max_segments: constants::MAX_SEGMENTS_PER_PAGE,
            min_segment_chars: constants::MIN_SEGMENT_CHARS,
            translate_budget: Duration::from_secs(constants::TRANSLATE_BUDGET_SECS),
        }
    }
}

impl TranslationConfig {
    /// 从环境变量加载配置，未设置的项使用默认值
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(lang) = env_translation::SourceLang::get() {
            config.source_lang = lang;
        }
        if let Ok(lang) = env_translation::TargetLang::get() {
            config.target_lang = lang;
        }
        if let Ok(url) = env_translation::MyMemoryUrl::get() {
            config.mymemory_url = url;
        }
        config.fallback_url = env_translation::FallbackUrl::get_opt();
        config.fallback_api_key = env_translation::FallbackApiKey::get_opt();

        config
    }
}
