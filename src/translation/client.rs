//! 翻译客户端
//!
//! 单段翻译的入口：缓存 → 主力提供方（带退避重试）→ 回退提供方 →
//! 降级返回原文。翻译是尽力而为的：这里的失败永远不会向上抛出，
//! 未翻译的文本是可接受的降级结果，坏掉的页面不是。

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;

use crate::translation::cache::{cache_key, TranslationCache};
use crate::translation::config::constants;
use crate::translation::limiter::RateLimiter;
use crate::translation::providers::TranslationProvider;

/// 翻译客户端
pub struct TranslationClient {
    providers: Vec<Arc<dyn TranslationProvider>>,
    limiter: Arc<RateLimiter>,
    cache: Arc<TranslationCache>,
    source_lang: String,
    target_lang: String,
}

impl TranslationClient {
    pub fn new(
        providers: Vec<Arc<dyn TranslationProvider>>,
        limiter: Arc<RateLimiter>,
        cache: Arc<TranslationCache>,
        source_lang: String,
        target_lang: String,
    ) -> Self {
        Self {
            providers,
            limiter,
            cache,
            source_lang,
            target_lang,
        }
    }

    /// 翻译一段短文本（默认语言对），失败时返回原文
    pub async fn translate_short(&self, text: &str) -> String {
        let (from, to) = (self.source_lang.clone(), self.target_lang.clone());
        self.translate_with(text, &from, &to).await
    }

    /// 翻译一段短文本（指定语言对），失败时返回原文
    ///
    /// 空输入直接返回空串，不发请求也不触碰缓存。
    /// 无论成功与否，结果（译文或原文）都会在返回前写入缓存。
    pub async fn translate_with(&self, text: &str, from: &str, to: &str) -> String {
        let clean = text.trim();
        if clean.is_empty() {
            return String::new();
        }

        let key = cache_key(from, to, clean);
        if let Some(cached) = self.cache.get(&key) {
            return cached;
        }

        for (provider_index, provider) in self.providers.iter().enumerate() {
            for attempt in 0..constants::PROVIDER_ATTEMPTS {
                let outcome = self
                    .limiter
                    .run(provider.translate(clean, from, to))
                    .await;
                match outcome {
                    Ok(translated) => {
                        self.cache.put(key, translated.clone());
                        return translated;
                    }
                    Err(err) => {
                        tracing::debug!(
                            provider = provider.name(),
                            attempt,
                            error = %err,
                            "翻译请求失败"
                        );
                        let last_overall = provider_index == self.providers.len() - 1
                            && attempt == constants::PROVIDER_ATTEMPTS - 1;
                        if !last_overall {
                            tokio::time::sleep(backoff_delay(attempt)).await;
                        }
                    }
                }
            }
        }

        tracing::warn!(chars = clean.chars().count(), "所有翻译提供方均失败，返回原文");
        self.cache.put(key, clean.to_string());
        clean.to_string()
    }
}

/// 第 `attempt` 次失败后的退避延迟（递增基数 + 随机抖动）
fn backoff_delay(attempt: usize) -> Duration {
    let base = constants::RETRY_BACKOFF_MS
        [attempt.min(constants::RETRY_BACKOFF_MS.len() - 1)];
    let jitter = rand::thread_rng().gen_range(0..=constants::RETRY_JITTER_MS);
    Duration::from_millis(base + jitter)
}

/// 把长文本切成不超过 `max_chars` 的块，尽量在空格处断开
///
/// 仅当最后一个空格足够靠后（超过软下限）时才回退到空格边界，
/// 避免产生过碎的块。
pub fn split_long_text(text: &str, max_chars: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_chars {
        return vec![text.to_string()];
    }

    let mut parts = Vec::new();
    let mut start = 0;
    while start < chars.len() {
        let mut end = (start + max_chars).min(chars.len());
        if end < chars.len() {
            let last_space = (start..end).rev().find(|&i| chars[i] == ' ');
            if let Some(space) = last_space {
                if space - start > constants::LONG_TEXT_SOFT_FLOOR {
                    end = space;
                }
            }
        }
        parts.push(chars[start..end].iter().collect());
        start = end;
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_short_text_untouched() {
        let parts = split_long_text("hello world", 480);
        assert_eq!(parts, vec!["hello world".to_string()]);
    }

    #[test]
    fn test_split_respects_max_and_reconstructs() {
        let word = "word ";
        let text = word.repeat(200); // 1000 字符
        let parts = split_long_text(&text, 480);
        assert!(parts.len() >= 2);
        for part in &parts {
            assert!(part.chars().count() <= 480);
        }
        assert_eq!(parts.concat(), text);
    }

    #[test]
    fn test_split_prefers_space_boundary() {
        let text = format!("{} {}", "a".repeat(300), "b".repeat(300));
        let parts = split_long_text(&text, 480);
        // 空格在软下限之后，应该在空格处断开
        assert_eq!(parts[0].chars().count(), 300);
    }
}
