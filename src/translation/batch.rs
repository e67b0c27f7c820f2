//! 批次翻译器
//!
//! 把许多短文本段拼成较大的载荷以摊薄网络往返：掩码代码令牌 →
//! 贪心打包到字符预算内 → 用分隔符拼接 → 单次提交 → 按分隔符拆回。
//! 提供方必须原样回显分隔符；计数不匹配时回退到逐段翻译，
//! 所以输出始终与输入等长、同序。
//!
//! 已知边界情况：分隔符是一个假定不会自然出现在译文里的字面量，
//! 如果提供方恰好返回了它，计数校验会把它当作分隔符丢失处理并
//! 走逐段回退，不会单独上报。

use std::sync::Arc;
use std::time::Instant;

use crate::translation::client::TranslationClient;
use crate::translation::protect::{protect, restore, TokenProtection};

/// 批次内文本段之间的分隔符（独立成行的标记）
pub const SEGMENT_DELIMITER: &str = "\n@@SEG@@\n";

/// 拆分时匹配的标记本体（容忍提供方改动标记两侧的空白）
pub const SEGMENT_MARKER: &str = "@@SEG@@";

/// 批次翻译的结果
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    /// 与输入等长、同序的译文（未翻译的段保持原文）
    pub translated: Vec<String>,
    /// 实际发出的批次调用数
    pub batches_issued: usize,
    /// 是否因为超过时间预算而提前停止
    pub truncated: bool,
}

/// 贪心打包：把文本段分组，使每组拼接后（含分隔符）不超过字符预算
///
/// 返回各组的下标；单独就超预算的段自成一组。按顺序拼接所有组
/// 恰好还原输入序列。
pub fn pack_segments(segments: &[String], budget: usize) -> Vec<Vec<usize>> {
    let delimiter_chars = SEGMENT_DELIMITER.chars().count();
    let mut groups: Vec<Vec<usize>> = Vec::new();
    let mut current: Vec<usize> = Vec::new();
    let mut current_chars = 0usize;

    for (index, segment) in segments.iter().enumerate() {
        let segment_chars = segment.chars().count();
        let added = if current.is_empty() {
            segment_chars
        } else {
            segment_chars + delimiter_chars
        };

        if !current.is_empty() && current_chars + added > budget {
            groups.push(std::mem::take(&mut current));
            current.push(index);
            current_chars = segment_chars;
        } else {
            current.push(index);
            current_chars += added;
        }
    }
    if !current.is_empty() {
        groups.push(current);
    }
    groups
}

/// 批次翻译器
pub struct BatchTranslator {
    client: Arc<TranslationClient>,
    char_budget: usize,
}

impl BatchTranslator {
    pub fn new(client: Arc<TranslationClient>, char_budget: usize) -> Self {
        Self {
            client,
            char_budget,
        }
    }

    /// 翻译一组文本段，返回与输入等长、同序的结果
    ///
    /// 给定 `deadline` 时，到点后不再发出新批次，剩余段保持原文
    /// （优雅降级，而不是撑爆上游请求超时）。在途的调用不会被取消，
    /// 它的结果仍会进缓存供以后复用。
    pub async fn translate_batch(
        &self,
        segments: &[String],
        deadline: Option<Instant>,
    ) -> BatchOutcome {
        if segments.is_empty() {
            return BatchOutcome {
                translated: Vec::new(),
                batches_issued: 0,
                truncated: false,
            };
        }

        let protections: Vec<TokenProtection> =
            segments.iter().map(|s| protect(s)).collect();
        let masked: Vec<String> = protections.iter().map(|p| p.masked.clone()).collect();

        let groups = pack_segments(&masked, self.char_budget);
        let mut results: Vec<Option<String>> = vec![None; segments.len()];
        let mut batches_issued = 0;
        let mut truncated = false;

        for group in groups {
            if let Some(deadline) = deadline {
                if Instant::now() >= deadline {
                    truncated = true;
                    break;
                }
            }

            let joined = group
                .iter()
                .map(|&i| masked[i].as_str())
                .collect::<Vec<_>>()
                .join(SEGMENT_DELIMITER);
            let translated_joined = self.client.translate_short(&joined).await;
            batches_issued += 1;

            let parts: Vec<String> = translated_joined
                .split(SEGMENT_MARKER)
                .map(|part| part.trim().to_string())
                .collect();

            if parts.len() == group.len() {
                for (&slot, part) in group.iter().zip(parts) {
                    results[slot] = Some(part);
                }
            } else {
                // 提供方折叠或改写了分隔符，退化为逐段翻译
                tracing::debug!(
                    expected = group.len(),
                    received = parts.len(),
                    "批次分段计数不匹配，回退到逐段翻译"
                );
                for &index in &group {
                    results[index] = Some(self.client.translate_short(&masked[index]).await);
                }
            }
        }

        let translated = results
            .into_iter()
            .enumerate()
            .map(|(index, slot)| match slot {
                Some(text) => restore(&text, &protections[index].replacements),
                None => segments[index].clone(),
            })
            .collect();

        BatchOutcome {
            translated,
            batches_issued,
            truncated,
        }
    }
}
