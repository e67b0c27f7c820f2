//! DOM 文本节点翻译器
//!
//! 在提取出的片段上就地翻译：改写图片地址走图片代理，收集并去重
//! 可翻译文本段，在时间预算内分批翻译，然后把译文写回原来的
//! 文本节点位置（精确保留首尾空白）。
//!
//! 文本节点先收集成一份独立快照再统一写回，不在活动树遍历中途
//! 变更节点，避免迭代器失效问题。

use std::collections::{HashMap, HashSet};
use std::time::Instant;

use markup5ever_rcdom::{Handle, NodeData};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::Serialize;
use url::Url;

use super::dom::{get_node_attr, get_node_name, get_parent, set_node_attr, walk};
use crate::translation::filters::{looks_codey, looks_english, normalize_segment};
use crate::translation::TranslationService;
use crate::utils::url::{absolutize, is_http_url};

/// 文本不参与翻译的父标签
const SKIP_PARENT_TAGS: [&str; 8] = [
    "script", "style", "noscript", "pre", "code", "kbd", "samp", "var",
];

/// 翻译阶段的诊断计数
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateStats {
    /// 进入翻译的去重文本段数
    pub segments_considered: usize,
    /// 译文与原文不同的文本段数
    pub segments_changed: usize,
    /// 发出的批次调用数
    pub batches_issued: usize,
    /// 是否被时间预算截断
    pub truncated: bool,
}

/// 就地翻译片段内的文本节点与图片属性
pub async fn translate_fragment(
    service: &TranslationService,
    fragment: &Handle,
    base_url: &Url,
    deadline: Instant,
) -> TranslateStats {
    rewrite_images(fragment, base_url);

    // 1) 文本节点快照 + 去重收集
    let text_nodes = collect_text_nodes(fragment);
    let filter = service.filter();
    let mut seen: HashSet<String> = HashSet::new();
    let mut segments: Vec<String> = Vec::new();
    for node in &text_nodes {
        if let NodeData::Text { contents } = &node.data {
            let normalized = normalize_segment(&contents.borrow());
            if !filter.should_translate(&normalized) {
                continue;
            }
            if seen.insert(normalized.clone()) {
                segments.push(normalized);
            }
        }
    }

    // 2) 截断到硬上限，限制最坏情况的延迟
    if segments.len() > service.config().max_segments {
        tracing::debug!(
            total = segments.len(),
            cap = service.config().max_segments,
            "文本段超过上限，截断"
        );
        segments.truncate(service.config().max_segments);
    }
    let segments_considered = segments.len();

    // 3) 批次翻译（带时间预算）
    let outcome = service
        .translate_segments(&segments, Some(deadline))
        .await;

    let mut translations: HashMap<String, String> = HashMap::new();
    let mut segments_changed = 0;
    for (original, translated) in segments.iter().zip(&outcome.translated) {
        if !translated.is_empty() && translated != original {
            translations.insert(original.clone(), translated.clone());
            segments_changed += 1;
        }
    }

    // 4) 写回：同一规范化文本的所有出现共享同一份译文
    for node in &text_nodes {
        if let NodeData::Text { contents } = &node.data {
            let raw = contents.borrow().to_string();
            let normalized = normalize_segment(&raw);
            if let Some(translated) = translations.get(&normalized) {
                let lead = &raw[..raw.len() - raw.trim_start().len()];
                let trail = &raw[raw.trim_end().len()..];
                let replaced = format!("{}{}{}", lead, translated, trail);
                *contents.borrow_mut() = replaced.as_str().into();
            }
        }
    }

    // 5) 图片 alt/title 走单段翻译路径
    translate_image_attributes(service, fragment).await;

    TranslateStats {
        segments_considered,
        segments_changed,
        batches_issued: outcome.batches_issued,
        truncated: outcome.truncated,
    }
}

/// 收集可翻译的文本节点快照
fn collect_text_nodes(fragment: &Handle) -> Vec<Handle> {
    let mut nodes = Vec::new();
    walk(fragment, &mut |node| {
        if !matches!(node.data, NodeData::Text { .. }) {
            return;
        }
        let parent_tag = get_parent(node)
            .and_then(|p| get_node_name(&p).map(|n| n.to_string()))
            .unwrap_or_default();
        if SKIP_PARENT_TAGS.contains(&parent_tag.as_str()) {
            return;
        }
        nodes.push(node.clone());
    });
    nodes
}

/// 改写片段内所有图片：绝对化地址并走图片代理，标记懒加载
///
/// 译文页面由另一个源渲染，直连原图会碰到防盗链/CORS/混合内容问题，
/// 所以 http(s) 图片一律改走 `/api/image` 代理。
fn rewrite_images(fragment: &Handle, base_url: &Url) {
    for img in collect_images(fragment) {
        let source = get_node_attr(&img, "src")
            .filter(|s| !s.trim().is_empty())
            .or_else(|| get_node_attr(&img, "data-src"))
            .or_else(|| get_node_attr(&img, "data-original"));

        if let Some(source) = source {
            match absolutize(base_url, &source) {
                Some(absolute) if is_http_url(&absolute) => {
                    let proxied = format!(
                        "/api/image?url={}",
                        utf8_percent_encode(&absolute, NON_ALPHANUMERIC)
                    );
                    set_node_attr(&img, "src", Some(proxied));
                }
                Some(absolute) => set_node_attr(&img, "src", Some(absolute)),
                None => {}
            }
        }

        set_node_attr(&img, "loading", Some("lazy".to_string()));
        let style = get_node_attr(&img, "style").unwrap_or_default();
        set_node_attr(
            &img,
            "style",
            Some(
                format!("{};max-width:100%;height:auto;border-radius:12px;", style)
                    .trim()
                    .to_string(),
            ),
        );
    }
}

/// 翻译图片的 alt/title 属性
async fn translate_image_attributes(service: &TranslationService, fragment: &Handle) {
    for img in collect_images(fragment) {
        for attr in ["alt", "title"] {
            if let Some(value) = get_node_attr(&img, attr) {
                let trimmed = value.trim();
                if trimmed.is_empty() || !looks_english(trimmed) || looks_codey(trimmed) {
                    continue;
                }
                let translated = service.translate_segment(trimmed).await;
                set_node_attr(&img, attr, Some(translated));
            }
        }
    }
}

fn collect_images(fragment: &Handle) -> Vec<Handle> {
    let mut images = Vec::new();
    walk(fragment, &mut |node| {
        if get_node_name(node) == Some("img") {
            images.push(node.clone());
        }
    });
    images
}
