//! 页面元数据提取
//!
//! 标题优先级：Open Graph 标题 → 第一个 `<h1>` → `<title>`。
//! 全部缺失时由调用方提供默认占位标题。

use markup5ever_rcdom::{Handle, NodeData, RcDom};

use super::dom::{find_by_tag, get_node_attr, text_content, walk};
use crate::translation::filters::normalize_segment;

/// 提取页面标题
pub fn extract_title(dom: &RcDom) -> Option<String> {
    if let Some(title) = og_title(&dom.document) {
        return Some(title);
    }

    if let Some(h1) = find_by_tag(&dom.document, "h1") {
        let text = normalize_segment(&text_content(&h1));
        if !text.is_empty() {
            return Some(text);
        }
    }

    if let Some(title_node) = find_by_tag(&dom.document, "title") {
        let text = normalize_segment(&text_content(&title_node));
        if !text.is_empty() {
            return Some(text);
        }
    }

    None
}

/// 查找 `<meta property="og:title" content="...">`
fn og_title(root: &Handle) -> Option<String> {
    let mut found = None;
    walk(root, &mut |node| {
        if found.is_some() {
            return;
        }
        if let NodeData::Element { name, .. } = &node.data {
            if name.local.as_ref() == "meta"
                && get_node_attr(node, "property").as_deref() == Some("og:title")
            {
                if let Some(content) = get_node_attr(node, "content") {
                    let normalized = normalize_segment(&content);
                    if !normalized.is_empty() {
                        found = Some(normalized);
                    }
                }
            }
        }
    });
    found
}
