//! 正文内容提取器
//!
//! 根据来源站点选择"主内容区"，剔除导航/页眉/页脚等样板子树，
//! 然后按文档顺序把正文候选元素克隆进一个全新的输出片段，
//! 受元素数和累计字符数双重预算约束。提取结果过小视为提取失败
//! （页面为空、受保护或选择器没有命中）。

use html5ever::interface::{Attribute, QualName};
use html5ever::tendril::format_tendril;
use html5ever::tree_builder::create_element;
use html5ever::{namespace_url, ns, LocalName};
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use url::Url;

use super::dom::{
    append_child, clone_subtree, detach_node, find_by_class, find_by_id, find_by_tag,
    get_node_name, has_ancestor_tag, has_class, is_ancestor_of, text_content, walk,
};
use super::serialize::serialize_fragment;
use crate::core::PerevodError;
use crate::translation::config::constants;
use crate::translation::filters::normalize_segment;

/// 输出片段收录的正文标签
const CONTENT_TAGS: [&str; 16] = [
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "p",
    "ul",
    "ol",
    "li",
    "pre",
    "code",
    "blockquote",
    "figure",
    "img",
    "figcaption",
];

/// 额外收录的提示框/面板 div 类名
const PANEL_CLASSES: [&str; 5] = ["w3-panel", "w3-note", "w3-example", "w3-info", "w3-warning"];

/// 一律剔除的非内容标签
const STRIP_TAGS: [&str; 4] = ["script", "style", "noscript", "iframe"];

/// 结构样板标签
const CHROME_TAGS: [&str; 4] = ["nav", "footer", "header", "aside"];

/// 结构样板 id
const CHROME_IDS: [&str; 3] = ["leftmenu", "sidemenu", "topnav"];

/// 结构样板与百科引用区的类名
const CHROME_CLASSES: [&str; 8] = [
    "sidebar",
    "menu",
    "navigation",
    "reflist",
    "reference",
    "mw-references-wrap",
    "navbox",
    "infobox",
];

/// 提取页面的主要内容，返回一个独立的输出片段
pub fn extract_main_content(dom: &RcDom, url: &Url) -> Result<Handle, PerevodError> {
    let host = url.host_str().unwrap_or("");
    let scope = pick_main_scope(dom, host);
    cleanup_scope(&scope);

    let fragment = create_element(
        dom,
        QualName::new(None, ns!(), LocalName::from("div")),
        vec![Attribute {
            name: QualName::new(None, ns!(), LocalName::from("id")),
            value: format_tendril!("extracted"),
        }],
    );

    // 大体量的百科页面用更紧的预算，控制翻译延迟
    let encyclopedia = host.contains("wikipedia.org");
    let (max_elements, max_chars) = if encyclopedia {
        (constants::WIKI_MAX_ELEMENTS, constants::WIKI_MAX_TEXT_CHARS)
    } else {
        (constants::MAX_ELEMENTS, constants::MAX_TEXT_CHARS)
    };

    let candidates = collect_candidates(&scope);
    let mut included: Vec<Handle> = Vec::new();
    let mut added = 0usize;
    let mut char_budget = 0usize;

    for element in candidates {
        if added >= max_elements || char_budget >= max_chars {
            break;
        }
        if has_ancestor_tag(&element, &scope, &CHROME_TAGS) {
            continue;
        }
        // 祖先已被收录的元素跳过，避免列表与其子项重复出现
        if included.iter().any(|inc| is_ancestor_of(inc, &element)) {
            continue;
        }

        let tag = get_node_name(&element).unwrap_or("").to_string();
        if matches!(tag.as_str(), "p" | "li" | "div" | "pre") {
            let text = normalize_segment(&text_content(&element));
            if text.is_empty() {
                continue;
            }
            if tag == "div" && text.chars().count() < constants::MIN_DIV_TEXT_CHARS {
                continue;
            }
            char_budget += text.chars().count();
        }

        append_child(&fragment, &clone_subtree(&element));
        included.push(element);
        added += 1;
    }

    sanitize_fragment(&fragment);

    let html = serialize_fragment(&fragment);
    if html.trim().chars().count() < constants::MIN_FRAGMENT_HTML_CHARS {
        return Err(PerevodError::Extraction {
            extracted_chars: html.trim().len(),
        });
    }

    tracing::debug!(
        elements = added,
        text_chars = char_budget,
        html_chars = html.len(),
        "内容提取完成"
    );
    Ok(fragment)
}

/// 按来源主机名选择主内容区
fn pick_main_scope(dom: &RcDom, host: &str) -> Handle {
    let root = &dom.document;

    if host.contains("wikipedia.org") {
        if let Some(scope) = find_by_id(root, "mw-content-text") {
            return scope;
        }
    }

    if host.contains("w3schools.com") {
        if let Some(scope) = find_by_id(root, "main") {
            return scope;
        }
        if let Some(scope) = find_by_class(root, "w3-main") {
            return scope;
        }
    }

    // 通用回退链：article, main, #content, #main, .content, body
    if let Some(scope) = find_by_tag(root, "article") {
        return scope;
    }
    if let Some(scope) = find_by_tag(root, "main") {
        return scope;
    }
    if let Some(scope) = find_by_id(root, "content") {
        return scope;
    }
    if let Some(scope) = find_by_id(root, "main") {
        return scope;
    }
    if let Some(scope) = find_by_class(root, "content") {
        return scope;
    }
    find_by_tag(root, "body").unwrap_or_else(|| root.clone())
}

/// 从主内容区剔除脚本与结构样板子树
fn cleanup_scope(scope: &Handle) {
    let mut doomed: Vec<Handle> = Vec::new();
    walk(scope, &mut |node| {
        if let NodeData::Element { name, .. } = &node.data {
            let tag = name.local.as_ref();
            if STRIP_TAGS.contains(&tag) || CHROME_TAGS.contains(&tag) {
                doomed.push(node.clone());
                return;
            }
            if let Some(id) = super::dom::get_node_attr(node, "id") {
                if CHROME_IDS.contains(&id.as_str()) {
                    doomed.push(node.clone());
                    return;
                }
            }
            if CHROME_CLASSES.iter().any(|class| has_class(node, class)) {
                doomed.push(node.clone());
                return;
            }
            // 百科引用列表：<ol class="references">
            if tag == "ol" && has_class(node, "references") {
                doomed.push(node.clone());
            }
        }
    });
    for node in doomed {
        detach_node(&node);
    }
}

/// 按文档顺序收集正文候选元素（不含主内容区自身）
fn collect_candidates(scope: &Handle) -> Vec<Handle> {
    let mut candidates = Vec::new();
    walk(scope, &mut |node| {
        if std::rc::Rc::ptr_eq(node, scope) {
            return;
        }
        if let Some(tag) = get_node_name(node) {
            if CONTENT_TAGS.contains(&tag) {
                candidates.push(node.clone());
            } else if tag == "div"
                && PANEL_CLASSES.iter().any(|class| has_class(node, class))
            {
                candidates.push(node.clone());
            }
        }
    });
    candidates
}

/// 输出片段的兜底消毒：去掉残留脚本标签和所有内联事件处理属性
fn sanitize_fragment(fragment: &Handle) {
    let mut doomed: Vec<Handle> = Vec::new();
    walk(fragment, &mut |node| {
        if let NodeData::Element { name, attrs, .. } = &node.data {
            if STRIP_TAGS.contains(&name.local.as_ref()) {
                doomed.push(node.clone());
                return;
            }
            attrs.borrow_mut().retain(|attr| {
                !attr.name.local.as_ref().to_ascii_lowercase().starts_with("on")
            });
        }
    });
    for node in doomed {
        detach_node(&node);
    }
}
