//! rcdom 遍历、查询与变更助手

use std::rc::Rc;

use encoding_rs::Encoding;
use html5ever::interface::{Attribute, QualName};
use html5ever::parse_document;
use html5ever::tendril::{format_tendril, TendrilSink};
use html5ever::{namespace_url, ns, LocalName};
use markup5ever_rcdom::{Handle, Node, NodeData, RcDom};

/// 将 HTML 字节转换为 DOM
pub fn html_to_dom(data: &[u8], document_encoding: String) -> RcDom {
    let s: String;

    if let Some(encoding) = Encoding::for_label(document_encoding.as_bytes()) {
        let (string, _, _) = encoding.decode(data);
        s = string.to_string();
    } else {
        s = String::from_utf8_lossy(data).to_string();
    }

    parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .read_from(&mut s.as_bytes())
        .unwrap()
}

/// 获取节点名称
pub fn get_node_name(node: &Handle) -> Option<&'_ str> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.as_ref()),
        _ => None,
    }
}

/// 获取节点属性值
pub fn get_node_attr(node: &Handle, attr_name: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => {
            for attr in attrs.borrow().iter() {
                if &*attr.name.local == attr_name {
                    return Some(attr.value.to_string());
                }
            }
            None
        }
        _ => None,
    }
}

/// 设置节点属性；值为 None 时删除该属性
pub fn set_node_attr(node: &Handle, attr_name: &str, attr_value: Option<String>) {
    if let NodeData::Element { attrs, .. } = &node.data {
        let attrs_mut = &mut attrs.borrow_mut();
        let mut i = 0;
        let mut found_existing_attr: bool = false;

        while i < attrs_mut.len() {
            if &attrs_mut[i].name.local == attr_name {
                found_existing_attr = true;

                if let Some(attr_value) = attr_value.clone() {
                    let _ = &attrs_mut[i].value.clear();
                    let _ = &attrs_mut[i].value.push_slice(attr_value.as_str());
                } else {
                    attrs_mut.remove(i);
                    continue;
                }
            }

            i += 1;
        }

        if !found_existing_attr {
            if let Some(attr_value) = attr_value {
                let name = LocalName::from(attr_name);
                attrs_mut.push(Attribute {
                    name: QualName::new(None, ns!(), name),
                    value: format_tendril!("{}", attr_value),
                });
            }
        }
    };
}

/// 获取父节点（不破坏节点自身的 parent 引用）
pub fn get_parent(node: &Handle) -> Option<Handle> {
    let weak = node.parent.take();
    let parent = weak.as_ref().and_then(|w| w.upgrade());
    node.parent.set(weak);
    parent
}

/// 前序遍历，对每个节点（含根）调用回调
///
/// 回调内不得改动祖先节点的子列表；需要变更时先收集句柄再操作。
pub fn walk<F: FnMut(&Handle)>(node: &Handle, callback: &mut F) {
    callback(node);
    for child in node.children.borrow().iter() {
        walk(child, callback);
    }
}

/// 按文档顺序查找第一个满足谓词的元素
pub fn find_first<F: Fn(&Handle) -> bool>(root: &Handle, predicate: &F) -> Option<Handle> {
    if predicate(root) {
        return Some(root.clone());
    }
    for child in root.children.borrow().iter() {
        if let Some(found) = find_first(child, predicate) {
            return Some(found);
        }
    }
    None
}

/// 按 id 查找元素
pub fn find_by_id(root: &Handle, id: &str) -> Option<Handle> {
    find_first(root, &|node| {
        get_node_attr(node, "id").as_deref() == Some(id)
    })
}

/// 按标签名查找第一个元素
pub fn find_by_tag(root: &Handle, tag: &str) -> Option<Handle> {
    find_first(root, &|node| get_node_name(node) == Some(tag))
}

/// 按 class 令牌查找第一个元素
pub fn find_by_class(root: &Handle, class: &str) -> Option<Handle> {
    find_first(root, &|node| has_class(node, class))
}

/// 判断元素的 class 列表是否包含指定令牌
pub fn has_class(node: &Handle, class: &str) -> bool {
    get_node_attr(node, "class")
        .map(|value| value.split_whitespace().any(|token| token == class))
        .unwrap_or(false)
}

/// 拼接节点子树内所有文本节点的内容
pub fn text_content(node: &Handle) -> String {
    let mut out = String::new();
    walk(node, &mut |n| {
        if let NodeData::Text { contents } = &n.data {
            out.push_str(&contents.borrow());
        }
    });
    out
}

/// 把节点从其父节点的子列表中摘除
pub fn detach_node(node: &Handle) {
    if let Some(parent) = get_parent(node) {
        parent
            .children
            .borrow_mut()
            .retain(|child| !Rc::ptr_eq(child, node));
    }
    node.parent.set(None);
}

/// 把子节点追加到父节点
pub fn append_child(parent: &Handle, child: &Handle) {
    child.parent.set(Some(Rc::downgrade(parent)));
    parent.children.borrow_mut().push(child.clone());
}

/// 深拷贝一棵子树
pub fn clone_subtree(node: &Handle) -> Handle {
    let data = match &node.data {
        NodeData::Element {
            name,
            attrs,
            mathml_annotation_xml_integration_point,
            ..
        } => NodeData::Element {
            name: name.clone(),
            attrs: std::cell::RefCell::new(attrs.borrow().clone()),
            template_contents: std::cell::RefCell::new(None),
            mathml_annotation_xml_integration_point: *mathml_annotation_xml_integration_point,
        },
        NodeData::Text { contents } => NodeData::Text {
            contents: std::cell::RefCell::new(contents.borrow().clone()),
        },
        NodeData::Comment { contents } => NodeData::Comment {
            contents: contents.clone(),
        },
        NodeData::Doctype {
            name,
            public_id,
            system_id,
        } => NodeData::Doctype {
            name: name.clone(),
            public_id: public_id.clone(),
            system_id: system_id.clone(),
        },
        NodeData::ProcessingInstruction { target, contents } => {
            NodeData::ProcessingInstruction {
                target: target.clone(),
                contents: contents.clone(),
            }
        }
        NodeData::Document => NodeData::Document,
    };

    let clone = Node::new(data);
    for child in node.children.borrow().iter() {
        let child_clone = clone_subtree(child);
        child_clone.parent.set(Some(Rc::downgrade(&clone)));
        clone.children.borrow_mut().push(child_clone);
    }
    clone
}

/// 判断 `ancestor` 是否是 `node` 的祖先
pub fn is_ancestor_of(ancestor: &Handle, node: &Handle) -> bool {
    let mut current = get_parent(node);
    while let Some(parent) = current {
        if Rc::ptr_eq(&parent, ancestor) {
            return true;
        }
        current = get_parent(&parent);
    }
    false
}

/// 判断节点到 `stop`（不含）之间的祖先链上是否有指定标签
pub fn has_ancestor_tag(node: &Handle, stop: &Handle, tags: &[&str]) -> bool {
    let mut current = get_parent(node);
    while let Some(parent) = current {
        if Rc::ptr_eq(&parent, stop) {
            return false;
        }
        if let Some(name) = get_node_name(&parent) {
            if tags.contains(&name) {
                return true;
            }
        }
        current = get_parent(&parent);
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(html: &str) -> RcDom {
        html_to_dom(html.as_bytes(), "utf-8".to_string())
    }

    #[test]
    fn test_find_by_id_and_class() {
        let dom = parse(r#"<div id="main" class="wrap content">hi</div>"#);
        assert!(find_by_id(&dom.document, "main").is_some());
        assert!(find_by_id(&dom.document, "missing").is_none());
        assert!(find_by_class(&dom.document, "content").is_some());
        assert!(find_by_class(&dom.document, "conten").is_none());
    }

    #[test]
    fn test_text_content() {
        let dom = parse("<p>Hello <b>bold</b> world</p>");
        let p = find_by_tag(&dom.document, "p").unwrap();
        assert_eq!(text_content(&p), "Hello bold world");
    }

    #[test]
    fn test_detach_and_clone() {
        let dom = parse("<div><span>a</span><span>b</span></div>");
        let div = find_by_tag(&dom.document, "div").unwrap();
        let first_span = find_by_tag(&div, "span").unwrap();

        let clone = clone_subtree(&div);
        detach_node(&first_span);

        assert_eq!(text_content(&div), "b");
        // 克隆不受原树变更影响
        assert_eq!(text_content(&clone), "ab");
    }

    #[test]
    fn test_set_node_attr() {
        let dom = parse(r#"<img src="a.png">"#);
        let img = find_by_tag(&dom.document, "img").unwrap();
        set_node_attr(&img, "src", Some("b.png".to_string()));
        set_node_attr(&img, "loading", Some("lazy".to_string()));
        assert_eq!(get_node_attr(&img, "src"), Some("b.png".to_string()));
        assert_eq!(get_node_attr(&img, "loading"), Some("lazy".to_string()));
        set_node_attr(&img, "src", None);
        assert_eq!(get_node_attr(&img, "src"), None);
    }

    #[test]
    fn test_ancestry_helpers() {
        let dom = parse("<nav><ul><li>item</li></ul></nav>");
        let body = find_by_tag(&dom.document, "body").unwrap();
        let li = find_by_tag(&dom.document, "li").unwrap();
        assert!(has_ancestor_tag(&li, &body, &["nav"]));
        assert!(!has_ancestor_tag(&li, &body, &["aside"]));

        let ul = find_by_tag(&dom.document, "ul").unwrap();
        assert!(is_ancestor_of(&ul, &li));
        assert!(!is_ancestor_of(&li, &ul));
    }
}
