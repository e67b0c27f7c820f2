//! 片段序列化

use html5ever::serialize::{serialize, SerializeOpts};
use markup5ever_rcdom::{Handle, SerializableHandle};

/// 把节点的子内容序列化为 HTML 字符串
///
/// 默认的序列化范围是 ChildrenOnly，因此返回的是容器的内部 HTML，
/// 不含容器自身的标签。
pub fn serialize_fragment(node: &Handle) -> String {
    let mut buf: Vec<u8> = Vec::new();
    let serializable: SerializableHandle = node.clone().into();
    serialize(&mut buf, &serializable, SerializeOpts::default())
        .expect("Unable to serialize DOM into buffer");
    String::from_utf8_lossy(&buf).to_string()
}
