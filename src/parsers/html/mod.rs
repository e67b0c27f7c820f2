pub mod dom;
pub mod extract;
pub mod metadata;
pub mod serialize;
pub mod translate;

pub use dom::{
    append_child, clone_subtree, detach_node, find_by_class, find_by_id, find_by_tag,
    get_node_attr, get_node_name, get_parent, html_to_dom, set_node_attr, text_content, walk,
};
pub use extract::extract_main_content;
pub use metadata::extract_title;
pub use serialize::serialize_fragment;
pub use translate::{translate_fragment, TranslateStats};
