//! # 解析器模块
//!
//! HTML 解析和 DOM 处理：
//!
//! - `html::dom` - rcdom 遍历/查询/变更助手
//! - `html::metadata` - 页面标题提取
//! - `html::extract` - 正文内容提取器
//! - `html::translate` - DOM 文本节点翻译器
//! - `html::serialize` - 片段序列化

pub mod html;
