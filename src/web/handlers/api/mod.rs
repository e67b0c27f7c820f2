//! API 处理器

pub mod articles;
pub mod health;
pub mod image;
pub mod translate;
pub mod weather;
pub mod word;
