//! 精选文章列表处理器

use axum::extract::Path;
use axum::response::Json;
use serde_json::{json, Value};

use crate::articles::articles_for;
use crate::web::types::ArticleEntry;

/// GET /api/articles/:category
///
/// 未知分类返回空列表而不是错误。
pub async fn articles(Path(category): Path<String>) -> Json<Value> {
    let entries: Vec<ArticleEntry> = articles_for(&category)
        .iter()
        .map(|article| ArticleEntry {
            title: article.title_ru.to_string(),
            url: article.url.to_string(),
        })
        .collect();

    Json(json!({ "success": true, "articles": entries }))
}
