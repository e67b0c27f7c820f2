//! 词典查询处理器

use axum::extract::Json as ExtractJson;
use axum::http::StatusCode;
use axum::response::Json;
use serde_json::{json, Value};

use crate::dictionary::translate_word;
use crate::web::handlers::error_response;
use crate::web::types::TranslateWordRequest;

/// POST /api/translate-word
pub async fn translate_word_handler(
    ExtractJson(request): ExtractJson<TranslateWordRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let word = request.word.unwrap_or_default();
    if word.trim().is_empty() {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "Слово не предоставлено",
        ));
    }

    match translate_word(&word, request.direction) {
        Some(translation) => Ok(Json(
            json!({ "success": true, "translation": translation }),
        )),
        None => Err(error_response(
            StatusCode::NOT_FOUND,
            "Слово не найдено в словаре",
        )),
    }
}
