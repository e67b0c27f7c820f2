//! 翻译相关的 API 处理器

use axum::extract::{Json as ExtractJson, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde_json::{json, Value};
use url::Url;

use crate::core::{translate_url_document, PerevodError};
use crate::web::handlers::error_response;
use crate::web::types::{
    AppState, TranslateTextRequest, TranslateUrlRequest, TranslateUrlResponse,
};

/// POST /api/translate-url
///
/// 任何阶段的失败都转换成 `{success:false, error}`，异常不外泄。
pub async fn translate_url(
    State(state): State<AppState>,
    ExtractJson(request): ExtractJson<TranslateUrlRequest>,
) -> Result<Json<TranslateUrlResponse>, (StatusCode, Json<Value>)> {
    let url_text = request.url.unwrap_or_default().trim().to_string();
    if url_text.is_empty() {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "URL не предоставлен",
        ));
    }

    let url = Url::parse(&url_text).map_err(|_| {
        error_response(StatusCode::BAD_REQUEST, "Некорректный URL")
    })?;

    match translate_url_document(state.translator.clone(), &state.http, url).await {
        Ok(document) => Ok(Json(TranslateUrlResponse {
            success: true,
            title: document.title,
            content_html: document.content_html,
            source_url: document.source_url,
            debug: Some(document.stats),
        })),
        Err(PerevodError::Extraction { extracted_chars }) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "success": false,
                "error": "Не удалось извлечь контент (страница пустая/защищена/селекторы не совпали).",
                "debug": { "extractedChars": extracted_chars, "url": url_text },
            })),
        )),
        Err(error) => {
            tracing::warn!(url = %url_text, error = %error, "translate-url 请求失败");
            Err(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Ошибка при переводе: {}", error),
            ))
        }
    }
}

/// POST /api/translate-text
pub async fn translate_text(
    State(state): State<AppState>,
    ExtractJson(request): ExtractJson<TranslateTextRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let text = request.text.unwrap_or_default();
    if text.trim().is_empty() {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "Текст не предоставлен",
        ));
    }

    let translated = state
        .translator
        .translate_text(&text, request.from.as_deref(), request.to.as_deref())
        .await;

    Ok(Json(json!({ "success": true, "translated": translated })))
}
