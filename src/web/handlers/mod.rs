pub mod api;

use axum::http::StatusCode;
use axum::response::Json;
use serde_json::{json, Value};

/// JSON 404 兜底
pub async fn not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "success": false, "error": "Endpoint не найден" })),
    )
}

/// 构造统一的 JSON 错误响应
pub fn error_response(status: StatusCode, message: impl Into<String>) -> (StatusCode, Json<Value>) {
    (
        status,
        Json(json!({ "success": false, "error": message.into() })),
    )
}
