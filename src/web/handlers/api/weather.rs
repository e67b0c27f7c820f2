//! 天气查询处理器

use axum::extract::{Query, State};
use axum::response::Json;
use serde_json::{json, Value};

use crate::translation::filters::looks_english;
use crate::weather::fetch_weather;
use crate::web::types::{AppState, WeatherQuery, WeatherResponse};

/// GET /api/weather?city=<name>
///
/// 提供方失败时返回 `{success:false, error}`（状态仍是 200），
/// 天气是页面的附属功能，它的失败不应该表现成服务错误。
pub async fn weather(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> Json<Value> {
    let city = query.city.unwrap_or_else(|| "Moscow".to_string());

    match fetch_weather(&state.http, &state.config.weather_url, &city).await {
        Ok(mut report) => {
            // 提供方偶尔缺俄文描述，英文描述走翻译路径补齐
            if looks_english(&report.current.desc) {
                report.current.desc =
                    state.translator.translate_if_english(&report.current.desc).await;
            }
            for day in &mut report.forecast {
                if looks_english(&day.desc) {
                    day.desc = state.translator.translate_if_english(&day.desc).await;
                }
            }

            let response = WeatherResponse {
                success: true,
                location: report.location,
                current: report.current,
                forecast: report.forecast,
            };
            Json(serde_json::to_value(response).unwrap_or_else(
                |_| json!({ "success": false, "error": "weather serialization error" }),
            ))
        }
        Err(error) => {
            tracing::warn!(city = %city, error = %error, "天气查询失败");
            Json(json!({ "success": false, "error": error.to_string() }))
        }
    }
}
