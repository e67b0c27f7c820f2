//! 图片代理处理器
//!
//! 被提取页面里的图片改写成走这里，绕开防盗链/CORS/混合内容限制。

use axum::extract::{Query, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use url::Url;

use crate::network::fetch::fetch_image;
use crate::utils::url::is_http_url;
use crate::web::types::{AppState, ImageQuery};

/// GET /api/image?url=<encoded>
pub async fn image_proxy(
    State(state): State<AppState>,
    Query(query): Query<ImageQuery>,
) -> Response {
    let url_text = query.url.unwrap_or_default().trim().to_string();
    if !is_http_url(&url_text) {
        return (StatusCode::BAD_REQUEST, "bad url").into_response();
    }
    let url = match Url::parse(&url_text) {
        Ok(url) => url,
        Err(_) => return (StatusCode::BAD_REQUEST, "bad url").into_response(),
    };

    match fetch_image(&state.http, &url).await {
        Ok((bytes, content_type)) => {
            let content_type = HeaderValue::from_str(&content_type)
                .unwrap_or_else(|_| HeaderValue::from_static("image/jpeg"));
            (
                [
                    (header::CONTENT_TYPE, content_type),
                    (
                        header::CACHE_CONTROL,
                        HeaderValue::from_static("public, max-age=86400"),
                    ),
                ],
                bytes,
            )
                .into_response()
        }
        Err(error) => {
            tracing::debug!(url = %url_text, error = %error, "图片抓取失败");
            (StatusCode::NOT_FOUND, "image fetch failed").into_response()
        }
    }
}
