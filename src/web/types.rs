//! Web 层的共享类型

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::dictionary::Direction;
use crate::parsers::html::TranslateStats;
use crate::translation::TranslationService;
use crate::weather::{CurrentWeather, ForecastDay};
use crate::web::WebConfig;

/// 应用状态
#[derive(Clone)]
pub struct AppState {
    pub translator: Arc<TranslationService>,
    pub http: reqwest::Client,
    pub config: WebConfig,
}

/// translate-url 请求
#[derive(Debug, Deserialize)]
pub struct TranslateUrlRequest {
    pub url: Option<String>,
}

/// translate-url 响应
#[derive(Debug, Serialize)]
pub struct TranslateUrlResponse {
    pub success: bool,
    pub title: String,
    #[serde(rename = "contentHtml")]
    pub content_html: String,
    #[serde(rename = "sourceUrl")]
    pub source_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<TranslateStats>,
}

/// translate-text 请求
#[derive(Debug, Deserialize)]
pub struct TranslateTextRequest {
    pub text: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

/// translate-word 请求
#[derive(Debug, Deserialize)]
pub struct TranslateWordRequest {
    pub word: Option<String>,
    #[serde(default)]
    pub direction: Direction,
}

/// weather 查询参数
#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    pub city: Option<String>,
}

/// weather 响应
#[derive(Debug, Serialize)]
pub struct WeatherResponse {
    pub success: bool,
    pub location: String,
    pub current: CurrentWeather,
    pub forecast: Vec<ForecastDay>,
}

/// image 查询参数
#[derive(Debug, Deserialize)]
pub struct ImageQuery {
    pub url: Option<String>,
}

/// articles 响应里的一条
#[derive(Debug, Serialize)]
pub struct ArticleEntry {
    pub title: String,
    pub url: String,
}
