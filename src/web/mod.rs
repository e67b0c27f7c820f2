//! Web 服务器模块
//!
//! 基于 axum 的 HTTP 层：路由、CORS、可选的静态前端目录。

use std::path::Path;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::core::{PerevodError, PerevodResult};
use crate::env::{core as env_core, translation as env_translation, EnvVar};
use crate::network::fetch::build_http_client;
use crate::translation::TranslationService;

pub mod handlers;
pub mod types;

use types::AppState;

/// Web 服务器配置
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// 绑定地址
    pub bind_addr: String,
    /// 端口
    pub port: u16,
    /// 静态前端目录（不存在时只提供 API）
    pub static_dir: Option<String>,
    /// 天气提供方地址
    pub weather_url: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0".to_string(),
            port: 3000,
            static_dir: Some("public".to_string()),
            weather_url: "https://wttr.in".to_string(),
        }
    }
}

impl WebConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(host) = env_core::Host::get() {
            config.bind_addr = host;
        }
        if let Ok(port) = env_core::Port::get() {
            config.port = port;
        }
        if let Ok(dir) = env_core::StaticDir::get() {
            config.static_dir = Some(dir);
        }
        if let Ok(url) = env_translation::WeatherUrl::get() {
            config.weather_url = url;
        }
        config
    }
}

/// Web 服务器
pub struct WebServer {
    config: WebConfig,
    translator: Arc<TranslationService>,
}

impl WebServer {
    /// 创建新的 Web 服务器
    pub fn new(config: WebConfig, translator: Arc<TranslationService>) -> Self {
        Self { config, translator }
    }

    /// 构建路由（独立出来便于测试）
    pub fn build_router(&self) -> PerevodResult<Router> {
        let http = build_http_client()
            .map_err(|e| PerevodError::Internal(format!("HTTP客户端创建失败: {}", e)))?;

        let state = AppState {
            translator: self.translator.clone(),
            http,
            config: self.config.clone(),
        };

        let router = Router::new()
            .route("/api/translate-url", post(handlers::api::translate::translate_url))
            .route("/api/translate-text", post(handlers::api::translate::translate_text))
            .route(
                "/api/translate-word",
                post(handlers::api::word::translate_word_handler),
            )
            .route("/api/weather", get(handlers::api::weather::weather))
            .route("/api/articles/:category", get(handlers::api::articles::articles))
            .route("/api/image", get(handlers::api::image::image_proxy))
            .route("/api/health", get(handlers::api::health::health))
            .layer(CorsLayer::permissive())
            .with_state(state);

        // 静态前端目录存在时挂到根路径，否则用 JSON 404 兜底
        let router = match &self.config.static_dir {
            Some(dir) if Path::new(dir).is_dir() => {
                router.fallback_service(ServeDir::new(dir))
            }
            _ => router.fallback(handlers::not_found),
        };

        Ok(router)
    }

    /// 启动 Web 服务器
    pub async fn start(&self) -> PerevodResult<()> {
        let app = self.build_router()?;

        let listener = tokio::net::TcpListener::bind(format!(
            "{}:{}",
            self.config.bind_addr, self.config.port
        ))
        .await
        .map_err(|e| PerevodError::Internal(format!("端口绑定失败: {}", e)))?;

        tracing::info!(
            "Web 服务已启动: http://{}:{}",
            self.config.bind_addr,
            self.config.port
        );

        axum::serve(listener, app)
            .await
            .map_err(|e| PerevodError::Internal(format!("服务器错误: {}", e)))
    }
}
