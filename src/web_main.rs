//! perevod Web 服务入口

use std::sync::Arc;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use perevod::env::{core as env_core, EnvVar};
use perevod::translation::{TranslationConfig, TranslationService};
use perevod::web::{WebConfig, WebServer};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let default_level = env_core::LogLevel::get().unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("perevod={}", default_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let translation_config = TranslationConfig::from_env();
    tracing::info!(
        source = %translation_config.source_lang,
        target = %translation_config.target_lang,
        fallback = translation_config.fallback_url.is_some(),
        "翻译配置已加载"
    );

    let translator = match TranslationService::new(translation_config) {
        Ok(service) => Arc::new(service),
        Err(error) => {
            tracing::error!("翻译服务初始化失败: {}", error);
            std::process::exit(1);
        }
    };

    let server = WebServer::new(WebConfig::from_env(), translator);
    if let Err(error) = server.start().await {
        tracing::error!("服务器启动失败: {}", error);
        std::process::exit(1);
    }
}
