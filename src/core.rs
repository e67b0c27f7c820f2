//! 翻译流程编排
//!
//! translate-url 的顶层工作流：抓取 → 提取 → 翻译 → 组装。
//! 各阶段建模为显式的带数据标签联合（`Phase`），时间预算和错误
//! 路径都落在固定的阶段边界上，便于审计和单独测试。
//!
//! DOM（rcdom 基于 `Rc`，不是 Send）全部在一个阻塞任务里处理，
//! 翻译这步通过 `Handle::block_on` 回到异步世界；句柄从不跨线程。

use std::sync::Arc;
use std::time::Instant;

use markup5ever_rcdom::{Handle, RcDom};
use serde::Serialize;
use thiserror::Error;
use tokio::task;
use url::Url;

use crate::network::fetch::{fetch_page, FetchedPage};
use crate::parsers::html::{
    extract_main_content, extract_title, html_to_dom, serialize_fragment, translate_fragment,
    TranslateStats,
};
use crate::translation::TranslationService;

/// 标题完全缺失时的占位标题
pub const DEFAULT_TITLE: &str = "Статья";

/// 顶层错误类型
///
/// 展示文案是面向用户的俄文；诊断细节走 tracing。
#[derive(Error, Debug)]
pub enum PerevodError {
    /// 页面抓取失败（网络错误、超时、非 2xx、超大响应）
    #[error("не удалось загрузить страницу: {0}")]
    Fetch(String),

    /// 提取结果过小（页面为空/受保护/选择器未命中）
    #[error("не удалось извлечь контент (страница пустая/защищена/селекторы не совпали)")]
    Extraction { extracted_chars: usize },

    /// 翻译服务错误
    #[error("ошибка перевода: {0}")]
    Translation(String),

    /// 内部错误（工作线程失败等）
    #[error("внутренняя ошибка: {0}")]
    Internal(String),
}

pub type PerevodResult<T> = Result<T, PerevodError>;

/// 翻译完成的文档
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslatedDocument {
    pub title: String,
    pub content_html: String,
    pub source_url: String,
    pub stats: TranslateStats,
}

/// 文档处理的阶段状态机（抓取阶段在进入阻塞任务之前完成）
enum Phase {
    Extract {
        dom: RcDom,
    },
    Translate {
        title: String,
        fragment: Handle,
    },
    Assemble {
        title: String,
        fragment: Handle,
        stats: TranslateStats,
    },
    Done {
        document: TranslatedDocument,
    },
}

/// translate-url 工作流入口：抓取页面并完成整个翻译流程
pub async fn translate_url_document(
    service: Arc<TranslationService>,
    client: &reqwest::Client,
    url: Url,
) -> PerevodResult<TranslatedDocument> {
    tracing::info!(url = %url, "开始处理 translate-url 请求");
    let page = fetch_page(client, &url).await?;
    translate_fetched(service, page).await
}

/// 对已抓取的页面执行提取与翻译
pub async fn translate_fetched(
    service: Arc<TranslationService>,
    page: FetchedPage,
) -> PerevodResult<TranslatedDocument> {
    task::spawn_blocking(move || run_document_pipeline(service, page))
        .await
        .map_err(|e| PerevodError::Internal(format!("工作线程失败: {}", e)))?
}

fn run_document_pipeline(
    service: Arc<TranslationService>,
    page: FetchedPage,
) -> PerevodResult<TranslatedDocument> {
    let runtime = tokio::runtime::Handle::current();
    let source_url = page.final_url.clone();
    let started = Instant::now();

    let mut phase = Phase::Extract {
        dom: html_to_dom(&page.bytes, page.charset.unwrap_or_default()),
    };

    loop {
        phase = match phase {
            Phase::Extract { dom } => {
                let title = extract_title(&dom).unwrap_or_else(|| DEFAULT_TITLE.to_string());
                let fragment = extract_main_content(&dom, &source_url)?;
                Phase::Translate { title, fragment }
            }
            Phase::Translate { title, fragment } => {
                let deadline = Instant::now() + service.config().translate_budget;
                let stats =
                    runtime.block_on(translate_fragment(&service, &fragment, &source_url, deadline));
                let title = runtime.block_on(service.translate_if_english(&title));
                Phase::Assemble {
                    title,
                    fragment,
                    stats,
                }
            }
            Phase::Assemble {
                title,
                fragment,
                stats,
            } => {
                let content_html = serialize_fragment(&fragment);
                tracing::info!(
                    url = %source_url,
                    segments = stats.segments_considered,
                    changed = stats.segments_changed,
                    batches = stats.batches_issued,
                    truncated = stats.truncated,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "文档翻译完成"
                );
                Phase::Done {
                    document: TranslatedDocument {
                        title,
                        content_html,
                        source_url: source_url.to_string(),
                        stats,
                    },
                }
            }
            Phase::Done { document } => return Ok(document),
        };
    }
}
