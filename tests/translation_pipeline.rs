//! 翻译管道集成测试

mod common;

use std::time::{Duration, Instant};

use common::{parse_html, test_service, MockProvider};
use perevod::parsers::html::{
    extract_main_content, serialize_fragment, translate_fragment,
};
use url::Url;

fn article_with(body: &str) -> String {
    format!("<html><body><article>{}</article></body></html>", body)
}

fn far_deadline() -> Instant {
    Instant::now() + Duration::from_secs(30)
}

/// 相同规范化文本的节点只触发一次翻译，所有出现共享同一份译文
#[tokio::test]
async fn test_dedup_translates_each_segment_once() {
    let provider = MockProvider::uppercase();
    let service = test_service(provider.clone());

    let html = article_with(
        "<p>The quick brown fox jumps over the lazy dog</p>\
         <p>The quick brown fox jumps over the lazy dog</p>\
         <p>Another long paragraph that should also be translated here.</p>",
    );
    let dom = parse_html(&html);
    let url = Url::parse("https://example.com/a").unwrap();
    let fragment = extract_main_content(&dom, &url).unwrap();

    let stats = translate_fragment(&service, &fragment, &url, far_deadline()).await;

    assert_eq!(stats.segments_considered, 2, "重复段必须去重");
    assert_eq!(stats.segments_changed, 2);
    assert_eq!(stats.batches_issued, 1);
    assert!(!stats.truncated);
    // 两个批次段拼成一个批次 → 一次提供方调用
    assert_eq!(provider.call_count(), 1);

    let out = serialize_fragment(&fragment);
    assert_eq!(
        out.matches("THE QUICK BROWN FOX JUMPS OVER THE LAZY DOG").count(),
        2
    );
    assert!(out.contains("ANOTHER LONG PARAGRAPH"));
}

/// 写回时精确保留文本节点的首尾空白
#[tokio::test]
async fn test_whitespace_preserved_on_write_back() {
    let provider = MockProvider::uppercase();
    let service = test_service(provider);

    let html = article_with(
        "<p>  Surrounded by spaces this sentence certainly is  </p>\
         <p>Second paragraph with enough characters to pass the floor.</p>",
    );
    let dom = parse_html(&html);
    let url = Url::parse("https://example.com/b").unwrap();
    let fragment = extract_main_content(&dom, &url).unwrap();

    translate_fragment(&service, &fragment, &url, far_deadline()).await;

    let out = serialize_fragment(&fragment);
    assert!(out.contains("<p>  SURROUNDED BY SPACES THIS SENTENCE CERTAINLY IS  </p>"));
}

/// 代码与 pre/code 区域内的文本绝不送翻译
#[tokio::test]
async fn test_code_regions_untouched() {
    let provider = MockProvider::uppercase();
    let service = test_service(provider.clone());

    let html = article_with(
        "<p>A plain paragraph that is long enough to be translated.</p>\
         <pre>fn main() { println!(\"do not translate this code block\"); }</pre>\
         <p>if (x) { return; } plus commentary makes this code-like text</p>",
    );
    let dom = parse_html(&html);
    let url = Url::parse("https://example.com/c").unwrap();
    let fragment = extract_main_content(&dom, &url).unwrap();

    translate_fragment(&service, &fragment, &url, far_deadline()).await;

    let out = serialize_fragment(&fragment);
    assert!(out.contains("A PLAIN PARAGRAPH"));
    assert!(out.contains("do not translate this code block"));
    assert!(out.contains("if (x) { return; } plus commentary"));
}

/// 截止时间已过时不再发出批次，文本保持原样
#[tokio::test]
async fn test_deadline_truncates_batches() {
    let provider = MockProvider::uppercase();
    let service = test_service(provider.clone());

    let html = article_with(
        "<p>First paragraph with plenty of translatable characters inside.</p>\
         <p>Second paragraph with plenty of translatable characters inside too.</p>",
    );
    let dom = parse_html(&html);
    let url = Url::parse("https://example.com/d").unwrap();
    let fragment = extract_main_content(&dom, &url).unwrap();

    let expired = Instant::now() - Duration::from_millis(1);
    let stats = translate_fragment(&service, &fragment, &url, expired).await;

    assert!(stats.truncated);
    assert_eq!(stats.batches_issued, 0);
    assert_eq!(stats.segments_changed, 0);
    assert_eq!(provider.call_count(), 0);

    let out = serialize_fragment(&fragment);
    assert!(out.contains("First paragraph with plenty"));
}

/// 批次分隔符被提供方折叠时，逐段回退仍保证输出与输入等长同序
#[tokio::test]
async fn test_batch_fallback_keeps_order() {
    let provider = MockProvider::delimiter_collapsing();
    let service = test_service(provider.clone());

    let segments = vec![
        "The first sentence for the batch.".to_string(),
        "The second sentence for the batch.".to_string(),
        "The third sentence for the batch.".to_string(),
    ];
    let outcome = service.translate_segments(&segments, None).await;

    assert_eq!(outcome.translated.len(), 3);
    assert_eq!(outcome.translated[0], "THE FIRST SENTENCE FOR THE BATCH.");
    assert_eq!(outcome.translated[1], "THE SECOND SENTENCE FOR THE BATCH.");
    assert_eq!(outcome.translated[2], "THE THIRD SENTENCE FOR THE BATCH.");
    // 一次批次调用 + 三次逐段回退
    assert_eq!(provider.call_count(), 4);
}

/// 缓存命中时不再调用提供方，两次结果一致
#[tokio::test]
async fn test_cache_determinism() {
    let provider = MockProvider::uppercase();
    let service = test_service(provider.clone());

    let first = service.client().translate_short("Hello cached world").await;
    let second = service.client().translate_short("Hello cached world").await;

    assert_eq!(first, "HELLO CACHED WORLD");
    assert_eq!(first, second);
    assert_eq!(provider.call_count(), 1);
}

/// 受保护的代码令牌在 translate-text 路径上往返不变
#[tokio::test]
async fn test_translate_text_protects_code_tokens() {
    let provider = MockProvider::uppercase();
    let service = test_service(provider);

    let translated = service
        .translate_text("Use console.log(x) to debug the value.", None, None)
        .await;

    assert!(translated.contains("console.log"));
    assert!(!translated.contains("CONSOLE.LOG"));
}

/// 图片 alt 走单段翻译路径
#[tokio::test]
async fn test_image_alt_translated_and_src_proxied() {
    let provider = MockProvider::uppercase();
    let service = test_service(provider);

    let html = article_with(
        "<p>A paragraph long enough to keep the fragment above the floor.</p>\
         <p>Another paragraph long enough to keep the fragment above the floor.</p>\
         <figure><img src=\"/pics/cat.png\" alt=\"A fluffy cat sitting on a sofa\"></figure>",
    );
    let dom = parse_html(&html);
    let url = Url::parse("https://example.com/post/index.html").unwrap();
    let fragment = extract_main_content(&dom, &url).unwrap();

    translate_fragment(&service, &fragment, &url, far_deadline()).await;

    let out = serialize_fragment(&fragment);
    assert!(out.contains("/api/image?url=https%3A%2F%2Fexample%2Ecom%2Fpics%2Fcat%2Epng"));
    assert!(out.contains("A FLUFFY CAT SITTING ON A SOFA"));
    assert!(out.contains("loading=\"lazy\""));
}
