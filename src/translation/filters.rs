//! 文本过滤器模块
//!
//! 判断文本片段是否需要翻译的纯谓词函数。
//! 这些启发式是尽力而为的过滤器，不是保证：
//! 短字符串和混合语言文本都可能误判，阈值保持为文档化常量。

/// 判断文本是否包含西里尔字母（А–Я、а–я、Ё、ё）
pub fn has_cyrillic(text: &str) -> bool {
    text.chars().any(|c| matches!(c, 'А'..='я' | 'Ё' | 'ё'))
}

/// 判断文本是否看起来是英文
///
/// 空文本或含西里尔字母的文本不算英文；
/// 纯数字/标点的字符串也不算英文（必须至少含一个拉丁字母）。
pub fn looks_english(text: &str) -> bool {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return false;
    }
    if has_cyrillic(trimmed) {
        return false;
    }
    trimmed.chars().any(|c| c.is_ascii_alphabetic())
}

/// 判断文本是否像代码片段
///
/// 命中固定的运算符/标记字符集即判定为代码；
/// 另外，去掉空白后仍然很长（≥20 字符）且完全不含空白的字符串
/// 也按压缩标识符处理。
pub fn looks_codey(text: &str) -> bool {
    const CODEY_MARKS: [char; 5] = ['{', '}', ';', '<', '>'];
    const CODEY_OPS: [&str; 5] = ["=>", "::", "->", "===", "!=="];

    if text.chars().any(|c| CODEY_MARKS.contains(&c)) {
        return true;
    }
    if CODEY_OPS.iter().any(|op| text.contains(op)) {
        return true;
    }

    // 压缩标识符启发式
    let trimmed = text.trim();
    !trimmed.is_empty()
        && !trimmed.contains(char::is_whitespace)
        && trimmed.chars().count() >= 20
}

/// 折叠空白并去掉首尾空白，得到规范化的文本段
pub fn normalize_segment(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// 文本过滤器
///
/// 把纯谓词组合成 DOM 翻译器使用的门控：长度下限 + 英文判定 + 非代码判定。
#[derive(Debug, Clone)]
pub struct TextFilter {
    min_chars: usize,
}

impl TextFilter {
    /// 创建指定最小长度的过滤器
    pub fn new(min_chars: usize) -> Self {
        Self { min_chars }
    }

    /// 判断规范化后的文本段是否应该送去翻译
    pub fn should_translate(&self, text: &str) -> bool {
        let normalized = normalize_segment(text);
        if normalized.chars().count() < self.min_chars {
            return false;
        }
        if !looks_english(&normalized) {
            return false;
        }
        !looks_codey(&normalized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_cyrillic() {
        assert!(has_cyrillic("привет"));
        assert!(has_cyrillic("Ёлка"));
        assert!(has_cyrillic("mixed привет text"));
        assert!(!has_cyrillic("hello world"));
        assert!(!has_cyrillic("123 !@#"));
        assert!(!has_cyrillic(""));
    }

    #[test]
    fn test_looks_english() {
        assert!(looks_english("Hello world"));
        assert!(looks_english("  spaced text  "));
        assert!(!looks_english(""));
        assert!(!looks_english("   "));
        assert!(!looks_english("привет"));
        assert!(!looks_english("hello привет"));
        // 纯数字/标点不算英文
        assert!(!looks_english("123 456"));
        assert!(!looks_english("!@# $%^"));
    }

    #[test]
    fn test_looks_codey() {
        assert!(looks_codey("if (x) { return; }"));
        assert!(looks_codey("a => b"));
        assert!(looks_codey("std::vec"));
        assert!(looks_codey("ptr->field"));
        assert!(looks_codey("a === b"));
        assert!(looks_codey("a !== b"));
        assert!(looks_codey("<div>"));
        // 压缩标识符：长且无空白
        assert!(looks_codey("averyLongCompactedIdentifierName"));
        assert!(!looks_codey("short"));
        assert!(!looks_codey("This is a normal English sentence."));
    }

    #[test]
    fn test_normalize_segment() {
        assert_eq!(normalize_segment("  hello   world \n"), "hello world");
        assert_eq!(normalize_segment("one"), "one");
        assert_eq!(normalize_segment("   "), "");
    }

    #[test]
    fn test_filter_gate() {
        let filter = TextFilter::new(20);
        assert!(filter.should_translate("This is a test paragraph with more text."));
        // 太短
        assert!(!filter.should_translate("Short text"));
        // 俄文
        assert!(!filter.should_translate("Это уже переведённый длинный текст."));
        // 类代码
        assert!(!filter.should_translate("const value = { a: 1, b: 2 };"));
    }
}
