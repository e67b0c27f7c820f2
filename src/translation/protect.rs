//! 代码令牌保护模块
//!
//! 翻译提供方会破坏代码标识符，所以在送翻译之前把代码类令牌
//! 替换为占位符，翻译完成后按字面还原。无论周围的散文被翻译成
//! 什么样，被保护的令牌都保证往返不变。

use std::sync::OnceLock;

use regex::Regex;

/// 固定的保留词表：语言关键字、常见运行时名词、高频缩写
const CODE_WORDS: [&str; 39] = [
    // JS
    "console",
    "console.log",
    "document",
    "window",
    "getElementById",
    "querySelector",
    "function",
    "return",
    "let",
    "const",
    "var",
    "class",
    "new",
    "import",
    "from",
    "export",
    "async",
    "await",
    "Promise",
    // Python
    "print",
    "printf",
    "def",
    "None",
    "True",
    "False",
    "list",
    "dict",
    "tuple",
    "set",
    "str",
    "int",
    "float",
    "bool",
    // Common
    "HTTP",
    "URL",
    "JSON",
    "API",
    "Node.js",
    "React",
];

/// 掩码结果：掩码后的文本和（占位符 → 原令牌）替换表
#[derive(Debug, Clone, Default)]
pub struct TokenProtection {
    pub masked: String,
    pub replacements: Vec<(String, String)>,
}

fn dotted_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b[A-Za-z_][A-Za-z0-9_]*\.[A-Za-z_][A-Za-z0-9_]*\b").unwrap()
    })
}

fn call_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b([A-Za-z_][A-Za-z0-9_]*)\s*\(").unwrap())
}

fn word_regex(token: &str) -> Regex {
    Regex::new(&format!(r"\b{}\b", regex::escape(token))).unwrap()
}

fn push_unique(found: &mut Vec<String>, token: &str) {
    if !token.is_empty() && !found.iter().any(|t| t == token) {
        found.push(token.to_string());
    }
}

/// 掩码文本中的代码类令牌
///
/// 三类令牌各收集一次：带点标识符（`object.property`）、调用形标识符
/// （`name(`，只取名字）、保留词表成员。按长度降序替换，保证较长的
/// 带点形式先于其前缀被掩码，避免部分重叠替换。
pub fn protect(text: &str) -> TokenProtection {
    if text.is_empty() {
        return TokenProtection {
            masked: text.to_string(),
            replacements: Vec::new(),
        };
    }

    let mut found: Vec<String> = Vec::new();

    for m in dotted_regex().find_iter(text) {
        push_unique(&mut found, m.as_str());
    }
    for caps in call_regex().captures_iter(text) {
        push_unique(&mut found, &caps[1]);
    }
    for word in CODE_WORDS {
        if word_regex(word).is_match(text) {
            push_unique(&mut found, word);
        }
    }

    if found.is_empty() {
        return TokenProtection {
            masked: text.to_string(),
            replacements: Vec::new(),
        };
    }

    // 长令牌优先（console.log 先于 console）
    found.sort_by(|a, b| b.len().cmp(&a.len()));

    let mut masked = text.to_string();
    let mut replacements = Vec::new();
    for (index, token) in found.iter().enumerate() {
        let placeholder = format!("@@CODE_{}@@", index);
        masked = word_regex(token)
            .replace_all(&masked, placeholder.as_str())
            .into_owned();
        replacements.push((placeholder, token.clone()));
    }

    TokenProtection {
        masked,
        replacements,
    }
}

/// 按字面还原占位符
///
/// 占位符唯一且互不重叠，逐对替换即可，不需要正则。
pub fn restore(text: &str, replacements: &[(String, String)]) -> String {
    let mut out = text.to_string();
    for (placeholder, token) in replacements {
        out = out.replace(placeholder.as_str(), token);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_identity() {
        let inputs = [
            "Call console.log(value) to print output.",
            "The window.document object holds the DOM.",
            "Use the HTTP API with JSON payloads.",
            "Plain prose without any tokens at all.",
            "",
        ];
        for input in inputs {
            let protection = protect(input);
            assert_eq!(restore(&protection.masked, &protection.replacements), input);
        }
    }

    #[test]
    fn test_masks_code_tokens() {
        let protection = protect("console.log prints to the console");
        assert!(!protection.masked.contains("console.log"));
        assert!(protection.masked.contains("@@CODE_"));
        assert!(!protection.replacements.is_empty());
    }

    #[test]
    fn test_longer_tokens_masked_first() {
        let protection = protect("console.log and console");
        // console.log 必须作为整体被掩码，不能先被 console 拆散
        let restored = restore(&protection.masked, &protection.replacements);
        assert_eq!(restored, "console.log and console");
        let longest = &protection.replacements[0].1;
        assert_eq!(longest, "console.log");
    }

    #[test]
    fn test_call_like_identifier() {
        let protection = protect("Invoke setup() before use.");
        assert!(protection.replacements.iter().any(|(_, t)| t == "setup"));
        assert!(!protection.masked.contains("setup("));
    }

    #[test]
    fn test_no_tokens_returns_original() {
        let protection = protect("Just some ordinary words here.");
        assert_eq!(protection.masked, "Just some ordinary words here.");
        assert!(protection.replacements.is_empty());
    }

    #[test]
    fn test_console_log_survives_translation_shape() {
        // 模拟提供方翻译了散文但保留了占位符
        let protection = protect("console.log(x)");
        let translated = protection.masked.to_uppercase().replace("(X)", "(x)");
        let restored = restore(&translated, &protection.replacements);
        assert!(restored.contains("console.log"));
    }
}
