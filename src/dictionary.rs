//! 迷你双语词典（EN ↔ RU）
//!
//! 固定映射的玩具词典，带大小写保持：全大写译全大写，
//! 首字母大写译首字母大写。

use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;

/// 词典条目（英文, 俄文）
const DICTIONARY: [(&str, &str); 9] = [
    ("hello", "привет"),
    ("world", "мир"),
    ("code", "код"),
    ("programming", "программирование"),
    ("function", "функция"),
    ("variable", "переменная"),
    ("server", "сервер"),
    ("client", "клиент"),
    ("weather", "погода"),
];

/// 翻译方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Direction {
    #[serde(rename = "en-ru")]
    EnRu,
    #[serde(rename = "ru-en")]
    RuEn,
}

impl Default for Direction {
    fn default() -> Self {
        Direction::EnRu
    }
}

/// 查询单词，未收录返回 None
pub fn translate_word(word: &str, direction: Direction) -> Option<String> {
    let trimmed = word.trim();
    if trimmed.is_empty() {
        return None;
    }
    let lower = trimmed.to_lowercase();

    let translated = match direction {
        Direction::EnRu => DICTIONARY
            .iter()
            .find(|(en, _)| *en == lower)
            .map(|(_, ru)| *ru),
        Direction::RuEn => DICTIONARY
            .iter()
            .find(|(_, ru)| *ru == lower)
            .map(|(en, _)| *en),
    }?;

    Some(preserve_case(trimmed, translated))
}

/// 对整段文本做逐词替换
pub fn translate_text(text: &str, direction: Direction) -> String {
    if text.trim().is_empty() {
        return text.to_string();
    }

    let pattern = match direction {
        Direction::EnRu => en_pattern(),
        Direction::RuEn => ru_pattern(),
    };

    pattern
        .replace_all(text, |caps: &regex::Captures| {
            let matched = &caps[0];
            let lower = matched.to_lowercase();
            let translated = match direction {
                Direction::EnRu => DICTIONARY
                    .iter()
                    .find(|(en, _)| *en == lower)
                    .map(|(_, ru)| *ru),
                Direction::RuEn => DICTIONARY
                    .iter()
                    .find(|(_, ru)| *ru == lower)
                    .map(|(en, _)| *en),
            };
            match translated {
                Some(value) => preserve_case(matched, value),
                None => matched.to_string(),
            }
        })
        .into_owned()
}

/// 长词优先的交替模式，避免较短词破坏较长词的替换
fn build_pattern<F: Fn(&(&str, &str)) -> &'static str>(select: F) -> Regex {
    let mut keys: Vec<&str> = DICTIONARY.iter().map(|entry| select(entry)).collect();
    keys.sort_by(|a, b| b.len().cmp(&a.len()));
    let alternation = keys
        .iter()
        .map(|k| regex::escape(k))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b({})\b", alternation)).unwrap()
}

fn en_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| build_pattern(|entry| entry.0))
}

fn ru_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| build_pattern(|entry| entry.1))
}

/// 按源词的大小写形态调整译文
fn preserve_case(source: &str, translated: &str) -> String {
    if source.chars().any(|c| c.is_alphabetic())
        && source == source.to_uppercase()
    {
        return translated.to_uppercase();
    }

    if source
        .chars()
        .next()
        .map(|c| c.is_uppercase())
        .unwrap_or(false)
    {
        let mut chars = translated.chars();
        return match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        };
    }

    translated.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_en_ru() {
        assert_eq!(
            translate_word("hello", Direction::EnRu),
            Some("привет".to_string())
        );
        assert_eq!(translate_word("missing", Direction::EnRu), None);
        assert_eq!(translate_word("  ", Direction::EnRu), None);
    }

    #[test]
    fn test_word_ru_en() {
        assert_eq!(
            translate_word("мир", Direction::RuEn),
            Some("world".to_string())
        );
        assert_eq!(translate_word("неизвестно", Direction::RuEn), None);
    }

    #[test]
    fn test_case_preservation() {
        assert_eq!(
            translate_word("Hello", Direction::EnRu),
            Some("Привет".to_string())
        );
        assert_eq!(
            translate_word("HELLO", Direction::EnRu),
            Some("ПРИВЕТ".to_string())
        );
        assert_eq!(
            translate_word("Привет", Direction::RuEn),
            Some("Hello".to_string())
        );
    }

    #[test]
    fn test_text_replacement() {
        assert_eq!(
            translate_text("Hello world!", Direction::EnRu),
            "Привет мир!"
        );
        assert_eq!(
            translate_text("Мой сервер и клиент", Direction::RuEn),
            "Мой server и client"
        );
        // 未收录的词保持不变
        assert_eq!(
            translate_text("unknown words stay", Direction::EnRu),
            "unknown words stay"
        );
    }
}
