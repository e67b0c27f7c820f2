//! 翻译缓存模块
//!
//! 有界的 FIFO 缓存：按插入顺序淘汰，读取不刷新位置（不是 LRU）。
//! 缓存是进程级共享的，映射和插入顺序队列必须在同一把锁下变更，
//! 避免检查-后-写入序列被并发请求交错。

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// 生成缓存键
pub fn cache_key(from: &str, to: &str, text: &str) -> String {
    format!("{}|{}|{}", from, to, text)
}

/// 缓存统计信息
#[derive(Debug, Default, Clone)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub insertions: u64,
    pub evictions: u64,
}

struct CacheInner {
    map: HashMap<String, String>,
    order: VecDeque<String>,
    stats: CacheStats,
}

/// 翻译缓存
pub struct TranslationCache {
    capacity: usize,
    inner: Mutex<CacheInner>,
}

impl TranslationCache {
    /// 创建指定容量的缓存
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            inner: Mutex::new(CacheInner {
                map: HashMap::new(),
                order: VecDeque::new(),
                stats: CacheStats::default(),
            }),
        }
    }

    /// 查询缓存，不影响淘汰顺序
    pub fn get(&self, key: &str) -> Option<String> {
        let mut inner = self.inner.lock().unwrap();
        match inner.map.get(key).cloned() {
            Some(value) => {
                inner.stats.hits += 1;
                Some(value)
            }
            None => {
                inner.stats.misses += 1;
                None
            }
        }
    }

    /// 插入缓存条目
    ///
    /// 已存在的键只更新值、不改变插入顺序；容量溢出时淘汰最老的条目。
    pub fn put(&self, key: String, value: String) {
        let mut inner = self.inner.lock().unwrap();
        inner.stats.insertions += 1;
        if inner.map.insert(key.clone(), value).is_none() {
            inner.order.push_back(key);
        }
        while inner.map.len() > self.capacity {
            match inner.order.pop_front() {
                Some(oldest) => {
                    inner.map.remove(&oldest);
                    inner.stats.evictions += 1;
                }
                None => break,
            }
        }
    }

    /// 当前条目数
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().map.len()
    }

    /// 缓存是否为空
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 获取统计信息快照
    pub fn stats(&self) -> CacheStats {
        self.inner.lock().unwrap().stats.clone()
    }

    /// 清空缓存
    pub fn clear(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.map.clear();
        inner.order.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_operations() {
        let cache = TranslationCache::new(10);
        cache.put(cache_key("en", "ru", "hello"), "привет".to_string());
        assert_eq!(
            cache.get(&cache_key("en", "ru", "hello")),
            Some("привет".to_string())
        );
        assert_eq!(cache.get(&cache_key("en", "ru", "world")), None);
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_fifo_evicts_exactly_first_inserted() {
        let cache = TranslationCache::new(3);
        cache.put("k1".to_string(), "v1".to_string());
        cache.put("k2".to_string(), "v2".to_string());
        cache.put("k3".to_string(), "v3".to_string());

        // 读取 k1 不应该刷新它的位置
        assert_eq!(cache.get("k1"), Some("v1".to_string()));

        cache.put("k4".to_string(), "v4".to_string());
        assert_eq!(cache.len(), 3);
        assert_eq!(cache.get("k1"), None);
        assert_eq!(cache.get("k2"), Some("v2".to_string()));
        assert_eq!(cache.get("k3"), Some("v3".to_string()));
        assert_eq!(cache.get("k4"), Some("v4".to_string()));
    }

    #[test]
    fn test_overwrite_keeps_insertion_order() {
        let cache = TranslationCache::new(2);
        cache.put("k1".to_string(), "v1".to_string());
        cache.put("k2".to_string(), "v2".to_string());
        // 重写 k1 不改变它作为最老条目的地位
        cache.put("k1".to_string(), "v1b".to_string());
        cache.put("k3".to_string(), "v3".to_string());

        assert_eq!(cache.get("k1"), None);
        assert_eq!(cache.get("k2"), Some("v2".to_string()));
        assert_eq!(cache.get("k3"), Some("v3".to_string()));
    }

    #[test]
    fn test_stats() {
        let cache = TranslationCache::new(2);
        cache.put("k1".to_string(), "v1".to_string());
        cache.get("k1");
        cache.get("missing");

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.insertions, 1);
    }
}
