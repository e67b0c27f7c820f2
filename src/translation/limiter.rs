//! 提供方限流队列
//!
//! 免费层翻译接口对请求频率敏感，触发滥用检测会被封禁。
//! 这里用公平信号量限制在途请求数，并在任意两次请求启动之间
//! 强制一个最小间隔。任务按提交顺序（FIFO）派发，完成顺序不保证；
//! 单个任务的失败不影响其他任务。

use std::future::Future;
use std::time::{Duration, Instant};

use tokio::sync::{Mutex, Semaphore};

/// 限流器
pub struct RateLimiter {
    permits: Semaphore,
    last_start: Mutex<Option<Instant>>,
    min_interval: Duration,
}

impl RateLimiter {
    /// 创建限流器
    pub fn new(concurrency: usize, min_interval: Duration) -> Self {
        Self {
            permits: Semaphore::new(concurrency),
            last_start: Mutex::new(None),
            min_interval,
        }
    }

    /// 在限流约束下执行任务
    ///
    /// 先获取并发许可（tokio 信号量是公平的，等待者按 FIFO 唤醒），
    /// 再在间隔锁内等到距上一次启动至少 `min_interval`，然后运行任务。
    /// 许可持有到任务结束，结束后下一个排队任务立即可派发。
    pub async fn run<F, T>(&self, task: F) -> T
    where
        F: Future<Output = T>,
    {
        let _permit = self
            .permits
            .acquire()
            .await
            .expect("limiter semaphore closed");

        {
            let mut last_start = self.last_start.lock().await;
            if let Some(previous) = *last_start {
                let since = previous.elapsed();
                if since < self.min_interval {
                    tokio::time::sleep(self.min_interval - since).await;
                }
            }
            *last_start = Some(Instant::now());
        }

        task.await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_minimum_spacing_between_starts() {
        let limiter = Arc::new(RateLimiter::new(2, Duration::from_millis(50)));
        let starts = Arc::new(Mutex::new(Vec::new()));

        let mut handles = Vec::new();
        for _ in 0..3 {
            let limiter = limiter.clone();
            let starts = starts.clone();
            handles.push(tokio::spawn(async move {
                limiter
                    .run(async {
                        starts.lock().await.push(Instant::now());
                    })
                    .await;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let mut recorded = starts.lock().await.clone();
        recorded.sort();
        assert_eq!(recorded.len(), 3);
        for pair in recorded.windows(2) {
            let gap = pair[1].duration_since(pair[0]);
            assert!(gap >= Duration::from_millis(45), "gap too small: {:?}", gap);
        }
    }

    #[tokio::test]
    async fn test_failure_does_not_block_queue() {
        let limiter = Arc::new(RateLimiter::new(1, Duration::from_millis(1)));

        let failed: Result<(), &str> = limiter.run(async { Err("boom") }).await;
        assert!(failed.is_err());

        let ok: Result<i32, &str> = limiter.run(async { Ok(7) }).await;
        assert_eq!(ok, Ok(7));
    }
}
