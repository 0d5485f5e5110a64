//! 有界的插入序结果缓存。
//!
//! 整条消息与分段两个缓存作用域共用同一实现。淘汰策略为先插入先淘汰，
//! 读取不改变次序；覆盖写保留键的原插入位置。整条消息缓存是进程级共享的
//! 单例，分段缓存由各引擎实例私有。

use std::collections::{HashMap, VecDeque};
use std::sync::{LazyLock, Mutex, MutexGuard};

use crate::common::config::MESSAGE_CACHE_CAPACITY;

/// 容量受限的字符串结果缓存，按插入顺序淘汰
///
/// 缓存键在相同密钥材料下是纯函数：同一键永远映射到同一存储值。
#[derive(Debug)]
pub struct MemoCache {
    entries: HashMap<String, String>,
    order: VecDeque<String>,
    capacity: usize,
}

impl MemoCache {
    /// 创建指定容量的缓存；容量为 0 时所有写入都会被丢弃
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            capacity,
        }
    }

    /// 读取缓存值，不改变淘汰次序
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// 写入缓存值
    ///
    /// 新键在容量已满时先淘汰最早插入的键；已存在的键只更新值，
    /// 保留原插入位置。
    pub fn put(&mut self, key: String, value: String) {
        if self.capacity == 0 {
            return;
        }

        if let Some(slot) = self.entries.get_mut(&key) {
            *slot = value;
            return;
        }

        if self.entries.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            }
        }

        self.order.push_back(key.clone());
        self.entries.insert(key, value);
    }

    /// 键是否在缓存中
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// 当前条目数
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 缓存是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 容量上限
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// 清空全部条目
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}

/// 进程级共享的整条消息缓存
///
/// 被全部引擎实例共享，键中携带密钥对指纹以区分不同密钥的结果。
static MESSAGE_CACHE: LazyLock<Mutex<MemoCache>> =
    LazyLock::new(|| Mutex::new(MemoCache::new(MESSAGE_CACHE_CAPACITY)));

/// 在持有锁的状态下访问共享消息缓存
///
/// 查后写的序列必须在同一次调用内完成，以保持插入序淘汰的正确性。
pub(crate) fn with_message_cache<T>(f: impl FnOnce(&mut MemoCache) -> T) -> T {
    let mut cache = lock_message_cache();
    f(&mut cache)
}

fn lock_message_cache() -> MutexGuard<'static, MemoCache> {
    MESSAGE_CACHE
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
