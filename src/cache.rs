use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};
use std::time::SystemTime;

use bytes::Bytes;
use lru::LruCache;

use crate::exception::Exception;

/// 类名到文件路径映射的缓存能力。
///
/// `get` 对缺失的键返回 `None`，永不报错；`add` 返回写入是否成功，
/// 只读变体通过返回 `true` 表示"无需持久化"。
#[cfg_attr(test, mockall::automock)]
pub trait ClassCache {
    fn add(&mut self, class_name: &str, path: &str) -> bool;
    fn get(&self, class_name: &str) -> Option<String>;
}

/// 固定映射缓存：由构建期生成的类映射表支撑，运行期不可变。
pub struct StaticClassMap {
    map: HashMap<String, String>,
}

impl StaticClassMap {
    // 从键值对构造
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            map: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// 从预生成的 JSON 类映射文件构造。
    /// 文件内容应为 `{"App\\Foo": "/srv/app/src/Foo.php", ...}` 形式的对象。
    pub fn from_json_file(path: &str) -> Result<Self, Exception> {
        let raw = std::fs::read_to_string(path)
            .map_err(|_| Exception::InvalidClassMap(path.to_string()))?;
        let map: HashMap<String, String> = serde_json::from_str(&raw)
            .map_err(|_| Exception::InvalidClassMap(path.to_string()))?;
        Ok(Self { map })
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.map.len()
    }
}

impl ClassCache for StaticClassMap {
    /// 映射表是构建期产物，运行期写入是刻意的空操作
    fn add(&mut self, _class_name: &str, _path: &str) -> bool {
        true
    }

    fn get(&self, class_name: &str) -> Option<String> {
        self.map.get(class_name).cloned()
    }
}

/// 进程级键值存储，APCu 的同进程模拟。
///
/// 句柄克隆后在各 worker 间共享同一份底层存储；同键并发写入为
/// 后写覆盖，类名到路径的映射值稳定，竞争是幂等的。
#[derive(Clone)]
pub struct SharedStore {
    inner: Arc<Mutex<HashMap<String, String>>>,
}

impl SharedStore {
    /// 按后端名称打开存储。
    ///
    /// 当前运行时只内建 `memory` 后端；其余名称视为扩展缺失，
    /// 构造立即失败，框架不应以不可用的缓存配置继续启动。
    pub fn open(backend: &str) -> Result<Self, Exception> {
        match backend {
            "memory" => Ok(Self {
                inner: Arc::new(Mutex::new(HashMap::new())),
            }),
            _ => Err(Exception::ExtensionUnavailable),
        }
    }

    pub fn store(&self, key: &str, value: &str) -> bool {
        match self.inner.lock() {
            Ok(mut guard) => {
                guard.insert(key.to_string(), value.to_string());
                true
            }
            // 锁中毒降级为"写入失败"，由调用方按非致命处理
            Err(_) => false,
        }
    }

    pub fn fetch(&self, key: &str) -> Option<String> {
        match self.inner.lock() {
            Ok(guard) => guard.get(key).cloned(),
            Err(_) => None,
        }
    }
}

/// 进程缓存变体：把 `ClassCache` 契约落在共享存储上。
pub struct ProcessCache {
    store: SharedStore,
}

impl ProcessCache {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }
}

impl ClassCache for ProcessCache {
    fn add(&mut self, class_name: &str, path: &str) -> bool {
        self.store.store(class_name, path)
    }

    fn get(&self, class_name: &str) -> Option<String> {
        self.store.fetch(class_name)
    }
}

#[derive(Clone)]
struct SourceEntry {
    source: Bytes,
    modified_time: SystemTime,
}

/// 已加载源码文件的 LRU 缓存，按修改时间校验有效性。
pub struct SourceCache {
    cache: LruCache<String, SourceEntry>,
}

impl SourceCache {
    // 根据容量构造
    pub fn from_capacity(capacity: usize) -> Self {
        if capacity == 0 {
            panic!("调用from_capacity时指定的大小是0。如果需要自动设置大小，请在调用处进行处理，而不是传入0");
        }
        Self {
            cache: LruCache::new(NonZeroUsize::new(capacity).unwrap()),
        }
    }

    // 放入
    pub fn push(&mut self, path: &str, source: Bytes, modified_time: SystemTime) {
        let entry = SourceEntry {
            source,
            modified_time,
        };
        self.cache.put(path.to_string(), entry);
    }

    // 检查文件大小是否适合缓存
    pub fn should_cache(file_size: u64, threshold: u64) -> bool {
        file_size <= threshold
    }

    // 查询有效缓存
    pub fn find(&mut self, path: &str, current_modified_time: SystemTime) -> Option<&Bytes> {
        match self.cache.get(path) {
            Some(entry) if entry.modified_time == current_modified_time => Some(&entry.source),
            _ => None,
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    #[cfg(test)]
    pub fn capacity(&self) -> usize {
        self.cache.cap().get()
    }
}
