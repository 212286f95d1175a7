// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 类加载器模块
//!
//! 该模块是自动加载器的核心组件之一，负责把完全限定类名翻译为
//! 磁盘上的源码文件并读入其内容。它涵盖了：
//! 1. 类路径缓存的优先查询（命中且文件仍存在时跳过目录搜索）。
//! 2. 命名空间注册表候选路径的顺序试探。
//! 3. 解析成功后把类名到路径的映射写回缓存（写入失败不影响本次解析）。
//! 4. 借助源码缓存避免热点类文件的重复磁盘读取。

use std::fs;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use log::{debug, error, warn};

use crate::cache::{ClassCache, SourceCache};
use crate::param::{DEFAULT_CACHE_FILE_THRESHOLD, DEFAULT_SOURCE_CACHE_CAP};
use crate::registry::NamespaceRegistry;
use crate::util::is_valid_class_name;

/// 解析成功后交还给宿主运行时的"已加载定义"。
#[derive(Debug, Clone)]
pub struct LoadedClass {
    /// 完全限定类名
    name: String,
    /// 源码文件的磁盘路径
    path: PathBuf,
    /// 源码内容
    source: Bytes,
}

impl LoadedClass {
    /// 供 `ClassResolver` 实现方构造解析结果
    pub fn new(name: &str, path: PathBuf, source: Bytes) -> Self {
        Self {
            name: name.to_string(),
            path,
            source,
        }
    }

    /// 获取完全限定类名
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 获取源码文件路径
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 获取源码内容
    pub fn source(&self) -> &Bytes {
        &self.source
    }
}

/// "把类名解析为已加载定义"的能力。
///
/// 自动加载注册表对该特征做多态迭代，`Loader` 是其标准实现。
pub trait ClassResolver {
    /// 尝试解析类名；失败返回 `None`，不自行升级为错误。
    /// 是否致命由注册表在所有解析器都失败之后裁决。
    fn resolve(&mut self, class_name: &str) -> Option<LoadedClass>;

    /// 解析器是否具备可用配置。注册表在注册时拒绝未配置的解析器。
    fn is_configured(&self) -> bool {
        true
    }

    /// 该解析器从磁盘读入的源码字节数，用于状态报告
    fn bytes_loaded(&self) -> u64 {
        0
    }
}

/// 标准类加载器：一个可选的类路径缓存加一个命名空间注册表。
pub struct Loader {
    cache: Option<Box<dyn ClassCache>>,
    registry: NamespaceRegistry,
    sources: SourceCache,
    threshold: u64,
    bytes_loaded: u64,
}

impl Loader {
    pub fn new(cache: Option<Box<dyn ClassCache>>, registry: NamespaceRegistry) -> Self {
        Self::with_limits(
            cache,
            registry,
            DEFAULT_SOURCE_CACHE_CAP,
            DEFAULT_CACHE_FILE_THRESHOLD,
        )
    }

    /// 指定源码缓存容量与单文件缓存阈值构造
    pub fn with_limits(
        cache: Option<Box<dyn ClassCache>>,
        registry: NamespaceRegistry,
        source_cache_cap: usize,
        threshold: u64,
    ) -> Self {
        Self {
            cache,
            registry,
            sources: SourceCache::from_capacity(source_cache_cap),
            threshold,
            bytes_loaded: 0,
        }
    }

    /// 引导期的命名空间登记入口，直接委托给注册表
    pub fn add_namespace(&mut self, prefix: &str, base_dir: impl Into<PathBuf>) {
        self.registry.add_namespace(prefix, base_dir);
    }

    /// 读入文件内容，优先走源码缓存。
    ///
    /// 修改时间与缓存条目不一致时重新读盘并刷新缓存；
    /// 超过阈值的大文件只读取、不缓存。
    fn load_file(&mut self, path: &Path) -> Option<Bytes> {
        let metadata = match fs::metadata(path) {
            Ok(m) if m.is_file() => m,
            _ => return None,
        };

        let key = path.to_string_lossy().to_string();
        let modified = metadata.modified().ok();

        if let Some(time) = modified {
            if let Some(source) = self.sources.find(&key, time) {
                debug!("源码缓存命中：{}", key);
                return Some(source.clone());
            }
        }

        let raw = match fs::read(path) {
            Ok(raw) => raw,
            Err(e) => {
                error!("读取类文件失败：{}，错误：{}", key, e);
                return None;
            }
        };
        self.bytes_loaded += raw.len() as u64;
        let source = Bytes::from(raw);

        if let Some(time) = modified {
            if SourceCache::should_cache(metadata.len(), self.threshold) {
                self.sources.push(&key, source.clone(), time);
            }
        }
        Some(source)
    }
}

impl ClassResolver for Loader {
    /// # 解析算法
    ///
    /// 1. 如果配置了缓存，先查缓存；命中且路径上的文件仍存在则直接加载返回。
    /// 2. 否则向命名空间注册表索取候选路径，按顺序试探。
    /// 3. 第一个存在的候选即为结果；加载它。
    /// 4. 加载成功后把映射写回缓存，写入失败仅记录警告。
    /// 5. 没有候选命中时返回 `None`。
    fn resolve(&mut self, class_name: &str) -> Option<LoadedClass> {
        if !is_valid_class_name(class_name) {
            warn!("类名不合法，按未命中处理：{}", class_name);
            return None;
        }

        // 1. 缓存优先
        let cached = self.cache.as_ref().and_then(|cache| cache.get(class_name));
        if let Some(cached) = cached {
            let path = PathBuf::from(&cached);
            if let Some(source) = self.load_file(&path) {
                debug!("类路径缓存命中：{} -> {}", class_name, cached);
                return Some(LoadedClass {
                    name: class_name.to_string(),
                    path,
                    source,
                });
            }
            // 缓存里的路径已失效，继续走目录搜索
            debug!("缓存路径已失效：{} -> {}", class_name, cached);
        }

        // 2. 目录搜索，候选按注册顺序试探
        for candidate in self.registry.resolve(class_name) {
            if !candidate.is_file() {
                continue;
            }
            let source = self.load_file(&candidate)?;

            // 3. 解析成功，回写缓存；失败非致命
            if let Some(cache) = &mut self.cache {
                match candidate.to_str() {
                    Some(path_str) => {
                        if !cache.add(class_name, path_str) {
                            warn!("类路径缓存写入失败：{}，本次解析不受影响", class_name);
                        }
                    }
                    None => {
                        warn!("候选路径不是合法UTF-8，跳过缓存写入：{}", class_name);
                    }
                }
            }
            return Some(LoadedClass {
                name: class_name.to_string(),
                path: candidate,
                source,
            });
        }

        debug!("加载器未能解析类：{}", class_name);
        None
    }

    fn is_configured(&self) -> bool {
        self.cache.is_some() || !self.registry.is_empty()
    }

    fn bytes_loaded(&self) -> u64 {
        self.bytes_loaded
    }
}
