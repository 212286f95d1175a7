//! # 引导管线模块
//!
//! 框架可用之前必须按固定顺序完成一组装配步骤：准备类路径缓存、
//! 登记命名空间映射、构造加载器并把它注册进自动加载注册表。
//! 该模块把这条线性管线封装为 `Bootloader`，产出持有注册表的 `Kernel`。
//! 构造期的配置错误立即中止引导，不会延迟到解析期暴露。

use chrono::{DateTime, Local};
use log::{info, warn};

use crate::autoload::AutoloadRegistry;
use crate::cache::{ClassCache, ProcessCache, SharedStore, StaticClassMap};
use crate::config::Config;
use crate::exception::Exception;
use crate::loader::{LoadedClass, Loader};
use crate::param::LOADER_NAME;
use crate::registry::NamespaceRegistry;
use crate::util::format_file_size;

/// 引导完成后的运行时核心：持有自动加载注册表与启动元数据。
pub struct Kernel {
    autoload: AutoloadRegistry,
    boot_time: DateTime<Local>,
}

impl Kernel {
    /// 解析类名，委托给自动加载注册表
    pub fn resolve(&mut self, class_name: &str) -> Result<LoadedClass, Exception> {
        self.autoload.resolve(class_name)
    }

    /// 宿主可在引导后继续注册额外的加载器
    pub fn autoload_mut(&mut self) -> &mut AutoloadRegistry {
        &mut self.autoload
    }

    /// 渲染运行状态报告，供管理控制台输出
    pub fn report(&self) -> String {
        format!(
            "== {} 状态 ===\n启动时间: {}\n已注册加载器: {}\n已解析类: {}\n已读源码: {}\n====================",
            LOADER_NAME,
            self.boot_time.format("%Y-%m-%d %H:%M:%S %Z"),
            self.autoload.loader_count(),
            self.autoload.resolved_count(),
            format_file_size(self.autoload.bytes_loaded()),
        )
    }
}

/// 引导器：把配置翻译为一系列装配步骤并顺序执行。
pub struct Bootloader {
    config: Config,
}

impl Bootloader {
    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    /// # 引导序列
    ///
    /// 各步骤严格按序执行，任何一步失败都让引导整体失败。
    pub fn boot(self) -> Result<Kernel, Exception> {
        // 1. 类路径缓存准备：类映射文件优先于运行期后端
        let cache: Option<Box<dyn ClassCache>> = if let Some(map_path) = self.config.class_map() {
            let map = StaticClassMap::from_json_file(map_path)?;
            info!("类映射文件已载入：{}", map_path);
            Some(Box::new(map))
        } else {
            match self.config.cache_backend() {
                "off" => {
                    warn!("类路径缓存已禁用，每次解析都将执行目录搜索");
                    None
                }
                backend => {
                    let store = SharedStore::open(backend)?;
                    info!("进程缓存后端'{}'已就绪", backend);
                    Some(Box::new(ProcessCache::new(store)))
                }
            }
        };

        // 2. 命名空间映射登记
        let mut registry = NamespaceRegistry::with_extension(self.config.extension());
        for entry in self.config.namespaces() {
            for dir in entry.directories() {
                registry.add_namespace(entry.prefix(), dir);
            }
        }
        info!("命名空间映射已登记，共{}个前缀", registry.prefix_count());

        // 3. 构造加载器
        let loader = Loader::with_limits(
            cache,
            registry,
            self.config.source_cache_size(),
            self.config.cache_file_threshold(),
        );

        // 4. 注册进自动加载注册表
        let mut autoload = AutoloadRegistry::init();
        autoload.prepend(Box::new(loader))?;
        info!("加载器已注册，{}就绪", LOADER_NAME);

        // 5. 组装 Kernel
        Ok(Kernel {
            autoload,
            boot_time: Local::now(),
        })
    }
}
