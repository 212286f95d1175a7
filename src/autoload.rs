use log::{debug, error};

use crate::exception::{Diagnostic, Exception};
use crate::loader::{ClassResolver, LoadedClass};

/// 自动加载注册表：按注册顺序排列的加载器列表。
///
/// 进程启动时为空，引导期填充，之后只在"类未找到"事件时被查询，
/// 正常运行期间不会清空，只随进程重启重置。
pub struct AutoloadRegistry {
    loaders: Vec<Box<dyn ClassResolver>>,
    resolved_count: u64,
}

impl AutoloadRegistry {
    /// 进程启动时的初始化：空注册表
    pub fn init() -> Self {
        Self {
            loaders: Vec::new(),
            resolved_count: 0,
        }
    }

    /// 把加载器插到队首。未配置的加载器在注册时即被拒绝。
    pub fn prepend(&mut self, loader: Box<dyn ClassResolver>) -> Result<(), Exception> {
        if !loader.is_configured() {
            return Err(Exception::MisconfiguredLoader);
        }
        self.loaders.insert(0, loader);
        Ok(())
    }

    /// 把加载器追加到队尾。未配置的加载器在注册时即被拒绝。
    pub fn append(&mut self, loader: Box<dyn ClassResolver>) -> Result<(), Exception> {
        if !loader.is_configured() {
            return Err(Exception::MisconfiguredLoader);
        }
        self.loaders.push(loader);
        Ok(())
    }

    /// 按列表顺序依次调用各加载器，首个成功者胜出。
    ///
    /// 单个加载器的未命中是静默的；只有所有加载器都失败后
    /// 才升级为致命的 `ClassNotFound`，并携带类名用于诊断。
    pub fn resolve(&mut self, class_name: &str) -> Result<LoadedClass, Exception> {
        for (index, loader) in self.loaders.iter_mut().enumerate() {
            if let Some(loaded) = loader.resolve(class_name) {
                debug!("第{}个加载器解析成功：{}", index + 1, class_name);
                self.resolved_count += 1;
                return Ok(loaded);
            }
        }

        let report = Diagnostic::new("class resolution failed")
            .with_class(class_name)
            .with_code(404)
            .with_hint("check namespace mappings and class map")
            .build();
        error!("{}", report);
        Err(Exception::ClassNotFound(class_name.to_string()))
    }

    /// 已注册的加载器数量
    pub fn loader_count(&self) -> usize {
        self.loaders.len()
    }

    /// 自引导以来成功解析的类数量
    pub fn resolved_count(&self) -> u64 {
        self.resolved_count
    }

    /// 所有加载器从磁盘读入的源码字节数合计
    pub fn bytes_loaded(&self) -> u64 {
        self.loaders.iter().map(|l| l.bytes_loaded()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use std::path::PathBuf;

    /// 以固定结果应答的桩加载器
    struct StubResolver {
        tag: &'static str,
        hit: bool,
        configured: bool,
    }

    impl StubResolver {
        fn hit(tag: &'static str) -> Self {
            Self {
                tag,
                hit: true,
                configured: true,
            }
        }

        fn miss() -> Self {
            Self {
                tag: "",
                hit: false,
                configured: true,
            }
        }

        fn unconfigured() -> Self {
            Self {
                tag: "",
                hit: false,
                configured: false,
            }
        }
    }

    impl ClassResolver for StubResolver {
        fn resolve(&mut self, class_name: &str) -> Option<LoadedClass> {
            if !self.hit {
                return None;
            }
            Some(LoadedClass::new(
                class_name,
                PathBuf::from(format!("/{}/hit.php", self.tag)),
                Bytes::new(),
            ))
        }

        fn is_configured(&self) -> bool {
            self.configured
        }
    }

    #[test]
    fn test_init_is_empty() {
        let registry = AutoloadRegistry::init();
        assert_eq!(registry.loader_count(), 0);
        assert_eq!(registry.resolved_count(), 0);
    }

    #[test]
    fn test_prepend_runs_before_append() {
        let mut registry = AutoloadRegistry::init();
        registry.append(Box::new(StubResolver::hit("second"))).unwrap();
        registry.prepend(Box::new(StubResolver::hit("first"))).unwrap();

        let loaded = registry.resolve(r"App\Foo").unwrap();
        assert_eq!(loaded.path(), PathBuf::from("/first/hit.php").as_path());
    }

    #[test]
    fn test_falls_through_to_next_loader() {
        let mut registry = AutoloadRegistry::init();
        registry.append(Box::new(StubResolver::miss())).unwrap();
        registry.append(Box::new(StubResolver::hit("backup"))).unwrap();

        let loaded = registry.resolve(r"App\Foo").unwrap();
        assert_eq!(loaded.path(), PathBuf::from("/backup/hit.php").as_path());
        assert_eq!(registry.resolved_count(), 1);
    }

    #[test]
    fn test_total_miss_is_class_not_found() {
        let mut registry = AutoloadRegistry::init();
        registry.append(Box::new(StubResolver::miss())).unwrap();
        registry.append(Box::new(StubResolver::miss())).unwrap();

        let result = registry.resolve(r"App\Ghost");
        match result {
            Err(Exception::ClassNotFound(name)) => assert_eq!(name, r"App\Ghost"),
            other => panic!("Expected ClassNotFound, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_empty_registry_is_class_not_found() {
        let mut registry = AutoloadRegistry::init();
        assert!(matches!(
            registry.resolve(r"App\Foo"),
            Err(Exception::ClassNotFound(_))
        ));
    }

    #[test]
    fn test_unconfigured_loader_rejected_at_registration() {
        let mut registry = AutoloadRegistry::init();

        let prepend = registry.prepend(Box::new(StubResolver::unconfigured()));
        assert!(matches!(prepend, Err(Exception::MisconfiguredLoader)));

        let append = registry.append(Box::new(StubResolver::unconfigured()));
        assert!(matches!(append, Err(Exception::MisconfiguredLoader)));

        assert_eq!(registry.loader_count(), 0);
    }
}
