use std::collections::HashMap;
use std::path::PathBuf;

use log::debug;

use crate::param::{CLASS_FILE_EXT, NS_SEPARATOR};
use crate::util::class_to_relative_path;

/// 命名空间前缀到基目录列表的注册表。
///
/// 前缀在片段边界上做最长匹配；同一前缀可以注册多个基目录，
/// 注册顺序即查找顺序。映射在引导期写入，之后只读。
pub struct NamespaceRegistry {
    prefixes: HashMap<String, Vec<PathBuf>>,
    extension: String,
}

impl NamespaceRegistry {
    pub fn new() -> Self {
        Self::with_extension(CLASS_FILE_EXT)
    }

    /// 使用非默认的类文件扩展名构造（例如 `inc`）
    pub fn with_extension(extension: &str) -> Self {
        Self {
            prefixes: HashMap::new(),
            extension: extension.to_string(),
        }
    }

    /// 为前缀追加一个基目录；前缀不存在时创建列表。没有移除接口。
    pub fn add_namespace(&mut self, prefix: &str, base_dir: impl Into<PathBuf>) {
        self.prefixes
            .entry(prefix.to_string())
            .or_default()
            .push(base_dir.into());
    }

    /// 产出类名的候选文件路径序列。
    ///
    /// 只使用最长匹配前缀对应的目录列表，按注册顺序产出；
    /// 最长前缀下没有命中文件时不会回退到更短的前缀，
    /// 这是对"无静默跨前缀回退"策略的刻意保留。
    pub fn resolve(&self, class_name: &str) -> Vec<PathBuf> {
        let prefix = match self.longest_prefix(class_name) {
            Some(p) => p,
            None => return Vec::new(),
        };

        if prefix.len() == class_name.len() {
            // 前缀即完整类名，剩余部分为空，没有可映射的文件
            return Vec::new();
        }

        let remainder = &class_name[prefix.len() + 1..];
        let relative = class_to_relative_path(remainder, &self.extension);
        debug!(
            "命名空间前缀'{}'命中，剩余部分映射为相对路径：{}",
            prefix,
            relative.display()
        );

        self.prefixes[prefix]
            .iter()
            .map(|dir| dir.join(&relative))
            .collect()
    }

    /// 在片段边界上查找最长匹配前缀。
    ///
    /// `App` 匹配 `App\Foo` 但不匹配 `Apple\Foo`。
    fn longest_prefix(&self, class_name: &str) -> Option<&str> {
        self.prefixes
            .keys()
            .filter(|prefix| {
                class_name == prefix.as_str()
                    || (class_name.starts_with(prefix.as_str())
                        && class_name[prefix.len()..].starts_with(NS_SEPARATOR))
            })
            .max_by_key(|prefix| prefix.len())
            .map(|prefix| prefix.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    pub fn prefix_count(&self) -> usize {
        self.prefixes.len()
    }
}

impl Default for NamespaceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_single_prefix() {
        let mut registry = NamespaceRegistry::new();
        registry.add_namespace("App", "/srv/app/src");

        let candidates = registry.resolve(r"App\Models\User");
        let expected: PathBuf = ["/srv/app/src", "Models", "User.php"].iter().collect();

        assert_eq!(candidates, vec![expected]);
    }

    #[test]
    fn test_longest_prefix_wins() {
        let mut registry = NamespaceRegistry::new();
        registry.add_namespace("A", "/dirA");
        registry.add_namespace(r"A\B", "/dirAB");

        let candidates = registry.resolve(r"A\B\C");
        let expected: PathBuf = ["/dirAB", "C.php"].iter().collect();

        // 更长的前缀独占匹配，较短前缀的目录不出现在候选中
        assert_eq!(candidates, vec![expected]);
    }

    #[test]
    fn test_prefix_matches_on_segment_boundary() {
        let mut registry = NamespaceRegistry::new();
        registry.add_namespace("App", "/srv/app");

        assert!(registry.resolve(r"Apple\Foo").is_empty());
        assert!(!registry.resolve(r"App\Foo").is_empty());
    }

    #[test]
    fn test_directories_in_registration_order() {
        let mut registry = NamespaceRegistry::new();
        registry.add_namespace("App", "/first");
        registry.add_namespace("App", "/second");

        let candidates = registry.resolve(r"App\Foo");
        let first: PathBuf = ["/first", "Foo.php"].iter().collect();
        let second: PathBuf = ["/second", "Foo.php"].iter().collect();

        assert_eq!(candidates, vec![first, second]);
    }

    #[test]
    fn test_no_matching_prefix_yields_empty() {
        let mut registry = NamespaceRegistry::new();
        registry.add_namespace("App", "/srv/app");

        assert!(registry.resolve(r"Vendor\Lib\Thing").is_empty());
    }

    #[test]
    fn test_prefix_equal_to_class_name_yields_empty() {
        let mut registry = NamespaceRegistry::new();
        registry.add_namespace(r"App\Foo", "/srv/app");

        assert!(registry.resolve(r"App\Foo").is_empty());
    }

    #[test]
    fn test_custom_extension() {
        let mut registry = NamespaceRegistry::with_extension("inc");
        registry.add_namespace("Legacy", "/opt/legacy");

        let candidates = registry.resolve(r"Legacy\Mailer");
        let expected: PathBuf = ["/opt/legacy", "Mailer.inc"].iter().collect();

        assert_eq!(candidates, vec![expected]);
    }

    #[test]
    fn test_empty_registry_resolves_nothing() {
        let registry = NamespaceRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.resolve(r"App\Foo").is_empty());
    }
}
