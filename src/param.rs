// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 自动加载器参数与常量模块
//!
//! 该模块定义了 `shaneyale-autoloader` 遵循的类名解析相关常量和静态数据，包括：
//! - PSR-4 风格的命名空间分隔符与类文件扩展名。
//! - 类名合法性校验所使用的正则表达式。
//! - 不允许作为命名空间片段出现的 PHP 保留字列表。

use lazy_static::lazy_static;
use regex::Regex;

/// 命名空间分隔符（PSR-4 规范使用反斜杠）
pub const NS_SEPARATOR: char = '\\';

/// 类文件的默认扩展名
pub const CLASS_FILE_EXT: &str = "php";

/// 加载器名称标识，用于日志与状态报告
pub const LOADER_NAME: &str = "shaneyale-autoloader";

/// 源码缓存的默认容量（条目数）
pub const DEFAULT_SOURCE_CACHE_CAP: usize = 64;

/// 默认的缓存文件大小阈值，超过该大小的源码文件不进入缓存
pub const DEFAULT_CACHE_FILE_THRESHOLD: u64 = 1048576; // 1MB

lazy_static! {
    /// 完全限定类名的合法格式。
    ///
    /// 每个片段必须以字母或下划线开头，片段之间以反斜杠连接，
    /// 与 PHP 语言手册中对命名空间标识符的定义保持一致。
    pub static ref CLASS_NAME_RE: Regex =
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\\[A-Za-z_][A-Za-z0-9_]*)*$").unwrap();
}

lazy_static! {
    /// 不允许作为命名空间片段的 PHP 保留字。
    ///
    /// 以这些保留字命名的片段在 PHP 中无法通过编译，因此即使磁盘上存在
    /// 对应路径的文件，加载它也没有意义，校验阶段直接拒绝。
    pub static ref RESERVED_SEGMENTS: Vec<&'static str> = {
        vec![
            "abstract", "array", "callable", "class", "const", "enum",
            "extends", "final", "function", "implements", "interface",
            "list", "namespace", "new", "parent", "self", "static",
            "trait", "use",
        ]
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_name_regex_accepts_fqcn() {
        assert!(CLASS_NAME_RE.is_match(r"App\Models\User"));
        assert!(CLASS_NAME_RE.is_match("Foo"));
        assert!(CLASS_NAME_RE.is_match(r"_Vendor\pkg_1\Thing"));
    }

    #[test]
    fn test_class_name_regex_rejects_malformed() {
        assert!(!CLASS_NAME_RE.is_match(""));
        assert!(!CLASS_NAME_RE.is_match(r"\App\Foo"));
        assert!(!CLASS_NAME_RE.is_match(r"App\\Foo"));
        assert!(!CLASS_NAME_RE.is_match(r"App\1Foo"));
        assert!(!CLASS_NAME_RE.is_match(r"App\Foo\"));
        assert!(!CLASS_NAME_RE.is_match("App/Foo"));
    }

    #[test]
    fn test_reserved_segments_lowercase() {
        // 保留字表以小写存储，校验时统一转小写比较
        for word in RESERVED_SEGMENTS.iter() {
            assert_eq!(*word, word.to_lowercase());
        }
    }
}
