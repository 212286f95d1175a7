use std::path::PathBuf;

use crate::param::{CLASS_NAME_RE, NS_SEPARATOR, RESERVED_SEGMENTS};

/// 校验完全限定类名是否合法。
///
/// 除了正则形状检查外，还拒绝包含 PHP 保留字片段的名字，
/// 这类名字在 PHP 侧无法声明，查找文件没有意义。
pub fn is_valid_class_name(class_name: &str) -> bool {
    if !CLASS_NAME_RE.is_match(class_name) {
        return false;
    }
    for segment in class_name.split(NS_SEPARATOR) {
        if RESERVED_SEGMENTS.iter().any(|w| segment.eq_ignore_ascii_case(w)) {
            return false;
        }
    }
    true
}

/// 将去掉前缀后的类名剩余部分转换为相对文件路径。
///
/// 命名空间分隔符替换为平台目录分隔符，并追加扩展名。
/// 例如剩余部分 `Models\User` 与扩展名 `php` 产生 `Models/User.php`。
pub fn class_to_relative_path(remainder: &str, extension: &str) -> PathBuf {
    let mut relative = PathBuf::new();
    for segment in remainder.split(NS_SEPARATOR) {
        relative.push(segment);
    }
    relative.set_extension(extension);
    relative
}

pub fn format_file_size(size: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut size = size as f64;
    let mut unit = UNITS[0];
    for next in UNITS.iter().skip(1) {
        if size < 1024.0 {
            break;
        }
        size /= 1024.0;
        unit = next;
    }
    format!("{:.1} {}", size, unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_class_names() {
        assert!(is_valid_class_name(r"App\Models\User"));
        assert!(is_valid_class_name("Logger"));
        assert!(is_valid_class_name(r"Vendor\Package\Sub\Thing"));
    }

    #[test]
    fn test_invalid_shape_rejected() {
        assert!(!is_valid_class_name(""));
        assert!(!is_valid_class_name(r"\App\Foo"));
        assert!(!is_valid_class_name(r"App\9Lives"));
        assert!(!is_valid_class_name("App/Foo"));
    }

    #[test]
    fn test_reserved_segment_rejected() {
        assert!(!is_valid_class_name(r"App\Class"));
        assert!(!is_valid_class_name(r"Interface\Foo"));
        // 保留字大小写不敏感
        assert!(!is_valid_class_name(r"App\STATIC\Foo"));
    }

    #[test]
    fn test_class_to_relative_path() {
        let rel = class_to_relative_path(r"Models\User", "php");
        let expected: PathBuf = ["Models", "User.php"].iter().collect();
        assert_eq!(rel, expected);
    }

    #[test]
    fn test_class_to_relative_path_single_segment() {
        let rel = class_to_relative_path("Foo", "php");
        assert_eq!(rel, PathBuf::from("Foo.php"));
    }

    #[test]
    fn test_file_size() {
        assert_eq!(format_file_size(0), "0.0 B".to_string());
        assert_eq!(format_file_size(512), "512.0 B".to_string());
        assert_eq!(format_file_size(2048), "2.0 KB".to_string());
        assert_eq!(format_file_size(5242880), "5.0 MB".to_string());
        assert_eq!(format_file_size(1073741824), "1.0 GB".to_string());
    }
}
