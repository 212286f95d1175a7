// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # Exception 模块
//!
//! 该模块定义了自动加载器在引导和类解析生命周期中可能抛出的各类异常情况。
//!
//! ## 设计意图
//! - **错误分类**：涵盖了缓存后端缺失、引导配置错误以及类解析失败三类场景。
//! - **传播策略**：构造期错误（缓存后端缺失、加载器配置错误）立即中止引导；
//!   解析期的失败在所有加载器都尝试过之后才升级为致命错误。
//! - **用户友好**：通过实现 `std::fmt::Display`，确保错误信息可以被安全地记录到日志。

use std::fmt;

/// 自动加载器在引导或解析过程中发生的异常类型。
///
/// 该枚举通常作为 `Result` 的 `Err` 部分返回，用于指示失败的具体原因。
#[derive(Debug, Clone)]
pub enum Exception {
    /// 进程级缓存所依赖的后端存储在当前运行环境中不可用。
    /// 这是构造期的前置条件检查，失败时框架无法以该缓存配置启动。
    ExtensionUnavailable,
    /// 所有已注册的加载器都无法解析请求的类名。携带类名以便诊断。
    /// 在类解析语义中这是致命错误，请求方无法在缺少该类的情况下继续。
    ClassNotFound(String),
    /// 注册进自动加载注册表的加载器缺少可用配置（既无缓存也无命名空间映射）。
    /// 这是注册期即被拒绝的编程错误，不会推迟到解析期暴露。
    MisconfiguredLoader,
    /// 预生成的类映射文件不存在或无法解析为合法的类名到路径映射。
    InvalidClassMap(String),
}

use Exception::*;

/// 为 `Exception` 实现 `Display` 特性，使其支持字符串格式化输出。
impl fmt::Display for Exception {
    /// 根据错误类型写入人类可读的描述文本。
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtensionUnavailable => write!(f, "Cache backend is not available in this runtime"),
            ClassNotFound(name) => write!(f, "Class not found: {}", name),
            MisconfiguredLoader => write!(f, "Loader has neither a cache nor namespace mappings"),
            InvalidClassMap(path) => write!(f, "Invalid class map file: {}", path),
        }
    }
}

/// 致命错误报告的链式构造器。
///
/// 解析彻底失败时，注册表用它拼装带有上下文的诊断文本写入日志。
/// 所有 `with_*` 方法返回自身，按需逐项填充。
#[derive(Debug, Default)]
pub struct Diagnostic {
    message: String,
    class_name: Option<String>,
    code: Option<u16>,
    hint: Option<String>,
}

impl Diagnostic {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
            ..Default::default()
        }
    }

    /// 附加引发错误的完全限定类名
    pub fn with_class(mut self, class_name: &str) -> Self {
        self.class_name = Some(class_name.to_string());
        self
    }

    /// 附加内部错误码
    pub fn with_code(mut self, code: u16) -> Self {
        self.code = Some(code);
        self
    }

    /// 附加给调用方的修复提示
    pub fn with_hint(mut self, hint: &str) -> Self {
        self.hint = Some(hint.to_string());
        self
    }

    /// 渲染为单行诊断文本
    pub fn build(&self) -> String {
        let mut report = self.message.clone();
        if let Some(code) = self.code {
            report.push_str(&format!(" [E{}]", code));
        }
        if let Some(name) = &self.class_name {
            report.push_str(&format!(" class='{}'", name));
        }
        if let Some(hint) = &self.hint {
            report.push_str(&format!(" hint: {}", hint));
        }
        report
    }
}
