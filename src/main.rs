// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 自动加载器管理控制台
//!
//! 该模块实现了自动加载核心的宿主进程入口。
//! 核心功能包括：
//! - 基于 log4rs 的日志系统初始化
//! - 从 TOML 配置文件装配引导管线
//! - 交互式管理控制台（类解析指令、运行状态查询）

// --- 模块定义 ---
mod autoload;   // 自动加载注册表
mod bootstrap;  // 引导管线与 Kernel
mod cache;      // 类路径缓存与源码缓存
mod config;     // 配置解析与管理
mod exception;  // 自定义异常与错误处理
mod loader;     // 类加载器实现
mod param;      // 全局常量与静态参数
mod registry;   // 命名空间注册表
mod util;       // 通用工具函数

use bootstrap::Bootloader;
use config::Config;

use log::{error, info};
use log4rs;

use std::io::{self, BufRead, Write};

/// # 程序入口点
///
/// 初始化日志、加载配置、执行引导管线并进入管理控制台循环。
fn main() {
    // 1. 初始化日志系统：采用 log4rs 架构，通过外部 YAML 灵活配置级别与输出目的地
    log4rs::init_file("config/log4rs.yaml", Default::default()).unwrap();

    // 2. 环境配置加载：从 TOML 文件读取运行参数
    let config = Config::from_toml("config/development.toml");
    info!("配置文件已载入");

    // 3. 引导管线：装配缓存、命名空间映射与加载器
    let mut kernel = match Bootloader::from_config(config).boot() {
        Ok(kernel) => kernel,
        Err(e) => {
            error!("引导失败：{}", e);
            panic!("引导失败：{}", e);
        }
    };
    info!("引导完成，进入管理控制台");

    // 4. 管理控制台循环：逐行读取运维指令
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    print!("> ");
    let _ = stdout.flush();
    for line in stdin.lock().lines() {
        let input = match line {
            Ok(input) => input,
            Err(_) => break,
        };
        let cmd = input.trim();
        match cmd {
            "stop" => {
                println!("停机指令已激活，控制台即将退出...");
                break;
            }
            "help" => {
                println!("== Autoloader Help ==");
                println!("resolve <类名> - 解析完全限定类名");
                println!("status         - 查看当前运行状态");
                println!("stop           - 退出控制台");
                println!("help           - 显示此帮助信息");
                println!("====================");
            }
            "status" => {
                println!("{}", kernel.report());
            }
            _ if cmd.starts_with("resolve ") => {
                let class_name = cmd["resolve ".len()..].trim();
                match kernel.resolve(class_name) {
                    Ok(loaded) => {
                        println!(
                            "解析成功：{} -> {}（{}字节）",
                            loaded.name(),
                            loaded.path().display(),
                            loaded.source().len()
                        );
                    }
                    Err(e) => {
                        println!("解析失败：{}", e);
                    }
                }
            }
            "" => {}
            _ => {
                println!("无效的命令：{}", cmd);
            }
        }
        print!("> ");
        let _ = stdout.flush();
    }
    info!("管理控制台已退出");
}
