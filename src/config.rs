use serde_derive::Deserialize;
use serde_derive::Serialize;

use core::str;
use log::{error, warn};
use std::fs::File;
use std::io::prelude::*;

use crate::param::{CLASS_FILE_EXT, DEFAULT_CACHE_FILE_THRESHOLD, DEFAULT_SOURCE_CACHE_CAP};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct NamespaceEntry {
    prefix: String,
    directories: Vec<String>,
}

impl NamespaceEntry {
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn directories(&self) -> &[String] {
        &self.directories
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Config {
    cache_backend: String,
    #[serde(default)]
    class_map: Option<String>,
    #[serde(default = "default_extension")]
    extension: String,
    #[serde(default = "default_source_cache_size")]
    source_cache_size: usize,
    #[serde(default = "default_cache_file_threshold")]
    cache_file_threshold: u64,
    #[serde(default)]
    namespaces: Vec<NamespaceEntry>,
}

fn default_extension() -> String {
    CLASS_FILE_EXT.to_string()
}

fn default_source_cache_size() -> usize {
    DEFAULT_SOURCE_CACHE_CAP
}

fn default_cache_file_threshold() -> u64 {
    DEFAULT_CACHE_FILE_THRESHOLD
}

impl Config {
    pub fn new() -> Self {
        Self {
            cache_backend: "memory".to_string(),
            class_map: None,
            extension: default_extension(),
            source_cache_size: default_source_cache_size(),
            cache_file_threshold: default_cache_file_threshold(),
            namespaces: vec![],
        }
    }

    pub fn from_toml(filename: &str) -> Self {
        let mut file = match File::open(filename) {
            Ok(f) => f,
            Err(e) => panic!("no such file {} exception:{}", filename, e),
        };
        let mut str_val = String::new();
        match file.read_to_string(&mut str_val) {
            Ok(s) => s,
            Err(e) => panic!("Error Reading file: {}", e),
        };

        let mut raw_config: Config = match toml::from_str(&str_val) {
            Ok(t) => t,
            Err(_) => {
                error!("无法成功从配置文件构建配置对象，使用默认配置");
                Config::new()
            }
        };
        if raw_config.source_cache_size == 0 {
            warn!(
                "source_cache_size被设置为0，但目前尚不支持禁用源码缓存，因此该值将被改为{}。",
                DEFAULT_SOURCE_CACHE_CAP
            );
            raw_config.source_cache_size = DEFAULT_SOURCE_CACHE_CAP;
        }
        raw_config
    }
}

impl Config {
    pub fn cache_backend(&self) -> &str {
        &self.cache_backend
    }

    pub fn class_map(&self) -> Option<&str> {
        self.class_map.as_deref()
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn source_cache_size(&self) -> usize {
        self.source_cache_size
    }

    pub fn cache_file_threshold(&self) -> u64 {
        self.cache_file_threshold
    }

    pub fn namespaces(&self) -> &[NamespaceEntry] {
        &self.namespaces
    }
}
