//!
//! # 配置模块
//!
//! 定义引擎构造所需的密钥材料、日志开关与缓存策略。
//! 字段与默认值对应块加密能力的构造面。
//!

use serde::{Deserialize, Serialize};

/// PKCS#1 v1.5 填充在每个密文块中占用的字节数
pub const PKCS1_PADDING_OVERHEAD: usize = 11;

/// 1024 位模数对应的分段字节预算
pub const DEFAULT_SEGMENT_BYTES: usize = 117;

/// 进程级整条消息缓存的容量上限
pub const MESSAGE_CACHE_CAPACITY: usize = 100;

/// 分段缓存的默认容量上限
pub const DEFAULT_SEGMENT_CACHE_CAPACITY: usize = 1024;

fn default_key_size_bits() -> usize {
    1024
}

fn default_public_exponent_hex() -> String {
    "010001".to_string()
}

fn default_segment_capacity() -> usize {
    DEFAULT_SEGMENT_CACHE_CAPACITY
}

fn default_memoize() -> bool {
    true
}

/// 结果缓存策略
///
/// RSA 随机填充使同一明文的两次加密产生不同密文；启用缓存后重复调用
/// 返回首次缓存的结果。需要每次全新密文的调用方应关闭 `memoize`。
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CachePolicy {
    /// 是否启用结果缓存（整条消息与分段两个作用域一并生效）
    #[serde(default = "default_memoize")]
    pub memoize: bool,
    /// 分段缓存的容量上限；整条消息缓存容量固定为
    /// [`MESSAGE_CACHE_CAPACITY`]，不随实例配置变化
    #[serde(default = "default_segment_capacity")]
    pub segment_capacity: usize,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            memoize: true,
            segment_capacity: DEFAULT_SEGMENT_CACHE_CAPACITY,
        }
    }
}

/// 引擎构造配置
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CipherConfig {
    /// PEM 编码的公钥
    #[serde(default)]
    pub public_key: Option<String>,
    /// PEM 编码的私钥；私钥包含公钥参数，仅设置私钥即可同时加密与解密
    #[serde(default)]
    pub private_key: Option<String>,
    /// 默认密钥位数，仅在未提供密钥材料时用于推导分段预算
    #[serde(default = "default_key_size_bits")]
    pub default_key_size_bits: usize,
    /// 公钥指数的十六进制表示；本库不生成密钥，保留以兼容能力构造面
    #[serde(default = "default_public_exponent_hex")]
    pub public_exponent_hex: String,
    /// 是否输出告警与降级日志
    #[serde(default)]
    pub enable_logging: bool,
    /// 显式分段字节预算；缺省时按 `模数字节长 - 11` 推导
    #[serde(default)]
    pub max_segment_bytes: Option<usize>,
    /// 缓存策略
    #[serde(default)]
    pub cache: CachePolicy,
}

impl Default for CipherConfig {
    fn default() -> Self {
        Self {
            public_key: None,
            private_key: None,
            default_key_size_bits: default_key_size_bits(),
            public_exponent_hex: default_public_exponent_hex(),
            enable_logging: false,
            max_segment_bytes: None,
            cache: CachePolicy::default(),
        }
    }
}

impl CipherConfig {
    /// 设置 PEM 编码的公钥
    pub fn with_public_key(mut self, pem: impl Into<String>) -> Self {
        self.public_key = Some(pem.into());
        self
    }

    /// 设置 PEM 编码的私钥
    pub fn with_private_key(mut self, pem: impl Into<String>) -> Self {
        self.private_key = Some(pem.into());
        self
    }

    /// 设置是否输出日志
    pub fn with_logging(mut self, enable: bool) -> Self {
        self.enable_logging = enable;
        self
    }

    /// 显式设置分段字节预算
    pub fn with_max_segment_bytes(mut self, max_bytes: usize) -> Self {
        self.max_segment_bytes = Some(max_bytes);
        self
    }

    /// 设置缓存策略
    pub fn with_cache(mut self, cache: CachePolicy) -> Self {
        self.cache = cache;
        self
    }
}
