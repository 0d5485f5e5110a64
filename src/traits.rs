//! 定义了分段加解密引擎所消费的块加密能力。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 解密时选用的密钥分量
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyType {
    /// 公钥解密，对应由私钥侧施加填充并加密的数据
    Public,
    /// 私钥解密
    #[default]
    Private,
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyType::Public => write!(f, "public"),
            KeyType::Private => write!(f, "private"),
        }
    }
}

/// `BlockCryptoSystem` 定义了引擎依赖的外部块加密能力。
///
/// 实现方负责密钥解析、模幂运算与填充方案；引擎只依赖单块加解密、
/// 模数位长与密钥指纹这四个操作，并假定它们同步完成、无副作用。
pub trait BlockCryptoSystem {
    /// 错误类型
    type Error: std::error::Error + Send + Sync + 'static;

    /// 加密单个明文分段，返回小写十六进制的密文块
    fn encrypt_block(&self, segment: &str) -> Result<String, Self::Error>;

    /// 解密单个十六进制密文块
    fn decrypt_block(&self, hex_block: &str, key_type: KeyType) -> Result<String, Self::Error>;

    /// 模数位长；无密钥材料时返回 `None`
    fn modulus_bit_length(&self) -> Option<usize>;

    /// 密钥对指纹，用于隔离不同密钥对的缓存命名空间
    fn key_fingerprint(&self) -> Option<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_type_display() {
        assert_eq!(KeyType::Public.to_string(), "public");
        assert_eq!(KeyType::Private.to_string(), "private");
    }

    #[test]
    fn test_key_type_default_is_private() {
        assert_eq!(KeyType::default(), KeyType::Private);
    }

    #[test]
    fn test_key_type_serde_lowercase() {
        assert_eq!(serde_json::to_string(&KeyType::Public).unwrap(), "\"public\"");
        let parsed: KeyType = serde_json::from_str("\"private\"").unwrap();
        assert_eq!(parsed, KeyType::Private);
    }
}
