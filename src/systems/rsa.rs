//! `RsaBlockSystem` 基于 RSA PKCS#1 v1.5 提供单块加解密能力。
//!
//! 公钥方向的解密使用原始模幂运算配合宽容的填充剥离，
//! 对应由私钥侧施加 PKCS#1 填充后加密的数据。

use crate::common::codec::{bytes_to_hex, hex_to_bytes};
use crate::common::config::CipherConfig;
use crate::traits::{BlockCryptoSystem, KeyType};
use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey};
use rsa::rand_core::OsRng as RsaOsRng;
use rsa::traits::PublicKeyParts;
use rsa::{BigUint, Pkcs1v15Encrypt, RsaPrivateKey, RsaPublicKey};
use sha2::{Digest, Sha256};
use thiserror::Error;
use zeroize::Zeroizing;

/// RSA 块加密系统的错误类型
#[derive(Error, Debug)]
pub enum RsaSystemError {
    #[error("Key error: {0}")]
    Key(String),
    #[error("Encrypt error: {0}")]
    Encrypt(String),
    #[error("Decrypt error: {0}")]
    Decrypt(String),
    #[error("Format error: {0}")]
    Format(String),
}

/// RSA 块加密系统
///
/// 持有解析后的密钥分量；仅提供私钥时公钥分量由其派生。
/// 本系统不生成密钥，密钥材料一律由调用方提供。
pub struct RsaBlockSystem {
    public_key: Option<RsaPublicKey>,
    private_key: Option<RsaPrivateKey>,
}

impl RsaBlockSystem {
    /// 从配置中的 PEM 密钥材料构造
    ///
    /// PEM 不合法时返回错误；两个密钥都缺省是合法的空系统，
    /// 后续单块操作按缺键失败。
    pub fn from_config(config: &CipherConfig) -> Result<Self, RsaSystemError> {
        let private_key = match config.private_key.as_deref() {
            Some(pem) => Some(parse_private_pem(pem)?),
            None => None,
        };
        let public_key = match config.public_key.as_deref() {
            Some(pem) => Some(parse_public_pem(pem)?),
            None => private_key.as_ref().map(RsaPublicKey::from),
        };

        Ok(Self {
            public_key,
            private_key,
        })
    }

    /// 直接以解析后的密钥构造
    pub fn new(public_key: Option<RsaPublicKey>, private_key: Option<RsaPrivateKey>) -> Self {
        let public_key = public_key.or_else(|| private_key.as_ref().map(RsaPublicKey::from));
        Self {
            public_key,
            private_key,
        }
    }

    fn modulus(&self) -> Option<&BigUint> {
        self.public_key
            .as_ref()
            .map(|key| key.n())
            .or_else(|| self.private_key.as_ref().map(|key| key.n()))
    }
}

fn parse_public_pem(pem: &str) -> Result<RsaPublicKey, RsaSystemError> {
    // 先按 PKCS#8 (SPKI) 解析，失败时回退 PKCS#1
    RsaPublicKey::from_public_key_pem(pem)
        .or_else(|_| RsaPublicKey::from_pkcs1_pem(pem))
        .map_err(|e| RsaSystemError::Key(format!("解析RSA公钥失败: {}", e)))
}

fn parse_private_pem(pem: &str) -> Result<RsaPrivateKey, RsaSystemError> {
    RsaPrivateKey::from_pkcs8_pem(pem)
        .or_else(|_| RsaPrivateKey::from_pkcs1_pem(pem))
        .map_err(|e| RsaSystemError::Key(format!("解析RSA私钥失败: {}", e)))
}

impl BlockCryptoSystem for RsaBlockSystem {
    type Error = RsaSystemError;

    fn encrypt_block(&self, segment: &str) -> Result<String, Self::Error> {
        let public_key = self
            .public_key
            .as_ref()
            .ok_or_else(|| RsaSystemError::Key("缺少RSA公钥".to_string()))?;

        let mut rng = RsaOsRng;
        let ciphertext = public_key
            .encrypt(&mut rng, Pkcs1v15Encrypt, segment.as_bytes())
            .map_err(|e| RsaSystemError::Encrypt(format!("RSA加密失败: {}", e)))?;

        Ok(bytes_to_hex(&ciphertext))
    }

    fn decrypt_block(&self, hex_block: &str, key_type: KeyType) -> Result<String, Self::Error> {
        let block = hex_to_bytes(hex_block)
            .map_err(|e| RsaSystemError::Format(format!("密文块不是合法的十六进制: {}", e)))?;

        let plaintext = match key_type {
            KeyType::Private => {
                let private_key = self
                    .private_key
                    .as_ref()
                    .ok_or_else(|| RsaSystemError::Key("缺少RSA私钥".to_string()))?;
                Zeroizing::new(
                    private_key
                        .decrypt(Pkcs1v15Encrypt, &block)
                        .map_err(|e| RsaSystemError::Decrypt(format!("RSA解密失败: {}", e)))?,
                )
            }
            KeyType::Public => {
                let public_key = self
                    .public_key
                    .as_ref()
                    .ok_or_else(|| RsaSystemError::Key("缺少RSA公钥".to_string()))?;
                decrypt_with_public(public_key, &block)?
            }
        };

        String::from_utf8(plaintext.to_vec())
            .map_err(|e| RsaSystemError::Format(format!("明文不是合法的UTF-8: {}", e)))
    }

    fn modulus_bit_length(&self) -> Option<usize> {
        self.modulus().map(|n| n.bits())
    }

    fn key_fingerprint(&self) -> Option<String> {
        self.modulus().map(|n| {
            let digest = Sha256::digest(n.to_bytes_be());
            bytes_to_hex(&digest)
        })
    }
}

/// 公钥方向的原始 RSA 运算加上宽容的 PKCS#1 填充剥离
fn decrypt_with_public(
    public_key: &RsaPublicKey,
    block: &[u8],
) -> Result<Zeroizing<Vec<u8>>, RsaSystemError> {
    let c = BigUint::from_bytes_be(block);
    let m = rsa::hazmat::rsa_encrypt(public_key, &c)
        .map_err(|e| RsaSystemError::Decrypt(format!("RSA公钥运算失败: {}", e)))?;
    let padded = Zeroizing::new(m.to_bytes_be());
    strip_pkcs1_padding(&padded)
}

/// 剥离 PKCS#1 填充：跳过前导零与块类型字节，消耗填充段直到零分隔符
///
/// 不校验块类型取值，类型 1 与类型 2 的填充骨架都被接受。
fn strip_pkcs1_padding(padded: &[u8]) -> Result<Zeroizing<Vec<u8>>, RsaSystemError> {
    let mut i = 0;
    while i < padded.len() && padded[i] == 0 {
        i += 1;
    }
    if i >= padded.len() {
        return Err(RsaSystemError::Decrypt(
            "填充剥离失败: 数据为空".to_string(),
        ));
    }

    // 块类型字节
    i += 1;
    while i < padded.len() && padded[i] != 0 {
        i += 1;
    }
    if i >= padded.len() {
        return Err(RsaSystemError::Decrypt(
            "填充剥离失败: 缺少零分隔符".to_string(),
        ));
    }

    Ok(Zeroizing::new(padded[i + 1..].to_vec()))
}
