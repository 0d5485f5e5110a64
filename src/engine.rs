//! 长消息分段加解密引擎，提供统一的高级API。
//!
//! 引擎把任意长度的文本拆成块加密能力可处理的分段，按输入顺序逐段
//! 加解密并拼接结果。整条消息与单个分段的结果分别记入两个有界缓存，
//! 相同输入的重复调用直接命中缓存。

use std::sync::{Mutex, MutexGuard};

use tracing::{debug, warn};

use crate::cache::{self, MemoCache};
use crate::common::codec::{bytes_to_hex, hex_to_bytes};
use crate::common::config::{CachePolicy, CipherConfig, PKCS1_PADDING_OVERHEAD};
use crate::common::errors::Error;
use crate::split::split_utf8;
use crate::systems::rsa::RsaBlockSystem;
use crate::traits::{BlockCryptoSystem, KeyType};

/// `LongMessageEngine`：将块加密能力扩展到任意长度文本的引擎。
///
/// 块长、分段预算与密钥指纹在构造时一次性推导，此后不随调用变化。
/// 整条消息缓存是进程级共享的，键中携带密钥指纹；分段缓存为实例私有，
/// 与实例绑定的密钥对同生命周期。
pub struct LongMessageEngine<S>
where
    S: BlockCryptoSystem,
    Error: From<S::Error>,
{
    system: S,
    policy: CachePolicy,
    enable_logging: bool,
    /// 每个密文块的字节长度，`ceil(模数位长 / 8)`
    block_size: Option<usize>,
    /// 分段字节预算
    max_bytes: usize,
    /// 缓存键所用的密钥对指纹
    fingerprint: Option<String>,
    segment_cache: Mutex<MemoCache>,
}

impl<S> LongMessageEngine<S>
where
    S: BlockCryptoSystem,
    Error: From<S::Error>,
{
    /// 以给定的块加密系统构造引擎
    pub fn with_system(system: S, config: &CipherConfig) -> Self {
        let block_size = system.modulus_bit_length().map(|bits| bits.div_ceil(8));
        // 分段预算默认按填充开销从块长推导；无密钥时退回配置的默认位数
        let derived = block_size
            .unwrap_or(config.default_key_size_bits.div_ceil(8))
            .saturating_sub(PKCS1_PADDING_OVERHEAD)
            .max(1);
        let max_bytes = config.max_segment_bytes.unwrap_or(derived);

        let fingerprint = system.key_fingerprint();
        let segment_capacity = if config.cache.memoize {
            config.cache.segment_capacity
        } else {
            0
        };

        Self {
            system,
            policy: config.cache.clone(),
            enable_logging: config.enable_logging,
            block_size,
            max_bytes,
            fingerprint,
            segment_cache: Mutex::new(MemoCache::new(segment_capacity)),
        }
    }

    /// 当前生效的分段字节预算
    pub fn max_segment_bytes(&self) -> usize {
        self.max_bytes
    }

    /// 每个密文块的字节长度；无密钥材料时为 `None`
    pub fn block_size(&self) -> Option<usize> {
        self.block_size
    }

    /// 加密任意长度明文，返回各密文块按序拼接的十六进制字符串
    ///
    /// 拼接顺序即分段顺序，解密端依赖这一顺序还原明文。
    /// 任何一个分段失败都使整次调用失败。
    pub fn try_encrypt_long(&self, plaintext: &str) -> Result<String, Error> {
        // 1. 查整条消息缓存
        let message_key = self.message_key("encrypt", plaintext, None);
        if let Some(key) = &message_key {
            if let Some(hit) = cache::with_message_cache(|c| c.get(key).map(str::to_owned)) {
                return Ok(hit);
            }
        }

        // 2. 必须有可用的模数
        if self.block_size.is_none() {
            return Err(Error::MissingKey);
        }

        // 3. 分段并逐段加密，严格按输入顺序拼接
        let mut ciphertext = String::new();
        for segment in split_utf8(plaintext, self.max_bytes) {
            let block = self.encrypt_segment(segment)?;
            ciphertext.push_str(&block);
        }

        // 4. 写回整条消息缓存
        if let Some(key) = message_key {
            cache::with_message_cache(|c| c.put(key, ciphertext.clone()));
        }
        Ok(ciphertext)
    }

    /// 解密由定长密文块按序拼接而成的十六进制字符串
    ///
    /// 单个密文块损坏只会使该块的贡献为空串，其余块照常解密；
    /// 仅在完全缺少密钥材料时整体失败。
    pub fn try_decrypt_long(&self, ciphertext: &str, key_type: KeyType) -> Result<String, Error> {
        // 1. 查整条消息缓存，解密结果按密钥分量区分
        let message_key = self.message_key("decrypt", ciphertext, Some(key_type));
        if let Some(key) = &message_key {
            if let Some(hit) = cache::with_message_cache(|c| c.get(key).map(str::to_owned)) {
                return Ok(hit);
            }
        }

        // 2. 块长在构造时由模数推导，缺失即无密钥
        let block_size = self.block_size.ok_or(Error::MissingKey)?;

        // 3. 以 2×块长个十六进制字符为窗口做原始切分（密文不是码点敏感的），
        //    最后一个窗口允许更短
        let mut plaintext = String::new();
        for window in ciphertext.as_bytes().chunks(block_size * 2) {
            match self.decrypt_window(window, key_type) {
                Ok(piece) => plaintext.push_str(&piece),
                Err(err) => {
                    // 损坏的窗口只损失自身的贡献
                    if self.enable_logging {
                        warn!(key_type = %key_type, error = %err, "密文窗口解码失败，跳过该窗口");
                    }
                }
            }
        }

        // 4. 写回整条消息缓存
        if let Some(key) = message_key {
            cache::with_message_cache(|c| c.put(key, plaintext.clone()));
        }
        Ok(plaintext)
    }

    /// [`Self::try_encrypt_long`] 的兼容外观：任何内部错误都压平为空字符串
    ///
    /// 调用方需要以带外方式区分「空输入的成功结果」与「失败」，
    /// 例如非空明文得到空密文即视为失败。
    pub fn encrypt_long(&self, plaintext: &str) -> String {
        match self.try_encrypt_long(plaintext) {
            Ok(ciphertext) => ciphertext,
            Err(err) => {
                if self.enable_logging {
                    warn!(error = %err, "encrypt_long 失败，返回空字符串");
                }
                String::new()
            }
        }
    }

    /// [`Self::try_decrypt_long`] 的兼容外观，失败时同样返回空字符串
    pub fn decrypt_long(&self, ciphertext: &str, key_type: KeyType) -> String {
        match self.try_decrypt_long(ciphertext, key_type) {
            Ok(plaintext) => plaintext,
            Err(err) => {
                if self.enable_logging {
                    warn!(error = %err, "decrypt_long 失败，返回空字符串");
                }
                String::new()
            }
        }
    }

    fn encrypt_segment(&self, segment: &str) -> Result<String, Error> {
        let segment_key = format!("chunk:{}", segment);
        if self.policy.memoize {
            if let Some(hit) = self.lock_segment_cache().get(&segment_key) {
                return Ok(hit.to_owned());
            }
        }

        let block = self.system.encrypt_block(segment).map_err(Error::from)?;

        if self.policy.memoize {
            self.lock_segment_cache()
                .put(segment_key, block.clone());
        }
        Ok(block)
    }

    fn decrypt_window(&self, window: &[u8], key_type: KeyType) -> Result<String, Error> {
        let text = std::str::from_utf8(window)
            .map_err(|e| Error::Format(format!("ciphertext window is not ASCII hex: {}", e)))?;
        // 非十六进制的窗口在此处被拒绝，不进入缓存
        let bytes = hex_to_bytes(text)?;
        let hex_window = bytes_to_hex(&bytes);

        let segment_key = format!("chunk:{}:{}", hex_window, key_type);
        if self.policy.memoize {
            if let Some(hit) = self.lock_segment_cache().get(&segment_key) {
                return Ok(hit.to_owned());
            }
        }

        // 能力层报告的失败以空串计入该窗口的贡献，并照常缓存
        let piece = match self.system.decrypt_block(&hex_window, key_type) {
            Ok(piece) => piece,
            Err(err) => {
                if self.enable_logging {
                    debug!(key_type = %key_type, error = %err, "单块解密失败，该窗口贡献为空");
                }
                String::new()
            }
        };

        if self.policy.memoize {
            self.lock_segment_cache()
                .put(segment_key, piece.clone());
        }
        Ok(piece)
    }

    fn message_key(&self, op: &str, input: &str, key_type: Option<KeyType>) -> Option<String> {
        if !self.policy.memoize {
            return None;
        }
        // 指纹进入缓存键，不同密钥对在共享缓存中互不可见
        let fingerprint = self.fingerprint.as_deref()?;
        Some(match key_type {
            Some(kt) => format!("{}:{}:{}:{}", op, fingerprint, kt, input),
            None => format!("{}:{}:{}", op, fingerprint, input),
        })
    }

    fn lock_segment_cache(&self) -> MutexGuard<'_, MemoCache> {
        self.segment_cache
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// 以 RSA 为后端的长消息引擎
pub type RsaLongEngine = LongMessageEngine<RsaBlockSystem>;

impl RsaLongEngine {
    /// 从配置构造 RSA 长消息引擎
    ///
    /// PEM 密钥材料不合法时返回错误；未提供任何密钥是合法的，
    /// 此时加解密调用按缺键处理（兼容外观返回空字符串）。
    pub fn new(config: CipherConfig) -> Result<Self, Error> {
        let system = RsaBlockSystem::from_config(&config)?;
        Ok(Self::with_system(system, &config))
    }
}
