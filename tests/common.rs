//!
//! 集成测试的通用辅助函数
//!

use rsa::pkcs8::{EncodePrivateKey, EncodePublicKey, LineEnding};
use rsa::{RsaPrivateKey, RsaPublicKey};

/// 生成一对 PEM 编码的 RSA 密钥。
/// 密钥生成不属于库本身的能力，测试直接使用 `rsa` crate。
#[allow(dead_code)]
pub fn generate_pem_keypair(bits: usize) -> (String, String) {
    let mut rng = rsa::rand_core::OsRng;
    let private_key = RsaPrivateKey::new(&mut rng, bits).unwrap();
    let public_key = RsaPublicKey::from(&private_key);

    let public_pem = public_key.to_public_key_pem(LineEnding::LF).unwrap();
    let private_pem = private_key
        .to_pkcs8_pem(LineEnding::LF)
        .unwrap()
        .to_string();
    (public_pem, private_pem)
}
