use longcrypt::{CipherConfig, KeyType, RsaLongEngine};
use rsa::pkcs8::{EncodePrivateKey, EncodePublicKey, LineEnding};
use rsa::{RsaPrivateKey, RsaPublicKey};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 演示用密钥对；生产环境的密钥材料应由外部提供
    let mut rng = rsa::rand_core::OsRng;
    let private_key = RsaPrivateKey::new(&mut rng, 1024)?;
    let public_key = RsaPublicKey::from(&private_key);

    let config = CipherConfig::default()
        .with_public_key(public_key.to_public_key_pem(LineEnding::LF)?)
        .with_private_key(private_key.to_pkcs8_pem(LineEnding::LF)?.to_string());
    let engine = RsaLongEngine::new(config)?;

    let plaintext = "Hello, longcrypt! 这段文本会被拆成多个 RSA 块。".repeat(10);

    // 加密
    let ciphertext = engine.encrypt_long(&plaintext);
    println!("Ciphertext ({} hex chars): {}...", ciphertext.len(), &ciphertext[..64]);

    // 解密
    let decrypted = engine.decrypt_long(&ciphertext, KeyType::Private);
    assert_eq!(decrypted, plaintext);
    println!("Decrypted {} chars successfully", decrypted.chars().count());

    Ok(())
}
