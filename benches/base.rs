use criterion::{criterion_group, criterion_main, Criterion};
use longcrypt::{CachePolicy, CipherConfig, KeyType, RsaLongEngine};
use rsa::pkcs8::{EncodePrivateKey, EncodePublicKey, LineEnding};
use rsa::{RsaPrivateKey, RsaPublicKey};
use std::hint::black_box;

fn bench_config(bits: usize, memoize: bool) -> CipherConfig {
    let mut rng = rsa::rand_core::OsRng;
    let private_key = RsaPrivateKey::new(&mut rng, bits).unwrap();
    let public_key = RsaPublicKey::from(&private_key);

    CipherConfig::default()
        .with_public_key(public_key.to_public_key_pem(LineEnding::LF).unwrap())
        .with_private_key(
            private_key
                .to_pkcs8_pem(LineEnding::LF)
                .unwrap()
                .to_string(),
        )
        .with_cache(CachePolicy {
            memoize,
            segment_capacity: 1024,
        })
}

fn bench_encrypt_long(c: &mut Criterion) {
    let text = "长文本分段加密基准数据 benchmark payload ".repeat(40);

    let cached = RsaLongEngine::new(bench_config(1024, true)).unwrap();
    c.bench_function("encrypt_long 1024 cached", |b| {
        b.iter(|| cached.encrypt_long(black_box(&text)));
    });

    let uncached = RsaLongEngine::new(bench_config(1024, false)).unwrap();
    c.bench_function("encrypt_long 1024 uncached", |b| {
        b.iter(|| uncached.encrypt_long(black_box(&text)));
    });
}

fn bench_decrypt_long(c: &mut Criterion) {
    let text = "长文本分段解密基准数据 benchmark payload ".repeat(40);

    let cached = RsaLongEngine::new(bench_config(1024, true)).unwrap();
    let ciphertext = cached.encrypt_long(&text);
    c.bench_function("decrypt_long 1024 cached", |b| {
        b.iter(|| cached.decrypt_long(black_box(&ciphertext), KeyType::Private));
    });

    let uncached = RsaLongEngine::new(bench_config(1024, false)).unwrap();
    let ciphertext = uncached.encrypt_long(&text);
    c.bench_function("decrypt_long 1024 uncached", |b| {
        b.iter(|| uncached.decrypt_long(black_box(&ciphertext), KeyType::Private));
    });
}

criterion_group!(base, bench_encrypt_long, bench_decrypt_long);
criterion_main!(base);
