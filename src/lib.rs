//! # Longcrypt: Chunked RSA for Arbitrary-Length Text
//!
//! `longcrypt` extends a fixed-block asymmetric cipher (RSA) to plaintext and
//! ciphertext of arbitrary length. Input is split into cipher-block-sized
//! segments, each segment is encrypted or decrypted independently, and the
//! results are concatenated strictly in input order. Results are memoized in
//! two bounded caches, one for whole messages and one for individual segments.
//!
//! The underlying RSA primitives are consumed through the
//! [`BlockCryptoSystem`] trait; [`RsaBlockSystem`] is the built-in
//! implementation backed by the `rsa` crate.
//!
//! ## Core Concepts
//!
//! - **[`RsaLongEngine`]**: the high-level entry point, constructed from a
//!   [`CipherConfig`] carrying PEM key material and the cache policy.
//! - **[`BlockCryptoSystem`]**: the capability seam. Implement it to plug in
//!   a different block cipher backend.
//! - **[`CachePolicy`]**: caller-visible memoization switch. RSA padding is
//!   randomized, so with memoization enabled repeated calls return the first
//!   cached ciphertext instead of a fresh one.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use longcrypt::{CipherConfig, KeyType, RsaLongEngine};
//!
//! fn main() -> Result<(), longcrypt::Error> {
//!     let config = CipherConfig::default()
//!         .with_public_key(public_pem)
//!         .with_private_key(private_pem);
//!     let engine = RsaLongEngine::new(config)?;
//!
//!     let ciphertext = engine.encrypt_long("任意长度的文本 any length of text");
//!     let plaintext = engine.decrypt_long(&ciphertext, KeyType::Private);
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod common;
pub mod engine;
pub mod split;
pub mod systems;
pub mod traits;

pub use common::config::{CachePolicy, CipherConfig};
pub use common::errors::Error;
pub use engine::{LongMessageEngine, RsaLongEngine};
pub use systems::rsa::RsaBlockSystem;
pub use traits::{BlockCryptoSystem, KeyType};

/// The version of the `longcrypt` crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
