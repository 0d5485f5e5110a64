//! 具体的块加密系统实现。

pub mod rsa;

pub use rsa::RsaBlockSystem;
