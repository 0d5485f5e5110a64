use thiserror::Error;

/// 分段加解密操作可能遇到的错误类型
#[derive(Error, Debug)]
pub enum Error {
    #[error("No usable key material available")]
    MissingKey,

    #[error("Invalid data format: {0}")]
    Format(String),

    #[error("Cryptography error: {0}")]
    Cryptography(String),

    #[error("Key management error: {0}")]
    Key(String),

    #[error("RSA system error")]
    Rsa(#[from] crate::systems::rsa::RsaSystemError),
}

// thiserror 自动处理 Display, StdError 和所有 #[from] 的实现

// 手动实现一些无法使用 #[from] 的转换
impl From<std::string::FromUtf8Error> for Error {
    fn from(err: std::string::FromUtf8Error) -> Self {
        Error::Format(format!("UTF-8 conversion error: {}", err))
    }
}
