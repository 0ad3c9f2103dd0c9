pub mod batch;
pub mod ber;
pub mod config;
pub mod controls;
pub mod wire;

pub use config::Config;
pub use controls::{
    transform_controls, DirectoryControl, RequestControl, ResponseControl, ResultCode, SortKey,
};

#[derive(thiserror::Error, Debug)]
pub enum ControlError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Encode error: {0}")]
    Encode(String),

    #[error("Invalid BER format string: {0}")]
    Format(String),

    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Base64 error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ControlError>;
