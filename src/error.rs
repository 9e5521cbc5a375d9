use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("Vision API credentials are not configured. Set AZURE_VISION_ENDPOINT and AZURE_VISION_KEY, or run `maize-dashboard config --set-endpoint URL --set-key KEY`")]
    MissingCredentials,

    #[error("Image load error: {0}")]
    ImageLoad(String),

    #[error("Image encode error: {0}")]
    ImageEncode(String),

    #[error("Invalid upload: {0}")]
    InvalidUpload(String),

    #[error("Vision API error: {0}")]
    ApiCall(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] maize_dashboard_common::Error),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
