//! アップロード画像の読み込み
//!
//! ブラウザからは "data:image/jpeg;base64,..." 形式のData URLで届く。
//! CLIからはファイルパスで受け取る。

use crate::error::{DashboardError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::DynamicImage;
use std::path::Path;

/// Data URLからBase64データ部分を抽出
///
/// 区切りの `,` がなければ None
pub fn extract_base64_from_data_url(data_url: &str) -> Option<&str> {
    data_url.split_once(',').map(|(_, data)| data)
}

/// Data URLからMIMEタイプを抽出（不明なら "image/jpeg"）
pub fn extract_mime_type_from_data_url(data_url: &str) -> &str {
    data_url
        .strip_prefix("data:")
        .and_then(|s| s.split(|c: char| c == ';' || c == ',').next())
        .filter(|s| !s.is_empty())
        .unwrap_or("image/jpeg")
}

/// Data URLをデコードして画像を得る
///
/// 画像形式はMIMEタイプではなく中身から判定する
pub fn decode_data_url(contents: &str) -> Result<DynamicImage> {
    let payload = extract_base64_from_data_url(contents)
        .ok_or_else(|| DashboardError::InvalidUpload("expected a data URL".into()))?;

    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|e| DashboardError::InvalidUpload(format!("base64: {}", e)))?;

    image::load_from_memory(&bytes).map_err(|e| DashboardError::ImageLoad(e.to_string()))
}

/// 画像ファイルを読み込む
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    if !path.exists() {
        return Err(DashboardError::ImageLoad(format!(
            "file not found: {}",
            path.display()
        )));
    }

    image::open(path).map_err(|e| DashboardError::ImageLoad(e.to_string()))
}
