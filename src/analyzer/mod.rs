//! 葉の画像判定
//!
//! 画像をJPEGにエンコードして画像認識サービスへ送り、
//! 返ってきたタグ・キャプションから健康状態を判定する。

mod azure;

pub use azure::AzureVision;

use crate::error::{DashboardError, Result};
use async_trait::async_trait;
use image::{DynamicImage, ImageFormat};
use maize_dashboard_common::{build_classification, ClassificationResult, VisionAnalysis};
use std::io::Cursor;
use tracing::{debug, error, info};

/// 画像認識サービス
#[async_trait]
pub trait VisionService: Send + Sync {
    /// JPEG画像のタグとキャプションを取得
    async fn describe(&self, jpeg: &[u8]) -> Result<VisionAnalysis>;
}

/// 画像をJPEGにエンコード
pub fn encode_jpeg(image: &DynamicImage) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    image
        .write_to(&mut buf, ImageFormat::Jpeg)
        .map_err(|e| DashboardError::ImageEncode(e.to_string()))?;
    Ok(buf.into_inner())
}

/// 葉の画像を判定
///
/// エンコードやAPI呼び出しの失敗は `ClassificationResult::Failed` として返す。
/// 呼び出しは1回のみ（リトライなし）。
pub async fn analyze_maize_image(
    service: &dyn VisionService,
    image: &DynamicImage,
) -> ClassificationResult {
    match describe_image(service, image).await {
        Ok(analysis) => {
            let result = build_classification(&analysis);
            if let Some(status) = result.health_status() {
                info!(%status, tags = analysis.tags.len(), "leaf image classified");
            }
            result
        }
        Err(e) => {
            error!("Error analyzing image: {}", e);
            ClassificationResult::failed(e.to_string())
        }
    }
}

async fn describe_image(service: &dyn VisionService, image: &DynamicImage) -> Result<VisionAnalysis> {
    let jpeg = encode_jpeg(image)?;
    debug!(bytes = jpeg.len(), "sending image to vision service");
    service.describe(&jpeg).await
}
