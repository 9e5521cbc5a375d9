//! 画像判定テスト
//!
//! 画像認識サービスをモックに差し替えて判定ロジックを検証

use async_trait::async_trait;
use image::{DynamicImage, Rgb, RgbImage};
use maize_dashboard::analyzer::{analyze_maize_image, VisionService};
use maize_dashboard::error::{DashboardError, Result};
use maize_dashboard_common::{ClassificationResult, HealthStatus, VisionAnalysis};
use std::sync::atomic::{AtomicUsize, Ordering};

/// 固定のタグ・キャプションを返すモック
struct MockVision {
    analysis: VisionAnalysis,
    calls: AtomicUsize,
}

impl MockVision {
    fn new(tags: &[&str], caption: &str) -> Self {
        Self {
            analysis: VisionAnalysis {
                tags: tags.iter().map(|t| t.to_string()).collect(),
                captions: vec![caption.to_string()],
            },
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl VisionService for MockVision {
    async fn describe(&self, jpeg: &[u8]) -> Result<VisionAnalysis> {
        assert_eq!(&jpeg[..2], &[0xFF, 0xD8], "JPEGで送信されること");
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.analysis.clone())
    }
}

/// 常に失敗するモック（キー不正など）
struct FailingVision;

#[async_trait]
impl VisionService for FailingVision {
    async fn describe(&self, _jpeg: &[u8]) -> Result<VisionAnalysis> {
        Err(DashboardError::ApiCall(
            "(401) Access denied due to invalid subscription key.".to_string(),
        ))
    }
}

fn leaf_image() -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(16, 16, Rgb([40, 170, 60])))
}

#[tokio::test]
async fn test_blight_wins_over_spot() {
    let vision = MockVision::new(&["Leaf", "Brown", "Spots"], "A diseased corn leaf");
    let result = analyze_maize_image(&vision, &leaf_image()).await;

    assert_eq!(result.health_status(), Some(HealthStatus::Blighted));
}

#[tokio::test]
async fn test_spotted() {
    let vision = MockVision::new(&["plant", "yellow"], "a close up of a leaf");
    let result = analyze_maize_image(&vision, &leaf_image()).await;

    assert_eq!(result.health_status(), Some(HealthStatus::Spotted));
}

#[tokio::test]
async fn test_healthy_with_fixed_confidence() {
    let vision = MockVision::new(&["Grass", "Plant", "Green"], "A Field Of Corn");
    let result = analyze_maize_image(&vision, &leaf_image()).await;

    match result {
        ClassificationResult::Analyzed(a) => {
            assert_eq!(a.health_status, HealthStatus::Healthy);
            assert_eq!(a.confidence, 0.99);
            assert_eq!(a.description, "Leaf appears to be healthy");
            assert_eq!(a.tags, vec!["grass", "plant", "green"]);
            assert_eq!(a.raw_description, "A Field Of Corn");
        }
        other => panic!("unexpected result: {:?}", other),
    }
    assert_eq!(vision.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_service_error_becomes_failure_result() {
    let result = analyze_maize_image(&FailingVision, &leaf_image()).await;

    assert!(!result.is_success());
    assert!(result.error().unwrap().contains("invalid subscription key"));

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn test_same_image_twice_same_label() {
    let vision = MockVision::new(&["wilted"], "");
    let image = leaf_image();

    let first = analyze_maize_image(&vision, &image).await;
    let second = analyze_maize_image(&vision, &image).await;

    assert_eq!(first, second);
    assert_eq!(vision.calls.load(Ordering::SeqCst), 2);
}
