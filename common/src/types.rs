//! 解析結果の型定義
//!
//! サーバーとCLIで共有される型:
//! - VisionAnalysis: 画像認識サービスの出力（タグ・キャプション）
//! - HealthStatus: 葉の健康状態ラベル
//! - ClassificationResult: 最終出力（成功 or 失敗）

use serde::{Deserialize, Serialize};
use std::fmt;

/// 画像認識サービスの出力
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisionAnalysis {
    /// タグ（サービスが返した順）
    pub tags: Vec<String>,
    /// キャプション（先頭が最上位）
    pub captions: Vec<String>,
}

impl VisionAnalysis {
    /// 先頭キャプション（なければ空文字）
    pub fn top_caption(&self) -> &str {
        self.captions.first().map(String::as_str).unwrap_or("")
    }
}

/// 葉の健康状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HealthStatus {
    Healthy,
    Spotted,
    Blighted,
}

impl HealthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "Healthy",
            HealthStatus::Spotted => "Spotted",
            HealthStatus::Blighted => "Blighted",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 解析成功時の内容
#[derive(Debug, Clone, PartialEq)]
pub struct LeafAnalysis {
    pub health_status: HealthStatus,
    pub confidence: f64,
    /// "Leaf appears to be ..." 形式の説明
    pub description: String,
    /// 小文字化済みタグ
    pub tags: Vec<String>,
    /// 先頭キャプション（原文のまま）
    pub raw_description: String,
}

/// 画像判定結果
///
/// JSONでは `success` フラグ付きのフラットなオブジェクトになる。
/// 呼び出し側は `success` で分岐すること。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "ClassificationWire", try_from = "ClassificationWire")]
pub enum ClassificationResult {
    Analyzed(LeafAnalysis),
    Failed { error: String },
}

impl ClassificationResult {
    pub fn failed(error: impl Into<String>) -> Self {
        ClassificationResult::Failed { error: error.into() }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ClassificationResult::Analyzed(_))
    }

    pub fn health_status(&self) -> Option<HealthStatus> {
        match self {
            ClassificationResult::Analyzed(a) => Some(a.health_status),
            ClassificationResult::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ClassificationResult::Analyzed(_) => None,
            ClassificationResult::Failed { error } => Some(error),
        }
    }
}

/// JSON表現（success フラグ + 各フィールド）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ClassificationWire {
    success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    health_status: Option<HealthStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    raw_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl From<ClassificationResult> for ClassificationWire {
    fn from(result: ClassificationResult) -> Self {
        match result {
            ClassificationResult::Analyzed(a) => ClassificationWire {
                success: true,
                health_status: Some(a.health_status),
                confidence: Some(a.confidence),
                description: Some(a.description),
                tags: Some(a.tags),
                raw_description: Some(a.raw_description),
                error: None,
            },
            ClassificationResult::Failed { error } => ClassificationWire {
                success: false,
                error: Some(error),
                ..Default::default()
            },
        }
    }
}

impl TryFrom<ClassificationWire> for ClassificationResult {
    type Error = String;

    fn try_from(wire: ClassificationWire) -> std::result::Result<Self, Self::Error> {
        if !wire.success {
            return Ok(ClassificationResult::Failed {
                error: wire.error.unwrap_or_default(),
            });
        }

        let health_status = wire
            .health_status
            .ok_or_else(|| "health_status is required when success is true".to_string())?;

        Ok(ClassificationResult::Analyzed(LeafAnalysis {
            health_status,
            confidence: wire.confidence.unwrap_or_default(),
            description: wire.description.unwrap_or_default(),
            tags: wire.tags.unwrap_or_default(),
            raw_description: wire.raw_description.unwrap_or_default(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_analysis() -> LeafAnalysis {
        LeafAnalysis {
            health_status: HealthStatus::Spotted,
            confidence: 0.99,
            description: "Leaf appears to be spotted".to_string(),
            tags: vec!["leaf".to_string(), "brown".to_string()],
            raw_description: "A close up of a leaf".to_string(),
        }
    }

    #[test]
    fn test_top_caption() {
        let analysis = VisionAnalysis {
            tags: vec![],
            captions: vec!["first".to_string(), "second".to_string()],
        };
        assert_eq!(analysis.top_caption(), "first");
        assert_eq!(VisionAnalysis::default().top_caption(), "");
    }

    #[test]
    fn test_health_status_display() {
        assert_eq!(HealthStatus::Healthy.to_string(), "Healthy");
        assert_eq!(HealthStatus::Blighted.to_string(), "Blighted");
    }

    #[test]
    fn test_success_serialize() {
        let result = ClassificationResult::Analyzed(sample_analysis());
        let json = serde_json::to_value(&result).expect("シリアライズ失敗");

        assert_eq!(json["success"], true);
        assert_eq!(json["health_status"], "Spotted");
        assert_eq!(json["confidence"], 0.99);
        assert_eq!(json["tags"][1], "brown");
        assert_eq!(json["raw_description"], "A close up of a leaf");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_failure_serialize() {
        let result = ClassificationResult::failed("Access denied");
        let json = serde_json::to_value(&result).expect("シリアライズ失敗");

        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Access denied");
        // 失敗時は health_status を含まない
        assert!(json.get("health_status").is_none());
        assert!(json.get("confidence").is_none());
    }

    #[test]
    fn test_deserialize_success() {
        let json = r#"{
            "success": true,
            "health_status": "Blighted",
            "confidence": 0.99,
            "description": "Leaf appears to be blighted",
            "tags": ["plant"],
            "raw_description": ""
        }"#;

        let result: ClassificationResult = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert!(result.is_success());
        assert_eq!(result.health_status(), Some(HealthStatus::Blighted));
    }

    #[test]
    fn test_deserialize_success_without_status_fails() {
        let json = r#"{"success": true}"#;
        assert!(serde_json::from_str::<ClassificationResult>(json).is_err());
    }

    #[test]
    fn test_accessors_on_failure() {
        let result = ClassificationResult::failed("boom");
        assert!(!result.is_success());
        assert_eq!(result.health_status(), None);
        assert_eq!(result.error(), Some("boom"));
    }
}
