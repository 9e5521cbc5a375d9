//! APIレスポンスパーサー
//!
//! Azure Computer Vision (analyze) のレスポンスJSONから
//! タグとキャプションを取り出す

use crate::error::{Error, Result};
use crate::types::VisionAnalysis;
use serde::Deserialize;

#[derive(Deserialize)]
struct AnalyzeResponse {
    #[serde(default)]
    tags: Vec<Tag>,
    #[serde(default)]
    description: Option<Description>,
}

#[derive(Deserialize)]
struct Tag {
    name: String,
}

#[derive(Deserialize)]
struct Description {
    #[serde(default)]
    captions: Vec<Caption>,
}

#[derive(Deserialize)]
struct Caption {
    text: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

/// analyzeレスポンスをパース
///
/// # Arguments
/// * `response` - レスポンスボディ（JSON文字列）
///
/// # Returns
/// * `Ok(VisionAnalysis)` - タグ・キャプションともに欠けていれば空
/// * `Err` - JSONとして不正な場合
///
/// # Examples
/// ```
/// use maize_dashboard_common::parse_vision_response;
///
/// let body = r#"{"tags":[{"name":"leaf","confidence":0.98}],
///                "description":{"captions":[{"text":"a green leaf","confidence":0.5}]}}"#;
/// let analysis = parse_vision_response(body).unwrap();
/// assert_eq!(analysis.tags, vec!["leaf"]);
/// assert_eq!(analysis.top_caption(), "a green leaf");
/// ```
pub fn parse_vision_response(response: &str) -> Result<VisionAnalysis> {
    let parsed: AnalyzeResponse = serde_json::from_str(response.trim())
        .map_err(|e| Error::Parse(format!("analyze response: {}", e)))?;

    Ok(VisionAnalysis {
        tags: parsed.tags.into_iter().map(|t| t.name).collect(),
        captions: parsed
            .description
            .map(|d| d.captions.into_iter().map(|c| c.text).collect())
            .unwrap_or_default(),
    })
}

/// エラーレスポンスからメッセージを抽出
///
/// `{"error": {"code": ..., "message": ...}}` 形式でなければ None
pub fn parse_vision_error(body: &str) -> Option<String> {
    let parsed: ErrorResponse = serde_json::from_str(body.trim()).ok()?;
    let ErrorBody { code, message } = parsed.error;

    match (code.is_empty(), message.is_empty()) {
        (true, true) => None,
        (true, false) => Some(message),
        (false, true) => Some(code),
        (false, false) => Some(format!("({}) {}", code, message)),
    }
}
