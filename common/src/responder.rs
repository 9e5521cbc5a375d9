//! チャット応答
//!
//! キーワード → 定型文の固定テーブルを引くだけの応答。
//! 検索や生成は行わない。

use crate::farm::ContextBundle;

/// キーワード → 定型文（宣言順に評価）
pub const RESPONSES: &[(&str, &str)] = &[
    (
        "health",
        "The maize crop is showing good health metrics with optimal pH and humidity levels.",
    ),
    (
        "water",
        "Current water levels are at 85%, which is within the optimal range for maize growth.",
    ),
    (
        "nutrients",
        "Nutrient levels are at 72%. Consider adjusting nutrient delivery in the next 24 hours.",
    ),
    (
        "growth",
        "The maize is growing at an optimal rate based on current environmental conditions.",
    ),
    (
        "temperature",
        "Temperature is maintained at 23.5°C, which is ideal for maize cultivation.",
    ),
];

/// どのキーワードにも一致しない場合の応答
pub const FALLBACK_RESPONSE: &str = "I can help you with information about maize health, water levels, nutrients, growth, and temperature. What would you like to know?";

/// 内部エラー時の応答
pub const APOLOGY_RESPONSE: &str = "I apologize, but I'm having trouble processing your request.";

/// 定型文を検索
///
/// 入力を小文字化し、最初に部分一致したキーワードの定型文を返す。
/// `_context` は受け取るだけで参照しない。
pub fn lookup_response(message: &str, _context: Option<&ContextBundle>) -> &'static str {
    let message = message.to_lowercase();

    RESPONSES
        .iter()
        .find(|(key, _)| message.contains(key))
        .map(|(_, response)| *response)
        .unwrap_or(FALLBACK_RESPONSE)
}
