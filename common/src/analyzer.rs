//! 判定ロジック（サーバー/CLI共通）
//!
//! 画像認識サービスのタグ・キャプションから葉の健康状態を判定する

use crate::types::{ClassificationResult, HealthStatus, LeafAnalysis, VisionAnalysis};

/// 信頼度（全ラベル共通の固定値）
pub const CONFIDENCE: f64 = 0.99;

/// 判定ルール: (ラベル, キーワード)
///
/// 宣言順に評価し、最初に一致したラベルを採用する。
/// Blighted を Spotted より先に置いているため、両方のキーワードを含む場合は
/// テキスト内の出現位置に関係なく Blighted になる。
pub const HEALTH_RULES: &[(HealthStatus, &[&str])] = &[
    (
        HealthStatus::Blighted,
        &["blight", "blighted", "wilted", "dying", "diseased", "disease", "infected"],
    ),
    (
        HealthStatus::Spotted,
        &["spot", "spots", "spotted", "lesion", "lesions", "brown", "yellow"],
    ),
];

/// 検索用テキストを構築
///
/// 小文字化したタグと先頭キャプションを空白区切りで連結する
pub fn build_search_text(analysis: &VisionAnalysis) -> String {
    let mut parts: Vec<String> = analysis.tags.iter().map(|t| t.to_lowercase()).collect();
    parts.push(analysis.top_caption().to_lowercase());
    parts.join(" ")
}

/// 部分文字列一致で健康状態を判定
pub fn classify_health(text: &str) -> HealthStatus {
    HEALTH_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| text.contains(k)))
        .map(|(status, _)| *status)
        .unwrap_or(HealthStatus::Healthy)
}

/// 認識結果から判定結果を生成
pub fn build_classification(analysis: &VisionAnalysis) -> ClassificationResult {
    let health_status = classify_health(&build_search_text(analysis));

    ClassificationResult::Analyzed(LeafAnalysis {
        health_status,
        confidence: CONFIDENCE,
        description: format!("Leaf appears to be {}", health_status.as_str().to_lowercase()),
        tags: analysis.tags.iter().map(|t| t.to_lowercase()).collect(),
        raw_description: analysis.top_caption().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vision(tags: &[&str], caption: Option<&str>) -> VisionAnalysis {
        VisionAnalysis {
            tags: tags.iter().map(|t| t.to_string()).collect(),
            captions: caption.into_iter().map(|c| c.to_string()).collect(),
        }
    }

    #[test]
    fn test_search_text_joins_tags_and_caption() {
        let analysis = vision(&["Plant", "LEAF"], Some("A Green Leaf"));
        assert_eq!(build_search_text(&analysis), "plant leaf a green leaf");
    }

    #[test]
    fn test_search_text_without_caption() {
        let analysis = vision(&["corn"], None);
        assert_eq!(build_search_text(&analysis), "corn ");
    }

    #[test]
    fn test_classify_blighted() {
        assert_eq!(classify_health("a wilted corn plant"), HealthStatus::Blighted);
        assert_eq!(classify_health("infected"), HealthStatus::Blighted);
    }

    #[test]
    fn test_classify_spotted() {
        assert_eq!(classify_health("leaf with yellow patches"), HealthStatus::Spotted);
        assert_eq!(classify_health("lesion"), HealthStatus::Spotted);
    }

    #[test]
    fn test_classify_healthy() {
        assert_eq!(classify_health("green leaf outdoor plant"), HealthStatus::Healthy);
        assert_eq!(classify_health(""), HealthStatus::Healthy);
    }

    #[test]
    fn test_blight_precedes_spot() {
        // spot系キーワードが先に出現しても Blighted
        assert_eq!(classify_health("brown spots on a dying leaf"), HealthStatus::Blighted);
        assert_eq!(classify_health("disease yellow"), HealthStatus::Blighted);
    }

    #[test]
    fn test_substring_match() {
        // "sunspot" は "spot" を含む
        assert_eq!(classify_health("sunspot"), HealthStatus::Spotted);
    }

    #[test]
    fn test_build_classification_healthy() {
        let result = build_classification(&vision(&["Grass", "Plant"], Some("A field of corn")));

        match result {
            ClassificationResult::Analyzed(a) => {
                assert_eq!(a.health_status, HealthStatus::Healthy);
                assert_eq!(a.confidence, 0.99);
                assert_eq!(a.description, "Leaf appears to be healthy");
                assert_eq!(a.tags, vec!["grass", "plant"]);
                assert_eq!(a.raw_description, "A field of corn");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_build_classification_caption_only_match() {
        let result = build_classification(&vision(&["leaf"], Some("A Blighted maize leaf")));
        assert_eq!(result.health_status(), Some(HealthStatus::Blighted));
    }

    #[test]
    fn test_confidence_constant_for_every_label() {
        for analysis in [
            vision(&["blight"], None),
            vision(&["spots"], None),
            vision(&["leaf"], None),
        ] {
            match build_classification(&analysis) {
                ClassificationResult::Analyzed(a) => assert_eq!(a.confidence, CONFIDENCE),
                other => panic!("unexpected result: {:?}", other),
            }
        }
    }
}
