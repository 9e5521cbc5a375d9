//! Azure Computer Vision連携モジュール
//!
//! analyze API (v3.2) に画像を送り、タグとキャプションを取得する

use super::VisionService;
use crate::config::Config;
use crate::error::{DashboardError, Result};
use async_trait::async_trait;
use maize_dashboard_common::{parse_vision_error, parse_vision_response, VisionAnalysis};
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use tracing::{debug, warn};

const ANALYZE_PATH: &str = "/vision/v3.2/analyze";
const VISUAL_FEATURES: &str = "Description,Tags,Objects";
const LANGUAGE: &str = "en";
const KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// Azure Computer Vision クライアント
///
/// エンドポイントやキーが未設定でも生成でき、最初の呼び出しで失敗する
pub struct AzureVision {
    client: reqwest::Client,
    endpoint: Option<String>,
    api_key: Option<String>,
}

impl AzureVision {
    pub fn new(
        endpoint: Option<String>,
        api_key: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: endpoint.filter(|e| !e.trim().is_empty()),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let vision = Self::new(
            config.endpoint(),
            config.api_key(),
            config.timeout_seconds.map(Duration::from_secs),
        )?;

        if !vision.is_configured() {
            warn!("vision service credentials missing; image analysis will fail until configured");
        }

        Ok(vision)
    }

    pub fn is_configured(&self) -> bool {
        self.endpoint.is_some() && self.api_key.is_some()
    }
}

fn analyze_url(endpoint: &str) -> String {
    format!("{}{}", endpoint.trim().trim_end_matches('/'), ANALYZE_PATH)
}

#[async_trait]
impl VisionService for AzureVision {
    async fn describe(&self, jpeg: &[u8]) -> Result<VisionAnalysis> {
        let (endpoint, api_key) = match (&self.endpoint, &self.api_key) {
            (Some(endpoint), Some(api_key)) => (endpoint, api_key),
            _ => return Err(DashboardError::MissingCredentials),
        };

        let url = analyze_url(endpoint);
        debug!(%url, "calling vision analyze");

        let response = self
            .client
            .post(&url)
            .query(&[("visualFeatures", VISUAL_FEATURES), ("language", LANGUAGE)])
            .header(KEY_HEADER, api_key)
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(jpeg.to_vec())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = parse_vision_error(&body)
                .unwrap_or_else(|| format!("request failed with status {}", status));
            return Err(DashboardError::ApiCall(message));
        }

        Ok(parse_vision_response(&body)?)
    }
}
