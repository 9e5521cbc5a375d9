//! ダッシュボードHTTPサーバー
//!
//! - GET  /             ダッシュボード画面
//! - POST /api/analyze  葉の画像判定（Data URL）
//! - POST /api/chat     チャット応答
//! - GET  /api/farm     農場データ
//! - GET  /health       死活確認

mod dashboard;

pub use dashboard::render_dashboard;

use crate::analyzer::{self, VisionService};
use crate::chat;
use crate::error::Result;
use crate::upload;
use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use maize_dashboard_common::{ClassificationResult, ContextBundle};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

/// アップロード上限（Base64化した画像を含むJSON全体）
const UPLOAD_LIMIT: usize = 20 * 1024 * 1024;

/// 起動後は読み取り専用
pub struct AppState {
    pub vision: Arc<dyn VisionService>,
    pub context: ContextBundle,
}

impl AppState {
    pub fn new(vision: Arc<dyn VisionService>) -> Self {
        Self {
            vision,
            context: ContextBundle::snapshot(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/api/analyze", post(analyze))
        .route("/api/chat", post(send_chat))
        .route("/api/farm", get(farm))
        .layer(DefaultBodyLimit::max(UPLOAD_LIMIT))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

pub async fn run(bind: &str, port: u16, state: AppState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind((bind, port)).await?;
    info!("Starting dashboard on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state)).await?;
    Ok(())
}

// エラーレスポンス
struct AppError(StatusCode, String);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.0, Json(json!({ "error": self.1 }))).into_response()
    }
}

/// リクエストボディの拒否もJSONのエラー形式で返す（413はそのまま）
fn body_rejection(rejection: JsonRejection) -> AppError {
    let status = match rejection.status() {
        StatusCode::PAYLOAD_TOO_LARGE => StatusCode::PAYLOAD_TOO_LARGE,
        _ => StatusCode::BAD_REQUEST,
    };
    warn!("rejected request body: {}", rejection.body_text());
    AppError(status, rejection.body_text())
}

async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(render_dashboard(&state.context, chrono::Local::now()))
}

async fn health_check() -> &'static str {
    "OK"
}

async fn farm(State(state): State<Arc<AppState>>) -> Json<ContextBundle> {
    Json(state.context.clone())
}

#[derive(Deserialize)]
struct AnalyzeRequest {
    contents: String,
}

async fn analyze(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<AnalyzeRequest>, JsonRejection>,
) -> std::result::Result<Json<ClassificationResult>, AppError> {
    let Json(request) = payload.map_err(body_rejection)?;
    debug!(
        mime = upload::extract_mime_type_from_data_url(&request.contents),
        "image upload received"
    );

    let image = upload::decode_data_url(&request.contents).map_err(|e| {
        warn!("rejected upload: {}", e);
        AppError(StatusCode::BAD_REQUEST, e.to_string())
    })?;

    let result = analyzer::analyze_maize_image(state.vision.as_ref(), &image).await;
    Ok(Json(result))
}

#[derive(Deserialize)]
struct ChatRequest {
    message: String,
}

#[derive(Serialize)]
struct ChatResponse {
    response: String,
}

async fn send_chat(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<ChatRequest>, JsonRejection>,
) -> std::result::Result<Json<ChatResponse>, AppError> {
    let Json(request) = payload.map_err(body_rejection)?;

    // 空白だけのメッセージはそのまま照合してフォールバック応答を返す
    if request.message.is_empty() {
        return Err(AppError(StatusCode::BAD_REQUEST, "message is empty".into()));
    }

    Ok(Json(ChatResponse {
        response: chat::get_farm_response(&request.message, &state.context),
    }))
}
