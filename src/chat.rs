//! チャット応答（定型文テーブルのラッパー）

use maize_dashboard_common::{lookup_response, ContextBundle, APOLOGY_RESPONSE};
use std::panic::{self, UnwindSafe};
use tracing::{debug, error};

/// 農場チャットの応答を返す
///
/// 内部で失敗しても謝罪文を返し、呼び出し側には伝播しない
pub fn get_farm_response(message: &str, context: &ContextBundle) -> String {
    let response = respond_with(|| lookup_response(message, Some(context)));
    debug!(chars = message.len(), "chat response selected");
    response
}

fn respond_with<F>(lookup: F) -> String
where
    F: FnOnce() -> &'static str + UnwindSafe,
{
    match panic::catch_unwind(lookup) {
        Ok(response) => response.to_string(),
        Err(_) => {
            error!("Error generating response");
            APOLOGY_RESPONSE.to_string()
        }
    }
}
