//! Maize Dashboard Common Library
//!
//! サーバーとCLIで共有される型と判定ロジック（I/Oなし）

pub mod types;
pub mod error;
pub mod farm;
pub mod parser;
pub mod analyzer;
pub mod responder;

pub use types::{ClassificationResult, HealthStatus, LeafAnalysis, VisionAnalysis};
pub use error::{Error, Result};
pub use farm::ContextBundle;
pub use parser::{parse_vision_error, parse_vision_response};
pub use analyzer::{build_classification, build_search_text, classify_health, CONFIDENCE};
pub use responder::{lookup_response, APOLOGY_RESPONSE, FALLBACK_RESPONSE};
