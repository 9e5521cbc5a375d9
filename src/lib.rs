//! Maize Dashboard
//!
//! 農場ダッシュボードのサーバー・CLI共通部分

pub mod analyzer;
pub mod chat;
pub mod cli;
pub mod config;
pub mod error;
pub mod server;
pub mod upload;
