//! # Account 共有ユーティリティ
//!
//! サービス本体とインフラ層から使われる、ビジネスロジックを含まない
//! 共通ユーティリティ。
//!
//! - [`message_response`] - `{ "message": ... }` 形式のレスポンス本文
//! - [`health`] - ヘルスチェック / Readiness Check のレスポンス型
//! - [`observability`] - トレーシング初期化、リクエストスパン、リクエスト ID
//! - `canonical_log` - リクエスト完了サマリログ（`observability` feature 有効時のみ）

#[cfg(feature = "observability")]
pub mod canonical_log;
pub mod health;
pub mod message_response;
pub mod observability;

pub use health::{CheckStatus, HealthResponse, ReadinessResponse, ReadinessStatus};
pub use message_response::MessageResponse;
