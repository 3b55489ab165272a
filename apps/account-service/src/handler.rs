//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュールで re-export し、フラットな API を提供
//! - ハンドラは薄く保ち、ビジネスロジックは usecase 層に委譲
//!
//! ## ハンドラ一覧
//!
//! - `health`: ヘルスチェック
//! - `account`: ユーザー登録・ログイン・一覧・更新・削除

pub mod account;
mod extract;
pub mod health;

pub use account::{AccountState, delete_user, list_users, login, register, update_user};
pub use extract::{JsonBody, UserIdPath};
pub use health::{ReadinessState, health_check, readiness_check};
