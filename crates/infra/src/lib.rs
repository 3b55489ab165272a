//! # Account インフラ層
//!
//! 外部システム（PostgreSQL）との接続と、パスワードハッシュの具体実装を担当する。
//!
//! ## 依存関係
//!
//! ```text
//! account-service → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`db`] - PostgreSQL 接続プールとスキーマ準備
//! - [`error`] - インフラ層エラー定義
//! - [`password`] - PBKDF2-SHA256 / Argon2id によるハッシュ化と検証
//! - [`repository`] - リポジトリトレイトと PostgreSQL 実装
//! - `mock` - インメモリモック（`test-utils` feature 有効時のみ）
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use account_infra::{db, repository::PostgresUserRepository};
//!
//! async fn setup() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = db::create_pool("postgres://localhost/accounts", 10).await?;
//!     db::ensure_schema(&pool).await?;
//!     let repo = PostgresUserRepository::new(pool.clone());
//!     // ...
//!     db::close(&pool).await;
//!     Ok(())
//! }
//! ```

pub mod db;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod password;
pub mod repository;

pub use error::{InfraError, InfraErrorKind};
pub use password::{
    Argon2PasswordChecker,
    PasswordAlgorithm,
    PasswordChecker,
    Pbkdf2PasswordChecker,
};
