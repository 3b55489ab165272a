//! # リポジトリ実装
//!
//! アカウントストアのトレイトと具体的な実装を提供する。
//!
//! ## 設計方針
//!
//! - **トレイト経由のアクセス**: ユースケース層は `dyn UserRepository` のみに依存
//! - **単一文で完結**: 各操作は 1 つの SQL 文（auto-commit）で完結し、
//!   複数操作にまたがるトランザクションは持たない

pub mod user_repository;

pub use user_repository::{PostgresUserRepository, UserRepository};
