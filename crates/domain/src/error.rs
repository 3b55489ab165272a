//! # ドメイン層エラー定義
//!
//! ビジネスルール違反やドメイン固有の例外状態を表現するエラー型。
//!
//! ## エラーの種類と HTTP ステータスの対応
//!
//! | エラー種別 | HTTP ステータス | 用途 |
//! |-----------|----------------|------|
//! | `Validation` | 400 Bad Request | 必須項目の欠落、文字数超過 |
//!
//! ## 使用例
//!
//! ```rust
//! use account_domain::DomainError;
//!
//! fn require(value: &str) -> Result<(), DomainError> {
//!     if value.is_empty() {
//!         return Err(DomainError::Validation("username は必須です".to_string()));
//!     }
//!     Ok(())
//! }
//!
//! assert!(require("").is_err());
//! ```

use thiserror::Error;

/// ドメイン層で発生するエラー
///
/// API 層でこのエラーを受け取り、適切な HTTP レスポンスに変換する。
#[derive(Debug, Error)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// - 必須フィールドが未入力
    /// - 文字数制限の超過
    #[error("バリデーションエラー: {0}")]
    Validation(String),
}
