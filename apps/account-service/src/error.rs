//! # Account Service エラー定義
//!
//! Account Service 固有のエラーと、HTTP レスポンスへの変換を定義する。
//!
//! エラーレスポンスはすべて `{"message": "..."}` 形式。
//! 500 系は固定メッセージを返し、詳細はログにのみ出力する。

use account_domain::DomainError;
use account_infra::{InfraError, InfraErrorKind};
use account_shared::MessageResponse;
use axum::{
   Json,
   http::StatusCode,
   response::{IntoResponse, Response},
};
use thiserror::Error;

/// 500 レスポンスのメッセージ
const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Account Service で発生するエラー
#[derive(Debug, Error)]
pub enum AccountError {
   /// 入力値の欠落・不正
   #[error("{0}")]
   Validation(String),

   /// ユーザーが存在しない
   #[error("User not found")]
   NotFound,

   /// ユーザー名またはパスワードの誤り
   #[error("Invalid credentials")]
   InvalidCredentials,

   /// ユーザー名の重複
   #[error("Username already exists")]
   DuplicateUsername,

   /// データベースエラー
   #[error("データベースエラー: {0}")]
   Database(InfraError),

   /// 内部エラー
   ///
   /// KDF を実行するブロッキングタスクが完了しなかった場合など。
   #[error("内部エラー: {0}")]
   Internal(String),
}

impl AccountError {
   /// HTTP ステータスコード
   pub fn status_code(&self) -> StatusCode {
      match self {
         AccountError::Validation(_) => StatusCode::BAD_REQUEST,
         AccountError::NotFound => StatusCode::NOT_FOUND,
         AccountError::InvalidCredentials => StatusCode::UNAUTHORIZED,
         AccountError::DuplicateUsername => StatusCode::CONFLICT,
         AccountError::Database(_) | AccountError::Internal(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
         }
      }
   }
}

impl From<InfraError> for AccountError {
   fn from(err: InfraError) -> Self {
      match err.kind() {
         InfraErrorKind::Conflict { .. } => AccountError::DuplicateUsername,
         _ => AccountError::Database(err),
      }
   }
}

impl From<DomainError> for AccountError {
   fn from(err: DomainError) -> Self {
      let DomainError::Validation(msg) = err;
      AccountError::Validation(msg)
   }
}

impl IntoResponse for AccountError {
   fn into_response(self) -> Response {
      let status = self.status_code();
      let message = match &self {
         AccountError::Database(e) => {
            tracing::error!(span_trace = %e.span_trace(), "データベースエラー: {}", e);
            INTERNAL_ERROR_MESSAGE.to_string()
         }
         AccountError::Internal(msg) => {
            tracing::error!("内部エラー: {}", msg);
            INTERNAL_ERROR_MESSAGE.to_string()
         }
         other => other.to_string(),
      };

      (status, Json(MessageResponse::new(message))).into_response()
   }
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;
   use rstest::rstest;

   use super::*;

   async fn into_parts(err: AccountError) -> (StatusCode, serde_json::Value) {
      let response = err.into_response();
      let status = response.status();
      let body = axum::body::to_bytes(response.into_body(), usize::MAX)
         .await
         .unwrap();
      (status, serde_json::from_slice(&body).unwrap())
   }

   #[rstest]
   #[case(AccountError::Validation("username は必須です".to_string()), StatusCode::BAD_REQUEST, "username は必須です")]
   #[case(AccountError::NotFound, StatusCode::NOT_FOUND, "User not found")]
   #[case(AccountError::InvalidCredentials, StatusCode::UNAUTHORIZED, "Invalid credentials")]
   #[case(AccountError::DuplicateUsername, StatusCode::CONFLICT, "Username already exists")]
   #[case(AccountError::Internal("boom".to_string()), StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")]
   #[tokio::test]
   async fn test_エラーはmessage形式のレスポンスになる(
      #[case] err: AccountError,
      #[case] expected_status: StatusCode,
      #[case] expected_message: &str,
   ) {
      let (status, json) = into_parts(err).await;

      assert_eq!(status, expected_status);
      assert_eq!(json, serde_json::json!({ "message": expected_message }));
   }

   #[tokio::test]
   async fn test_データベースエラーの詳細はレスポンスに含めない() {
      let err = AccountError::from(InfraError::unexpected("connection refused"));

      let (status, json) = into_parts(err).await;

      assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
      assert_eq!(json["message"], "Internal server error");
   }

   #[test]
   fn test_一意制約違反はduplicate_usernameに変換される() {
      let err = AccountError::from(InfraError::conflict("User", "alice"));

      assert!(matches!(err, AccountError::DuplicateUsername));
   }

   #[test]
   fn test_ドメインのバリデーションエラーはメッセージを引き継ぐ() {
      let err = AccountError::from(DomainError::Validation("password は必須です".to_string()));

      assert!(matches!(err, AccountError::Validation(ref msg) if msg == "password は必須です"));
   }
}
