//! # メッセージレスポンス
//!
//! 成功・失敗のどちらでも使う `{ "message": "..." }` 形式の本文。
//!
//! axum の `IntoResponse` 変換はサービス側の責務（shared に axum 依存を入れない）。

use serde::{Deserialize, Serialize};

/// メッセージのみを持つレスポンス本文
///
/// ```
/// use account_shared::MessageResponse;
///
/// let body = MessageResponse::new("User registered successfully");
/// assert_eq!(body.message, "User registered successfully");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
   pub message: String,
}

impl MessageResponse {
   pub fn new(message: impl Into<String>) -> Self {
      Self {
         message: message.into(),
      }
   }
}
