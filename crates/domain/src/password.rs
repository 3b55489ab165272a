//! # パスワード
//!
//! パスワード関連の値オブジェクトを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 用途 |
//! |---|------------|------|
//! | [`PlainPassword`] | 平文パスワード | 登録・更新・ログイン時の入力値 |
//! | [`PasswordHash`] | パスワードハッシュ | 永続化用の PHC 形式文字列 |
//! | [`PasswordVerifyResult`] | 検証結果 | パスワード検証の成否 |

use crate::DomainError;

/// 平文パスワード（リクエストの入力値）
///
/// # セキュリティ
///
/// Debug 出力ではパスワードの値をマスクする。
/// 平文同士の比較はできない（`PartialEq` を実装しない）。
#[derive(Clone)]
pub struct PlainPassword(String);

impl std::fmt::Debug for PlainPassword {
   fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
      f.debug_tuple("PlainPassword").field(&"[REDACTED]").finish()
   }
}

impl PlainPassword {
   /// パスワードを作成する
   ///
   /// 前後の空白も含めてそのまま保持する（trim しない）。
   ///
   /// # エラー
   ///
   /// 空文字列の場合は `DomainError::Validation` を返す。
   pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
      let value = value.into();
      if value.is_empty() {
         return Err(DomainError::Validation("password は必須です".to_string()));
      }
      Ok(Self(value))
   }

   /// 文字列参照を取得する
   pub fn as_str(&self) -> &str {
      &self.0
   }

   /// バイト列を取得する（KDF への入力用）
   pub fn as_bytes(&self) -> &[u8] {
      self.0.as_bytes()
   }
}

/// パスワードハッシュ（永続化用）
///
/// PHC 形式（`$pbkdf2-sha256$...` / `$argon2id$...`）の文字列をラップする。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
   /// ハッシュ文字列からインスタンスを作成する
   ///
   /// 主にデータベースからの復元時に使用する。
   pub fn new(hash: impl Into<String>) -> Self {
      Self(hash.into())
   }

   /// 文字列参照を取得する
   pub fn as_str(&self) -> &str {
      &self.0
   }
}

/// パスワード検証結果
///
/// bool ではなく専用の型を使うことで、意図が明確になる。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordVerifyResult {
   /// パスワードが一致した
   Match,
   /// パスワードが一致しなかった
   Mismatch,
}

impl PasswordVerifyResult {
   /// 一致したかどうかを返す
   pub fn is_match(&self) -> bool {
      matches!(self, Self::Match)
   }

   /// 一致しなかったかどうかを返す
   pub fn is_mismatch(&self) -> bool {
      matches!(self, Self::Mismatch)
   }
}

impl From<bool> for PasswordVerifyResult {
   fn from(matched: bool) -> Self {
      if matched { Self::Match } else { Self::Mismatch }
   }
}
