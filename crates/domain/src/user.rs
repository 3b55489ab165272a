//! # ユーザー
//!
//! ユーザーエンティティとそれに関連する値オブジェクトを定義する。
//!
//! ## 設計方針
//!
//! - **Newtype パターン**: UserId は `i64` をラップし、型安全性を確保
//! - **バリデーション**: Username は生成時に空チェックと最大長チェックを行う
//! - **ハッシュのみ保持**: User は平文パスワードを持たない

use derive_more::Display;
use serde::Serialize;

use crate::{DomainError, password::PasswordHash};

/// ユーザー名の最大文字数
pub const USERNAME_MAX_LENGTH: usize = 80;

/// ユーザー ID
///
/// ストアが作成時に採番する連番。作成後は不変。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Display)]
#[serde(transparent)]
#[display("{_0}")]
pub struct UserId(i64);

impl UserId {
    /// 既存の値からユーザー ID を作成する
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// 内部の値を取得する
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

/// ユーザー名（値オブジェクト）
///
/// # バリデーション
///
/// - 空文字列ではない
/// - 最大 [`USERNAME_MAX_LENGTH`] 文字（`chars().count()` でカウント）
///
/// 入力はそのまま保持する。前後の空白も除去しない。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Display)]
#[serde(transparent)]
#[display("{_0}")]
pub struct Username(String);

impl Username {
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();

        if value.is_empty() {
            return Err(DomainError::Validation("username は必須です".to_string()));
        }

        if value.chars().count() > USERNAME_MAX_LENGTH {
            return Err(DomainError::Validation(format!(
                "username は {} 文字以内である必要があります",
                USERNAME_MAX_LENGTH
            )));
        }

        Ok(Self(value))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// ユーザーエンティティ
///
/// # 不変条件
///
/// - `username` は全ユーザーで一意（ストアの一意制約で保証）
/// - `password_hash` は KDF の出力であり、平文ではない
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id:            UserId,
    username:      Username,
    password_hash: PasswordHash,
}

impl User {
    /// 既存のデータからユーザーを復元する（データベースから取得時）
    pub fn from_db(id: UserId, username: Username, password_hash: PasswordHash) -> Self {
        Self {
            id,
            username,
            password_hash,
        }
    }

    // Getter メソッド

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("alice", "alice")]
    #[case("  alice  ", "  alice  ")]
    #[case("   ", "   ")]
    #[case("山田太郎", "山田太郎")]
    fn test_ユーザー名を作成できる(#[case] input: &str, #[case] expected: &str) {
        let username = Username::new(input).unwrap();
        assert_eq!(username.as_str(), expected);
    }

    #[rstest]
    fn test_空のユーザー名はエラー() {
        assert!(matches!(
            Username::new(""),
            Err(DomainError::Validation(_))
        ));
    }

    #[rstest]
    fn test_前後の空白が異なるユーザー名は別の値になる() {
        let padded = Username::new(" alice").unwrap();
        let plain = Username::new("alice").unwrap();

        assert_ne!(padded, plain);
    }

    #[rstest]
    fn test_ユーザー名は80文字まで許可される() {
        let username = Username::new("a".repeat(80)).unwrap();
        assert_eq!(username.as_str().chars().count(), 80);
    }

    #[rstest]
    fn test_ユーザー名が81文字ならエラー() {
        assert!(Username::new("a".repeat(81)).is_err());
    }

    #[rstest]
    fn test_マルチバイト文字は文字数でカウントする() {
        assert!(Username::new("あ".repeat(80)).is_ok());
        assert!(Username::new("あ".repeat(81)).is_err());
    }

    #[rstest]
    fn test_user_idはjsonで数値としてシリアライズされる() {
        let json = serde_json::to_value(UserId::new(1)).unwrap();
        assert_eq!(json, serde_json::json!(1));
    }

    #[rstest]
    fn test_from_dbでフィールドが復元される() {
        let user = User::from_db(
            UserId::new(7),
            Username::new("bob").unwrap(),
            PasswordHash::new("$pbkdf2-sha256$dummy"),
        );

        assert_eq!(user.id(), UserId::new(7));
        assert_eq!(user.username().as_str(), "bob");
        assert_eq!(user.password_hash().as_str(), "$pbkdf2-sha256$dummy");
    }
}
