//! # ユースケース層
//!
//! Account Service のビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - **トレイトベースの設計**: テスト可能性のためトレイトを定義
//! - **依存性注入**: リポジトリとパスワードチェッカーを外部から注入
//! - **薄いハンドラ**: ハンドラは薄く保ち、ロジックはユースケースに集約

pub mod account;

pub use account::AccountUseCaseImpl;
use account_domain::user::User;
use async_trait::async_trait;

use crate::error::AccountError;

/// アカウントユースケーストレイト
///
/// 入力は HTTP リクエストの値をそのまま受け取り、必須チェックと
/// ドメイン型への変換もユースケース側で行う。
/// 具体的な実装は `AccountUseCaseImpl` で提供される。
#[async_trait]
pub trait AccountUseCase: Send + Sync {
    /// ユーザーを登録する
    ///
    /// - `Err(AccountError::Validation)`: 必須項目の欠落、ユーザー名が長すぎる
    /// - `Err(AccountError::DuplicateUsername)`: ユーザー名が使用済み
    async fn register(
        &self,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<User, AccountError>;

    /// ユーザー名とパスワードで認証する
    ///
    /// ユーザーが存在しない場合とパスワードが一致しない場合は、
    /// どちらも `Err(AccountError::InvalidCredentials)` を返す。
    /// 必須項目の欠落だけが `Err(AccountError::Validation)` になる。
    async fn login(
        &self,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<User, AccountError>;

    /// 全ユーザーを ID 昇順で取得する
    async fn list_users(&self) -> Result<Vec<User>, AccountError>;

    /// ユーザー名とパスワードを更新する
    ///
    /// - `Err(AccountError::NotFound)`: ID に対応するユーザーが存在しない
    async fn update_user(
        &self,
        id: i64,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<User, AccountError>;

    /// ユーザーを削除する
    ///
    /// - `Err(AccountError::NotFound)`: ID に対応するユーザーが存在しない
    async fn delete_user(&self, id: i64) -> Result<(), AccountError>;
}

/// AccountUseCaseImpl に AccountUseCase トレイトを実装
#[async_trait]
impl AccountUseCase for AccountUseCaseImpl {
    async fn register(
        &self,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<User, AccountError> {
        self.register(username, password).await
    }

    async fn login(
        &self,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<User, AccountError> {
        self.login(username, password).await
    }

    async fn list_users(&self) -> Result<Vec<User>, AccountError> {
        self.list_users().await
    }

    async fn update_user(
        &self,
        id: i64,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<User, AccountError> {
        self.update_user(id, username, password).await
    }

    async fn delete_user(&self, id: i64) -> Result<(), AccountError> {
        self.delete_user(id).await
    }
}
