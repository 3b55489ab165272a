//! # アカウントユースケース
//!
//! ユーザーの登録・認証・一覧・更新・削除を実装する。
//!
//! ## パスワードの扱い
//!
//! 平文パスワードは保存も直接比較もしない。登録・更新時に
//! [`PasswordChecker::hash`] でハッシュ化し、ログイン時は
//! [`PasswordChecker::verify`] で検証する。
//!
//! ## タイミング攻撃対策
//!
//! ログイン時にユーザーが存在しない場合もダミーハッシュで
//! 検証を実行し、処理時間を均一化する。
//!
//! ## ブロッキング処理
//!
//! KDF の計算は CPU を占有するため、`spawn_blocking` で
//! ブロッキングスレッドに逃がし、非同期ランタイムのワーカーを塞がない。

use std::sync::Arc;

use account_domain::{
    password::{PasswordHash, PasswordVerifyResult, PlainPassword},
    user::{User, UserId, Username},
};
use account_infra::{PasswordChecker, repository::UserRepository};

use crate::error::AccountError;

/// アカウントユースケースの実装
pub struct AccountUseCaseImpl {
    user_repository:  Arc<dyn UserRepository>,
    password_checker: Arc<dyn PasswordChecker>,
}

impl AccountUseCaseImpl {
    /// 新しいユースケースインスタンスを作成
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        password_checker: Arc<dyn PasswordChecker>,
    ) -> Self {
        Self {
            user_repository,
            password_checker,
        }
    }

    /// ユーザーを登録する
    pub async fn register(
        &self,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<User, AccountError> {
        let (username, password) = parse_credentials(username, password)?;

        let hash = self.hash_password(password).await?;
        let user = self.user_repository.create(&username, &hash).await?;

        tracing::info!(user_id = %user.id(), username = %user.username(), "ユーザーを登録しました");
        Ok(user)
    }

    /// ユーザー名とパスワードで認証する
    ///
    /// ## タイミング攻撃対策
    ///
    /// ユーザーが見つからない場合もダミーハッシュで検証を実行し、
    /// 処理時間を均一化する。
    ///
    /// ## 入力チェック
    ///
    /// 未指定と空文字列だけを `Validation` とする。登録できない長さの
    /// ユーザー名は該当ユーザーなしと同じ扱いで `InvalidCredentials` を返す。
    pub async fn login(
        &self,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<User, AccountError> {
        let raw_username = username.unwrap_or_default();
        let username = match Username::new(raw_username) {
            Ok(username) => Some(username),
            Err(e) if raw_username.is_empty() => return Err(e.into()),
            Err(_) => None,
        };
        let password = PlainPassword::new(password.unwrap_or_default())?;

        let Some(username) = username else {
            self.dummy_verify(password).await?;
            tracing::warn!("ログイン失敗: ユーザー名が長すぎます");
            return Err(AccountError::InvalidCredentials);
        };

        let Some(user) = self.user_repository.find_by_username(&username).await? else {
            self.dummy_verify(password).await?;
            tracing::warn!(username = %username, "ログイン失敗: ユーザーが存在しません");
            return Err(AccountError::InvalidCredentials);
        };

        let result = self
            .verify_password(password, user.password_hash().clone())
            .await?;
        if result.is_mismatch() {
            tracing::warn!(username = %username, "ログイン失敗: パスワード不一致");
            return Err(AccountError::InvalidCredentials);
        }

        Ok(user)
    }

    /// 全ユーザーを取得する
    pub async fn list_users(&self) -> Result<Vec<User>, AccountError> {
        Ok(self.user_repository.find_all().await?)
    }

    /// ユーザー名とパスワードを更新する
    ///
    /// パスワードは毎回ハッシュし直す。
    pub async fn update_user(
        &self,
        id: i64,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<User, AccountError> {
        let id = UserId::new(id);
        let (username, password) = parse_credentials(username, password)?;

        if self.user_repository.find_by_id(id).await?.is_none() {
            return Err(AccountError::NotFound);
        }

        let hash = self.hash_password(password).await?;
        let user = self
            .user_repository
            .update(id, &username, &hash)
            .await?
            .ok_or(AccountError::NotFound)?;

        tracing::info!(user_id = %id, username = %user.username(), "ユーザーを更新しました");
        Ok(user)
    }

    /// ユーザーを削除する
    pub async fn delete_user(&self, id: i64) -> Result<(), AccountError> {
        let id = UserId::new(id);
        if !self.user_repository.delete(id).await? {
            return Err(AccountError::NotFound);
        }

        tracing::info!(user_id = %id, "ユーザーを削除しました");
        Ok(())
    }

    async fn hash_password(&self, password: PlainPassword) -> Result<PasswordHash, AccountError> {
        let checker = Arc::clone(&self.password_checker);
        let hash = tokio::task::spawn_blocking(move || checker.hash(&password))
            .await
            .map_err(|e| AccountError::Internal(e.to_string()))??;
        Ok(hash)
    }

    async fn verify_password(
        &self,
        password: PlainPassword,
        hash: PasswordHash,
    ) -> Result<PasswordVerifyResult, AccountError> {
        let checker = Arc::clone(&self.password_checker);
        let result = tokio::task::spawn_blocking(move || checker.verify(&password, &hash))
            .await
            .map_err(|e| AccountError::Internal(e.to_string()))??;
        Ok(result)
    }

    async fn dummy_verify(&self, password: PlainPassword) -> Result<(), AccountError> {
        let checker = Arc::clone(&self.password_checker);
        tokio::task::spawn_blocking(move || checker.dummy_verify(&password))
            .await
            .map_err(|e| AccountError::Internal(e.to_string()))
    }
}

/// リクエストの値を必須チェックしてドメイン型に変換する
///
/// 未指定と空文字列はどちらも `Validation` になる。
fn parse_credentials(
    username: Option<&str>,
    password: Option<&str>,
) -> Result<(Username, PlainPassword), AccountError> {
    let username = Username::new(username.unwrap_or_default())?;
    let password = PlainPassword::new(password.unwrap_or_default())?;
    Ok((username, password))
}
