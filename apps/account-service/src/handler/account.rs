//! # アカウントハンドラ
//!
//! ユーザーアカウントの HTTP エンドポイントを提供する。
//!
//! ## エンドポイント
//!
//! - `POST /register` - ユーザー登録
//! - `POST /login` - ログイン
//! - `GET /users` - ユーザー一覧
//! - `PUT /users/{id}` - ユーザー更新
//! - `DELETE /users/{id}` - ユーザー削除

use std::sync::Arc;

use account_domain::user::{User, UserId, Username};
use account_shared::MessageResponse;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};

use super::extract::{JsonBody, UserIdPath};
use crate::{error::AccountError, usecase::AccountUseCase};

/// アカウントハンドラの共有状態
pub struct AccountState {
    pub usecase: Arc<dyn AccountUseCase>,
}

// --- リクエスト/レスポンス型 ---

/// ユーザー名とパスワードのリクエスト（登録・ログイン・更新で共通）
///
/// 必須チェックはユースケースで行うため、ここでは `Option` で受ける。
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl CredentialsRequest {
    fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }
}

/// ユーザー一覧の要素
///
/// パスワードハッシュは含めない。
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id:       UserId,
    pub username: Username,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id:       user.id(),
            username: user.username().clone(),
        }
    }
}

// --- ハンドラ ---

/// POST /register
pub async fn register(
    State(state): State<Arc<AccountState>>,
    JsonBody(req): JsonBody<CredentialsRequest>,
) -> Result<impl IntoResponse, AccountError> {
    state
        .usecase
        .register(req.username(), req.password())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User registered successfully")),
    ))
}

/// POST /login
///
/// 認証のみを行い、セッションやトークンは発行しない。
pub async fn login(
    State(state): State<Arc<AccountState>>,
    JsonBody(req): JsonBody<CredentialsRequest>,
) -> Result<impl IntoResponse, AccountError> {
    state.usecase.login(req.username(), req.password()).await?;

    Ok(Json(MessageResponse::new("Logged in successfully")))
}

/// GET /users
pub async fn list_users(
    State(state): State<Arc<AccountState>>,
) -> Result<impl IntoResponse, AccountError> {
    let users = state.usecase.list_users().await?;

    Ok(Json(
        users
            .into_iter()
            .map(UserResponse::from)
            .collect::<Vec<_>>(),
    ))
}

/// PUT /users/{id}
pub async fn update_user(
    State(state): State<Arc<AccountState>>,
    UserIdPath(id): UserIdPath,
    JsonBody(req): JsonBody<CredentialsRequest>,
) -> Result<impl IntoResponse, AccountError> {
    state
        .usecase
        .update_user(id, req.username(), req.password())
        .await?;

    Ok(Json(MessageResponse::new("User updated successfully")))
}

/// DELETE /users/{id}
pub async fn delete_user(
    State(state): State<Arc<AccountState>>,
    UserIdPath(id): UserIdPath,
) -> Result<impl IntoResponse, AccountError> {
    state.usecase.delete_user(id).await?;

    Ok(Json(MessageResponse::new("User deleted successfully")))
}
