//! # リクエスト抽出器
//!
//! axum 標準の `Json` / `Path` をラップし、リジェクションを
//! [`AccountError::Validation`] に変換する。
//! これにより不正な入力もすべて `400 {"message": ...}` で返る。

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::error::AccountError;

/// JSON ボディ抽出器
///
/// 本文が JSON として解析できない場合、Content-Type が不正な場合は
/// 400 を返す。
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AccountError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => Err(AccountError::Validation(rejection.body_text())),
        }
    }
}

/// パスの `{id}` を整数のユーザー ID として取り出す抽出器
#[derive(Debug, Clone, Copy)]
pub struct UserIdPath(pub i64);

impl<S> FromRequestParts<S> for UserIdPath
where
    S: Send + Sync,
{
    type Rejection = AccountError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|_| AccountError::Validation("Invalid user id".to_string()))?;
        Ok(UserIdPath(id))
    }
}
