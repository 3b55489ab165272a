//! # UserRepository
//!
//! ユーザー情報の永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **単一文**: 各メソッドは 1 つの SQL 文で完結（auto-commit）
//! - **一意制約の変換**: `username` の一意制約違反は
//!   [`InfraErrorKind::Conflict`](crate::InfraErrorKind::Conflict) に変換する
//! - **行の不在は Option / bool で返す**: NotFound の判断はユースケース層が行う

use account_domain::{
   password::PasswordHash,
   user::{User, UserId, Username},
};
use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::InfraError;

/// ユーザーリポジトリトレイト
///
/// ユーザー情報の永続化操作を定義する。
#[async_trait]
pub trait UserRepository: Send + Sync {
   /// ユーザーを作成する
   ///
   /// # 戻り値
   ///
   /// - `Ok(user)`: 採番された ID を持つユーザー
   /// - `Err(_)`: 同じユーザー名が既に存在する場合は Conflict、その他はデータベースエラー
   async fn create(
      &self,
      username: &Username,
      password_hash: &PasswordHash,
   ) -> Result<User, InfraError>;

   /// 全ユーザーを ID の昇順で取得する
   async fn find_all(&self) -> Result<Vec<User>, InfraError>;

   /// ID でユーザーを検索する
   async fn find_by_id(&self, id: UserId) -> Result<Option<User>, InfraError>;

   /// ユーザー名でユーザーを検索する
   async fn find_by_username(&self, username: &Username) -> Result<Option<User>, InfraError>;

   /// ユーザー名とパスワードハッシュを上書きする
   ///
   /// # 戻り値
   ///
   /// - `Ok(Some(user))`: 更新後のユーザー
   /// - `Ok(None)`: 該当 ID のユーザーが存在しない場合
   /// - `Err(_)`: 他ユーザーのユーザー名と重複する場合は Conflict
   async fn update(
      &self,
      id: UserId,
      username: &Username,
      password_hash: &PasswordHash,
   ) -> Result<Option<User>, InfraError>;

   /// ユーザーを削除する
   ///
   /// # 戻り値
   ///
   /// - `Ok(true)`: 削除した
   /// - `Ok(false)`: 該当 ID のユーザーが存在しない
   async fn delete(&self, id: UserId) -> Result<bool, InfraError>;
}

/// `users` テーブルの行
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
   id:            i64,
   username:      String,
   password_hash: String,
}

impl TryFrom<UserRow> for User {
   type Error = InfraError;

   fn try_from(row: UserRow) -> Result<Self, Self::Error> {
      let username =
         Username::new(row.username).map_err(|e| InfraError::unexpected(e.to_string()))?;
      Ok(User::from_db(
         UserId::new(row.id),
         username,
         PasswordHash::new(row.password_hash),
      ))
   }
}

/// 一意制約違反を Conflict に変換し、それ以外はデータベースエラーとして返す
fn map_unique_violation(err: sqlx::Error, username: &Username) -> InfraError {
   match &err {
      sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
         InfraError::conflict("User", username.as_str())
      }
      _ => err.into(),
   }
}

/// PostgreSQL 実装の UserRepository
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
   pool: PgPool,
}

impl PostgresUserRepository {
   /// 新しいリポジトリインスタンスを作成
   pub fn new(pool: PgPool) -> Self {
      Self { pool }
   }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
   #[tracing::instrument(skip_all, level = "debug", fields(%username))]
   async fn create(
      &self,
      username: &Username,
      password_hash: &PasswordHash,
   ) -> Result<User, InfraError> {
      let row: UserRow = sqlx::query_as(
         r#"
            INSERT INTO users (username, password_hash)
            VALUES ($1, $2)
            RETURNING id, username, password_hash
            "#,
      )
      .bind(username.as_str())
      .bind(password_hash.as_str())
      .fetch_one(&self.pool)
      .await
      .map_err(|e| map_unique_violation(e, username))?;

      row.try_into()
   }

   #[tracing::instrument(skip_all, level = "debug")]
   async fn find_all(&self) -> Result<Vec<User>, InfraError> {
      let rows: Vec<UserRow> = sqlx::query_as(
         r#"
            SELECT id, username, password_hash
            FROM users
            ORDER BY id
            "#,
      )
      .fetch_all(&self.pool)
      .await?;

      rows.into_iter().map(User::try_from).collect()
   }

   #[tracing::instrument(skip_all, level = "debug", fields(%id))]
   async fn find_by_id(&self, id: UserId) -> Result<Option<User>, InfraError> {
      let row: Option<UserRow> = sqlx::query_as(
         r#"
            SELECT id, username, password_hash
            FROM users
            WHERE id = $1
            "#,
      )
      .bind(id.as_i64())
      .fetch_optional(&self.pool)
      .await?;

      row.map(User::try_from).transpose()
   }

   #[tracing::instrument(skip_all, level = "debug", fields(%username))]
   async fn find_by_username(&self, username: &Username) -> Result<Option<User>, InfraError> {
      let row: Option<UserRow> = sqlx::query_as(
         r#"
            SELECT id, username, password_hash
            FROM users
            WHERE username = $1
            "#,
      )
      .bind(username.as_str())
      .fetch_optional(&self.pool)
      .await?;

      row.map(User::try_from).transpose()
   }

   #[tracing::instrument(skip_all, level = "debug", fields(%id, %username))]
   async fn update(
      &self,
      id: UserId,
      username: &Username,
      password_hash: &PasswordHash,
   ) -> Result<Option<User>, InfraError> {
      let row: Option<UserRow> = sqlx::query_as(
         r#"
            UPDATE users
            SET username = $2, password_hash = $3
            WHERE id = $1
            RETURNING id, username, password_hash
            "#,
      )
      .bind(id.as_i64())
      .bind(username.as_str())
      .bind(password_hash.as_str())
      .fetch_optional(&self.pool)
      .await
      .map_err(|e| map_unique_violation(e, username))?;

      row.map(User::try_from).transpose()
   }

   #[tracing::instrument(skip_all, level = "debug", fields(%id))]
   async fn delete(&self, id: UserId) -> Result<bool, InfraError> {
      let result = sqlx::query(
         r#"
            DELETE FROM users
            WHERE id = $1
            "#,
      )
      .bind(id.as_i64())
      .execute(&self.pool)
      .await?;

      Ok(result.rows_affected() > 0)
   }
}
