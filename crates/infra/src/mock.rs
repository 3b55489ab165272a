//! # テスト用モックリポジトリ
//!
//! ユースケーステスト・HTTP テストで使用するインメモリモックリポジトリ。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! account-infra = { workspace = true, features = ["test-utils"] }
//! ```
//!
//! PostgreSQL 実装と同じく、ID は 1 からの連番で採番し、
//! ユーザー名の重複は Conflict として扱う。

use std::sync::{Arc, Mutex};

use account_domain::{
   password::PasswordHash,
   user::{User, UserId, Username},
};
use async_trait::async_trait;

use crate::{error::InfraError, repository::UserRepository};

#[derive(Default)]
struct MockUserStore {
   users:   Vec<User>,
   next_id: i64,
}

// ===== MockUserRepository =====

#[derive(Clone, Default)]
pub struct MockUserRepository {
   store: Arc<Mutex<MockUserStore>>,
}

impl MockUserRepository {
   pub fn new() -> Self {
      Self::default()
   }

   /// 保存済みのユーザーをすべて返す（テストの検証用）
   pub fn users(&self) -> Vec<User> {
      self.store.lock().unwrap().users.clone()
   }
}

#[async_trait]
impl UserRepository for MockUserRepository {
   async fn create(
      &self,
      username: &Username,
      password_hash: &PasswordHash,
   ) -> Result<User, InfraError> {
      let mut store = self.store.lock().unwrap();
      if store.users.iter().any(|u| u.username() == username) {
         return Err(InfraError::conflict("User", username.as_str()));
      }

      store.next_id += 1;
      let user = User::from_db(
         UserId::new(store.next_id),
         username.clone(),
         password_hash.clone(),
      );
      store.users.push(user.clone());
      Ok(user)
   }

   async fn find_all(&self) -> Result<Vec<User>, InfraError> {
      Ok(self.store.lock().unwrap().users.clone())
   }

   async fn find_by_id(&self, id: UserId) -> Result<Option<User>, InfraError> {
      Ok(self
         .store
         .lock()
         .unwrap()
         .users
         .iter()
         .find(|u| u.id() == id)
         .cloned())
   }

   async fn find_by_username(&self, username: &Username) -> Result<Option<User>, InfraError> {
      Ok(self
         .store
         .lock()
         .unwrap()
         .users
         .iter()
         .find(|u| u.username() == username)
         .cloned())
   }

   async fn update(
      &self,
      id: UserId,
      username: &Username,
      password_hash: &PasswordHash,
   ) -> Result<Option<User>, InfraError> {
      let mut store = self.store.lock().unwrap();
      if store
         .users
         .iter()
         .any(|u| u.id() != id && u.username() == username)
      {
         return Err(InfraError::conflict("User", username.as_str()));
      }

      let Some(slot) = store.users.iter_mut().find(|u| u.id() == id) else {
         return Ok(None);
      };
      *slot = User::from_db(id, username.clone(), password_hash.clone());
      Ok(Some(slot.clone()))
   }

   async fn delete(&self, id: UserId) -> Result<bool, InfraError> {
      let mut store = self.store.lock().unwrap();
      let before = store.users.len();
      store.users.retain(|u| u.id() != id);
      Ok(store.users.len() < before)
   }
}
