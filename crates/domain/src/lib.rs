//! # Account ドメイン層
//!
//! ユーザーアカウントのドメインモデルを定義する。
//!
//! ## 依存関係の方向
//!
//! ```text
//! account-service → infra → domain
//! ```
//!
//! ドメイン層はインフラ層（DB、パスワードハッシュ実装）に依存しない。
//!
//! ## モジュール構成
//!
//! - [`error`] - ドメイン層で発生するエラーの定義
//! - [`password`] - 平文パスワード・パスワードハッシュの値オブジェクト
//! - [`user`] - ユーザーエンティティと ID・ユーザー名
//!
//! ## 使用例
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use account_domain::user::{User, UserId, Username};
//! use account_domain::password::PasswordHash;
//!
//! let user = User::from_db(
//!     UserId::new(1),
//!     Username::new("alice")?,
//!     PasswordHash::new("$pbkdf2-sha256$..."),
//! );
//! assert_eq!(user.username().as_str(), "alice");
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod password;
pub mod user;

pub use error::DomainError;
