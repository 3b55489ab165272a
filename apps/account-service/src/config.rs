//! # Account Service 設定
//!
//! 環境変数から Account Service サーバーの設定を読み込む。
//!
//! 値の解釈は [`AccountConfig::from_lookup`] に集約しており、
//! プロセスの環境変数に触れずにテストできる。

use std::{env, str::FromStr};

use account_infra::{PasswordAlgorithm, password::DEFAULT_PBKDF2_ROUNDS};
use thiserror::Error;

/// 設定読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
   /// 必須の環境変数が未設定
   #[error("{0} が設定されていません")]
   Missing(&'static str),

   /// 値の形式が不正
   #[error("{name} の値が不正です: {value:?}")]
   Invalid { name: &'static str, value: String },
}

/// Account Service サーバーの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountConfig {
   /// バインドアドレス
   pub host:               String,
   /// ポート番号
   pub port:               u16,
   /// データベース接続 URL
   pub database_url:       String,
   /// 接続プールの最大接続数
   pub max_connections:    u32,
   /// 新規ハッシュに使うアルゴリズム
   pub password_algorithm: PasswordAlgorithm,
   /// PBKDF2 の反復回数
   pub pbkdf2_rounds:      u32,
}

impl AccountConfig {
   /// 環境変数から設定を読み込む
   pub fn from_env() -> Result<Self, ConfigError> {
      Self::from_lookup(|name| env::var(name).ok())
   }

   /// 任意の参照関数から設定を組み立てる
   ///
   /// 未設定の任意項目は既定値になる。空文字列は未設定として扱う。
   pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
   where
      F: Fn(&'static str) -> Option<String>,
   {
      let get = |name| lookup(name).filter(|v| !v.is_empty());

      Ok(Self {
         host:               get("ACCOUNT_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
         port:               parse_or("ACCOUNT_PORT", get("ACCOUNT_PORT"), 8080)?,
         database_url:       get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
         max_connections:    parse_or(
            "DATABASE_MAX_CONNECTIONS",
            get("DATABASE_MAX_CONNECTIONS"),
            10,
         )?,
         password_algorithm: parse_or(
            "PASSWORD_HASH_ALGORITHM",
            get("PASSWORD_HASH_ALGORITHM"),
            PasswordAlgorithm::default(),
         )?,
         pbkdf2_rounds:      parse_or("PBKDF2_ROUNDS", get("PBKDF2_ROUNDS"), DEFAULT_PBKDF2_ROUNDS)?,
      })
   }

   /// `host:port` 形式のバインドアドレス
   pub fn bind_address(&self) -> String {
      format!("{}:{}", self.host, self.port)
   }
}

fn parse_or<T: FromStr>(
   name: &'static str,
   value: Option<String>,
   default: T,
) -> Result<T, ConfigError> {
   match value {
      None => Ok(default),
      Some(value) => value
         .parse()
         .map_err(|_| ConfigError::Invalid { name, value }),
   }
}

#[cfg(test)]
mod tests {
   use std::collections::HashMap;

   use pretty_assertions::assert_eq;
   use rstest::rstest;

   use super::*;

   fn load(vars: &[(&'static str, &str)]) -> Result<AccountConfig, ConfigError> {
      let vars: HashMap<&'static str, String> =
         vars.iter().map(|(k, v)| (*k, (*v).to_string())).collect();
      AccountConfig::from_lookup(|name| vars.get(name).cloned())
   }

   #[test]
   fn test_database_urlのみで既定値が使われる() {
      let config = load(&[("DATABASE_URL", "postgres://localhost/accounts")]).unwrap();

      assert_eq!(
         config,
         AccountConfig {
            host:               "0.0.0.0".to_string(),
            port:               8080,
            database_url:       "postgres://localhost/accounts".to_string(),
            max_connections:    10,
            password_algorithm: PasswordAlgorithm::Pbkdf2Sha256,
            pbkdf2_rounds:      600_000,
         }
      );
      assert_eq!(config.bind_address(), "0.0.0.0:8080");
   }

   #[test]
   fn test_すべての値を上書きできる() {
      let config = load(&[
         ("ACCOUNT_HOST", "127.0.0.1"),
         ("ACCOUNT_PORT", "13010"),
         ("DATABASE_URL", "postgres://db/accounts"),
         ("DATABASE_MAX_CONNECTIONS", "3"),
         ("PASSWORD_HASH_ALGORITHM", "argon2id"),
         ("PBKDF2_ROUNDS", "1000"),
      ])
      .unwrap();

      assert_eq!(config.bind_address(), "127.0.0.1:13010");
      assert_eq!(config.max_connections, 3);
      assert_eq!(config.password_algorithm, PasswordAlgorithm::Argon2id);
      assert_eq!(config.pbkdf2_rounds, 1000);
   }

   #[rstest]
   #[case(&[])]
   #[case(&[("DATABASE_URL", "")])]
   fn test_database_url未設定はエラー(#[case] vars: &[(&'static str, &str)]) {
      assert_eq!(load(vars), Err(ConfigError::Missing("DATABASE_URL")));
   }

   #[rstest]
   #[case("ACCOUNT_PORT", "http")]
   #[case("ACCOUNT_PORT", "70000")]
   #[case("DATABASE_MAX_CONNECTIONS", "-1")]
   #[case("PASSWORD_HASH_ALGORITHM", "bcrypt")]
   #[case("PBKDF2_ROUNDS", "many")]
   fn test_不正な値はinvalidエラー(#[case] name: &'static str, #[case] value: &str) {
      let result = load(&[("DATABASE_URL", "postgres://localhost/accounts"), (name, value)]);

      assert_eq!(
         result,
         Err(ConfigError::Invalid {
            name,
            value: value.to_string(),
         })
      );
   }
}
