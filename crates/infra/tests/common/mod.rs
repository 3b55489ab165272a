//! テスト共通フィクスチャ
//!
//! PostgreSQL を使用する統合テストで共通利用する接続ヘルパー。
//! Rust の統合テスト規約に従い `tests/common/mod.rs` に配置。

// 各テストファイルが独立したクレートとしてコンパイルされるため、
// 使用しない関数に dead_code 警告が出る。モジュール全体で抑制する。
#![allow(dead_code)]

use std::{
   sync::atomic::{AtomicU32, Ordering},
   time::{SystemTime, UNIX_EPOCH},
};

use account_domain::user::Username;
use account_infra::db;
use sqlx::PgPool;

/// テスト用の DATABASE_URL
pub fn database_url() -> String {
   dotenvy::dotenv().ok();
   std::env::var("DATABASE_URL").expect("DATABASE_URL must be set")
}

/// スキーマ準備済みのプールを作成する
pub async fn setup_pool() -> PgPool {
   let pool = db::create_pool(&database_url(), 2)
      .await
      .expect("データベース接続に失敗");
   db::ensure_schema(&pool)
      .await
      .expect("スキーマ作成に失敗");
   pool
}

/// テスト間で衝突しないユーザー名を生成する
///
/// 同じデータベースを複数のテストで共有するため、
/// プレフィックス + 時刻 + 連番で一意にする。
pub fn unique_username(prefix: &str) -> Username {
   static COUNTER: AtomicU32 = AtomicU32::new(0);
   let nanos = SystemTime::now()
      .duration_since(UNIX_EPOCH)
      .unwrap()
      .subsec_nanos();
   let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
   Username::new(format!("{prefix}-{nanos}-{seq}")).unwrap()
}
