//! DB 接続管理の統合テスト
//!
//! 実行方法:
//! ```bash
//! DATABASE_URL=postgres://... cargo test -p account-infra --test db_test -- --ignored
//! ```

mod common;

use account_infra::db;

#[tokio::test]
#[ignore = "PostgreSQL（DATABASE_URL）が必要"]
async fn test_ensure_schemaは何度呼んでも成功する() {
   let pool = common::setup_pool().await;

   db::ensure_schema(&pool).await.unwrap();
   db::ensure_schema(&pool).await.unwrap();

   let row: (bool,) = sqlx::query_as(
      "SELECT EXISTS (SELECT 1 FROM information_schema.tables WHERE table_name = 'users')",
   )
   .fetch_one(&pool)
   .await
   .unwrap();
   assert!(row.0);

   db::close(&pool).await;
}

#[tokio::test]
#[ignore = "PostgreSQL（DATABASE_URL）が必要"]
async fn test_pingが成功する() {
   let pool = common::setup_pool().await;

   assert!(db::ping(&pool).await.is_ok());

   db::close(&pool).await;
}

#[tokio::test]
#[ignore = "PostgreSQL（DATABASE_URL）が必要"]
async fn test_close後のpingは失敗する() {
   let pool = common::setup_pool().await;

   db::close(&pool).await;

   assert!(db::ping(&pool).await.is_err());
}
