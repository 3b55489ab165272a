//! # Account Service サーバー
//!
//! ユーザーアカウントの登録・認証・一覧・更新・削除を提供する API サーバー。
//!
//! ## 役割
//!
//! - **アカウント管理**: `users` テーブルに対する CRUD
//! - **パスワード認証**: KDF（PBKDF2-SHA256 / Argon2id）によるハッシュ化と検証
//! - **タイミング攻撃対策**: ユーザー存在確認を防ぐためのダミー検証
//!
//! セッションやトークンは発行しない。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `ACCOUNT_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `ACCOUNT_PORT` | No | ポート番号（デフォルト: `8080`） |
//! | `DATABASE_URL` | **Yes** | PostgreSQL 接続 URL |
//! | `DATABASE_MAX_CONNECTIONS` | No | 最大接続数（デフォルト: `10`） |
//! | `PASSWORD_HASH_ALGORITHM` | No | `pbkdf2-sha256`（デフォルト）または `argon2id` |
//! | `PBKDF2_ROUNDS` | No | PBKDF2 の反復回数（デフォルト: `600000`） |
//! | `LOG_FORMAT` | No | `json` または `pretty`（デフォルト） |
//!
//! ## 起動方法
//!
//! ```bash
//! DATABASE_URL=postgres://... cargo run -p account-service --release
//! ```

use std::sync::Arc;

use account_infra::{
    Argon2PasswordChecker,
    PasswordAlgorithm,
    PasswordChecker,
    Pbkdf2PasswordChecker,
    db,
    repository::{PostgresUserRepository, UserRepository},
};
use account_service::{
    app_builder::build_app,
    config::AccountConfig,
    handler::ReadinessState,
    usecase::AccountUseCaseImpl,
};
use account_shared::observability::{self, TracingConfig};
use anyhow::Context as _;
use tokio::{net::TcpListener, signal};

/// Account Service サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    // トレーシング初期化
    let tracing_config = TracingConfig::from_env("account-service");
    observability::init_tracing(tracing_config.clone());
    let _tracing_guard = tracing_config.app_span().entered();

    // 設定読み込み
    let config = AccountConfig::from_env().context("設定の読み込みに失敗しました")?;

    tracing::info!(
        "Account Service サーバーを起動します: {}",
        config.bind_address()
    );

    // データベース接続プールを作成
    let pool = db::create_pool(&config.database_url, config.max_connections)
        .await
        .context("データベース接続に失敗しました")?;
    tracing::info!("データベースに接続しました");

    db::ensure_schema(&pool)
        .await
        .context("users テーブルの作成に失敗しました")?;
    tracing::info!("users テーブルを確認しました");

    // Readiness Check 用 State（pool が move される前に clone）
    let readiness_state = Arc::new(ReadinessState { pool: pool.clone() });

    // 依存コンポーネントを初期化
    let user_repository: Arc<dyn UserRepository> =
        Arc::new(PostgresUserRepository::new(pool.clone()));
    let password_checker: Arc<dyn PasswordChecker> = match config.password_algorithm {
        PasswordAlgorithm::Pbkdf2Sha256 => {
            Arc::new(Pbkdf2PasswordChecker::new(config.pbkdf2_rounds)?)
        }
        PasswordAlgorithm::Argon2id => Arc::new(Argon2PasswordChecker::new()?),
    };
    tracing::info!(algorithm = %config.password_algorithm, "パスワードハッシュを初期化しました");

    let usecase = Arc::new(AccountUseCaseImpl::new(user_repository, password_checker));
    let app = build_app(usecase, readiness_state);

    let listener = TcpListener::bind(config.bind_address()).await?;
    tracing::info!(
        "Account Service サーバーが起動しました: {}",
        listener.local_addr()?
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db::close(&pool).await;
    tracing::info!("Account Service サーバーを停止しました");

    Ok(())
}

/// Ctrl+C または SIGTERM を待つ
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Ctrl+C ハンドラの登録に失敗しました: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("SIGTERM ハンドラの登録に失敗しました: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Ctrl+C を受信しました。シャットダウンします"),
        () = terminate => tracing::info!("SIGTERM を受信しました。シャットダウンします"),
    }
}
