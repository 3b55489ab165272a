//! # アプリケーション構築
//!
//! ルーター定義とミドルウェアの組み立てを担当する。
//! `main.rs` はインフラ初期化とサーバー起動に集中する。

use std::sync::Arc;

use account_shared::{
    canonical_log::CanonicalLogLineLayer,
    observability::{MakeRequestUuidV7, make_request_span},
};
use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{
    handler::{
        AccountState,
        ReadinessState,
        delete_user,
        health_check,
        list_users,
        login,
        readiness_check,
        register,
        update_user,
    },
    usecase::AccountUseCase,
};

/// ルーターを構築する
///
/// 初期化済みのユースケースと Readiness Check 用 State を受け取る。
pub fn build_app(
    usecase: Arc<dyn AccountUseCase>,
    readiness_state: Arc<ReadinessState>,
) -> Router {
    let account_state = Arc::new(AccountState { usecase });

    // レイヤー順序（下に書いたものが外側）
    // 1. SetRequestIdLayer（最外）: UUID v7 を生成（またはクライアント提供値を使用）
    // 2. TraceLayer: request_id を含むスパンを作成
    // 3. CanonicalLogLineLayer: リクエスト完了時に1行サマリログを出力（スパン内）
    // 4. PropagateRequestIdLayer: レスポンスヘッダーに X-Request-Id をコピー
    Router::new()
        .route("/health", get(health_check))
        .merge(
            Router::new()
                .route("/health/ready", get(readiness_check))
                .with_state(readiness_state),
        )
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/users", get(list_users))
        .route("/users/{id}", put(update_user).delete(delete_user))
        .with_state(account_state)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(CanonicalLogLineLayer)
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}
