//! # ヘルスチェック共通型
//!
//! `/health`（liveness）と `/health/ready`（readiness）のレスポンス型。

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// ヘルスチェックレスポンス
///
/// `status` はサービスの稼働状態、`version` は Cargo.toml のバージョンを示す。
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// 稼働状態（`"healthy"`）
    pub status:  String,
    /// アプリケーションバージョン
    pub version: String,
}

impl HealthResponse {
    /// 稼働中を表すレスポンスを作成する
    pub fn healthy(version: impl Into<String>) -> Self {
        Self {
            status:  "healthy".to_string(),
            version: version.into(),
        }
    }
}

/// 個別チェックの結果ステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    /// チェック成功
    Ok,
    /// チェック失敗
    Error,
}

/// Readiness 全体のステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessStatus {
    /// 全依存サービスが利用可能
    Ready,
    /// 一部の依存サービスが利用不可
    NotReady,
}

/// Readiness Check レスポンス
///
/// ```
/// use std::collections::BTreeMap;
///
/// use account_shared::{CheckStatus, ReadinessResponse, ReadinessStatus};
///
/// let mut checks = BTreeMap::new();
/// checks.insert("database".to_string(), CheckStatus::Ok);
/// let response = ReadinessResponse::from_checks(checks);
/// assert_eq!(response.status, ReadinessStatus::Ready);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    /// 全体のステータス
    pub status: ReadinessStatus,
    /// 個別チェック結果（キー: チェック名、値: ステータス）
    pub checks: BTreeMap<String, CheckStatus>,
}

impl ReadinessResponse {
    /// 個別チェック結果から全体ステータスを決定する
    ///
    /// 1 つでも `Error` があれば `NotReady`。
    pub fn from_checks(checks: BTreeMap<String, CheckStatus>) -> Self {
        let status = if checks.values().all(|s| *s == CheckStatus::Ok) {
            ReadinessStatus::Ready
        } else {
            ReadinessStatus::NotReady
        };
        Self { status, checks }
    }

    pub fn is_ready(&self) -> bool {
        self.status == ReadinessStatus::Ready
    }
}
