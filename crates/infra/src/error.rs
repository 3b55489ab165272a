//! # インフラ層エラー定義
//!
//! データベース操作やパスワードハッシュ処理で発生するエラーを表現する。
//!
//! ## 構造
//!
//! `std::io::Error` と同じ struct + enum パターンを採用:
//! - [`InfraError`]: エラー種別（[`InfraErrorKind`]）と [`SpanTrace`] を保持するラッパー
//! - [`InfraErrorKind`]: エラーの具体的な種別（Database, Conflict 等）
//!
//! `From` 実装や convenience constructor でエラーを生成すると、
//! その時点のスパン情報が自動的にキャプチャされる。

use std::fmt;

use derive_more::Display;
use thiserror::Error;
use tracing_error::SpanTrace;

/// インフラ層で発生するエラー
///
/// エラー種別に応じた処理には [`kind()`](InfraError::kind) を使用する:
///
/// ```ignore
/// match error.kind() {
///     InfraErrorKind::Conflict { entity, key } => { /* 重複 */ }
///     _ => { /* その他 */ }
/// }
/// ```
#[derive(Display)]
#[display("{kind}")]
pub struct InfraError {
    kind:       InfraErrorKind,
    span_trace: SpanTrace,
}

/// インフラ層エラーの種別
#[derive(Debug, Error)]
pub enum InfraErrorKind {
    /// データベースエラー
    ///
    /// SQL クエリの実行失敗、接続エラーなど。
    #[error("データベースエラー: {0}")]
    Database(#[source] sqlx::Error),

    /// 一意制約違反
    ///
    /// 既に存在する値で INSERT / UPDATE しようとした場合。
    #[error("一意制約違反: {entity}({key})")]
    Conflict {
        /// エンティティ名（例: "User"）
        entity: String,
        /// 重複したキー
        key:    String,
    },

    /// パスワードハッシュの生成・解析エラー
    ///
    /// 保存済みハッシュが PHC 形式として解析できない場合など。
    #[error("パスワードハッシュエラー: {0}")]
    PasswordHash(String),

    /// 予期しないエラー
    #[error("予期しないエラー: {0}")]
    Unexpected(String),
}

// ===== InfraError のメソッド =====

impl InfraError {
    /// エラー種別を取得する
    pub fn kind(&self) -> &InfraErrorKind {
        &self.kind
    }

    /// SpanTrace を取得する
    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }

    /// 一意制約違反かどうか
    pub fn is_conflict(&self) -> bool {
        matches!(self.kind, InfraErrorKind::Conflict { .. })
    }

    // ===== Convenience constructors =====

    /// 一意制約違反エラーを生成する
    pub fn conflict(entity: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            kind:       InfraErrorKind::Conflict {
                entity: entity.into(),
                key:    key.into(),
            },
            span_trace: SpanTrace::capture(),
        }
    }

    /// パスワードハッシュエラーを生成する
    pub fn password_hash(msg: impl Into<String>) -> Self {
        Self {
            kind:       InfraErrorKind::PasswordHash(msg.into()),
            span_trace: SpanTrace::capture(),
        }
    }

    /// 予期しないエラーを生成する
    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self {
            kind:       InfraErrorKind::Unexpected(msg.into()),
            span_trace: SpanTrace::capture(),
        }
    }
}

// ===== トレイト実装 =====

impl fmt::Debug for InfraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InfraError")
            .field("kind", &self.kind)
            .field("span_trace", &self.span_trace)
            .finish()
    }
}

impl std::error::Error for InfraError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.kind.source()
    }
}

impl From<sqlx::Error> for InfraError {
    fn from(source: sqlx::Error) -> Self {
        Self {
            kind:       InfraErrorKind::Database(source),
            span_trace: SpanTrace::capture(),
        }
    }
}
