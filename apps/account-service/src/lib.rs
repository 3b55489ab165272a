//! # Account Service ライブラリ
//!
//! ユースケース・ハンドラ・ルーター構築を公開する。
//! バイナリ（`main.rs`）と結合テスト（`tests/`）の両方から使用する。
//!
//! ## モジュール構成
//!
//! - `app_builder`: ルーターとミドルウェアの組み立て
//! - `config`: 環境変数からの設定読み込み
//! - `error`: エラー定義と HTTP レスポンスへの変換
//! - `handler`: HTTP ハンドラ
//! - `usecase`: ビジネスロジック

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod usecase;
