//! Notionデータベースのタイトル一覧をMarkdownの箇条書きとして返すHTTP API
//!
//! リクエストの日付範囲でデータベースをクエリし、タイトルを
//! `- ...`形式のリスト（任意で日付見出し付き）に変換して返却する。

// Domain layer modules
pub mod domain;

// Application layer modules
pub mod application;

// Infrastructure layer modules
pub mod infrastructure;

pub mod error;
pub mod server;

pub use error::ApiError;
pub use server::{create_router, shutdown_signal, AppState};
