//! HTTPルーターとハンドラー
//!
//! - タイトル一覧のMarkdown取得 (`/`、メソッド不問)
//! - ヘルスチェック (GET /health)

use crate::application::{validate_request, MarkdownService};
use crate::error::ApiError;
use crate::infrastructure::config::{AppConfig, AuthSettings, QuerySettings};
use crate::infrastructure::notion::{NotionClient, NotionError};
use axum::{
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap, Uri},
    response::{IntoResponse, Response},
    routing::{any, get},
    Router,
};
use chrono::Utc;
use std::any::Any;
use std::sync::Arc;
use tokio::signal;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

/// Markdownレスポンスのcontent-type
const MARKDOWN_CONTENT_TYPE: &str = "text/markdown; charset=utf-8";

/// アプリケーション状態
///
/// リクエスト間で共有するのは設定とクライアントのみで、可変状態は持たない。
#[derive(Clone)]
pub struct AppState {
    /// 認証設定
    pub auth: AuthSettings,
    /// クエリ設定
    pub query: QuerySettings,
    /// Markdown取得サービス
    pub service: MarkdownService,
}

impl AppState {
    /// 設定からNotionClientを構築してAppStateを作成
    pub fn from_config(config: &AppConfig) -> Result<Self, NotionError> {
        let client = NotionClient::new(config.notion.clone())?;
        let service =
            MarkdownService::new(Arc::new(client), config.query.title_property_name.clone());

        Ok(Self {
            auth: config.auth.clone(),
            query: config.query.clone(),
            service,
        })
    }
}

/// ヘルスチェックエンドポイント
///
/// サーバーの死活確認用。認証不要。
async fn health() -> &'static str {
    "OK"
}

/// タイトル一覧のMarkdown取得エンドポイント
///
/// # Returns
/// - 200 OK: Markdown本文
/// - 400 Bad Request: database_idが無い、日付が不正
/// - 401 Unauthorized: Authorizationヘッダーまたは共有シークレットの不備
/// - 500 Internal Server Error: Notion API呼び出しの失敗
async fn markdown_handler(State(state): State<AppState>, headers: HeaderMap, uri: Uri) -> Response {
    // date省略時はUTCの実行日を使う
    let today = Utc::now().date_naive();

    let (credential, request) =
        match validate_request(&headers, uri.query(), &state.auth, &state.query, today) {
            Ok(validated) => validated,
            Err(rejection) => {
                tracing::warn!(reason = %rejection, "リクエストを拒否");
                return ApiError::from(rejection).into_response();
            }
        };

    tracing::info!(
        database_id = %request.database_id,
        from_date = %request.from_date,
        to_date = %request.to_date,
        indent = request.indent,
        date_heading = request.date_heading,
        "タイトル一覧取得リクエストを受信"
    );

    match state.service.fetch_titles_as_markdown(&credential, &request).await {
        Ok(document) => {
            ([(CONTENT_TYPE, MARKDOWN_CONTENT_TYPE)], document.into_body()).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "ページの取得に失敗");
            ApiError::fetch_failed().into_response()
        }
    }
}

/// ハンドラー内のパニックを汎用の500に変換する
fn handle_panic(_panic: Box<dyn Any + Send + 'static>) -> Response {
    tracing::error!("リクエスト処理中にパニックが発生");
    ApiError::fetch_failed().into_response()
}

/// ルーターを構築する
///
/// TraceLayerによりリクエスト/レスポンスの構造化ログを自動記録する。
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/", any(markdown_handler))
        .layer(CatchPanicLayer::custom(handle_panic))
        // リクエストトレーシングレイヤー（method, path, status, latencyを自動記録）
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// シャットダウンシグナルを待機する
///
/// SIGTERMまたはCtrl+C (SIGINT) を待機し、いずれかを受信したらリターンする。
/// シグナルハンドラーを登録できない場合はそのシグナルを待たない。
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Ctrl+C シグナルハンドラーの登録に失敗しました");
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
                tracing::error!(error = %e, "SIGTERM シグナルハンドラーの登録に失敗しました");
                std::future::pending::<()>().await;
            }
        }
    };

    // Windows等の非Unix環境ではSIGTERMは利用不可
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Ctrl+C (SIGINT) を受信しました。graceful shutdownを開始します");
        }
        _ = terminate => {
            tracing::info!("SIGTERM を受信しました。graceful shutdownを開始します");
        }
    }
}
