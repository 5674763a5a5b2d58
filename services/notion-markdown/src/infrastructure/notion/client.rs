// NotionClient - Notion API用HTTPクライアント
//
// データベースクエリ（POST /v1/databases/{id}/query）を1回だけ実行する。
// ページネーションと再試行は行わない。

use super::database_query::DatabaseQuery;
use super::response::QueryDatabaseResponse;
use crate::domain::Credential;
use crate::infrastructure::config::NotionSettings;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info, instrument};

/// リクエストタイムアウト（秒）
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// 接続タイムアウト（秒）
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Notion API呼び出しのエラー型
#[derive(Debug, Error)]
pub enum NotionError {
    /// リクエストURLの構築に失敗
    #[error("URLエラー: {0}")]
    InvalidUrl(String),

    /// 接続エラー（送信失敗・タイムアウト）
    #[error("接続エラー: {0}")]
    Connection(String),

    /// 認証エラー（401）
    #[error("認証エラー: Notionトークンが無効です")]
    Unauthorized,

    /// HTTPエラー（ステータスコード付き）
    #[error("HTTPエラー: status={status}, message={message}")]
    Http {
        /// HTTPステータスコード
        status: u16,
        /// レスポンスボディ
        message: String,
    },

    /// レスポンスのデシリアライズエラー
    #[error("レスポンスのデシリアライズエラー: {0}")]
    Deserialization(String),
}

/// データベースクエリを実行するクライアントのトレイト
///
/// 実際のNotion API実装とテスト用モックを差し替えられるようにする。
#[async_trait]
pub trait DatabaseQueryClient: Send + Sync {
    /// データベースクエリを実行し、1ページ分の結果を返す
    ///
    /// # 引数
    /// * `credential` - リクエストから取り出したNotionトークン
    /// * `query` - フィルター・ソート条件
    async fn query_database(
        &self,
        credential: &Credential,
        query: &DatabaseQuery,
    ) -> Result<QueryDatabaseResponse, NotionError>;
}

/// Notion APIクライアント
///
/// トークンはリクエストごとに異なるため、呼び出し時に受け取る。
#[derive(Clone)]
pub struct NotionClient {
    /// HTTPクライアント
    client: Client,
    /// 接続設定
    settings: NotionSettings,
}

impl std::fmt::Debug for NotionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotionClient")
            .field("api_base_url", &self.settings.api_base_url)
            .field("notion_version", &self.settings.notion_version)
            .finish_non_exhaustive()
    }
}

impl NotionClient {
    /// 設定からNotionClientを作成
    ///
    /// # 戻り値
    /// * `Err(NotionError::Connection)` - HTTPクライアントの構築に失敗
    pub fn new(settings: NotionSettings) -> Result<Self, NotionError> {
        info!(
            api_base_url = %settings.api_base_url,
            notion_version = %settings.notion_version,
            "NotionClientを初期化"
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| NotionError::Connection(e.to_string()))?;

        Ok(Self { client, settings })
    }
}

#[async_trait]
impl DatabaseQueryClient for NotionClient {
    #[instrument(skip(self, credential, query), fields(database_id = %query.database_id))]
    async fn query_database(
        &self,
        credential: &Credential,
        query: &DatabaseQuery,
    ) -> Result<QueryDatabaseResponse, NotionError> {
        let url = self
            .settings
            .database_query_url(&query.database_id)
            .map_err(|e| NotionError::InvalidUrl(e.to_string()))?;

        debug!(url = %url, "データベースクエリを送信");

        let response = self
            .client
            .post(url)
            .bearer_auth(credential.as_str())
            .header("Notion-Version", &self.settings.notion_version)
            .json(query)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Notion APIへのリクエスト送信に失敗");
                NotionError::Connection(e.to_string())
            })?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            error!("認証エラー: Notionトークンが無効です");
            return Err(NotionError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Notion APIエラー");
            return Err(NotionError::Http {
                status: status.as_u16(),
                message: body,
            });
        }

        let result: QueryDatabaseResponse = response.json().await.map_err(|e| {
            error!(error = %e, "レスポンスのデシリアライズに失敗");
            NotionError::Deserialization(e.to_string())
        })?;

        info!(
            result_count = result.results.len(),
            has_more = result.has_more,
            "データベースクエリが完了"
        );

        Ok(result)
    }
}
