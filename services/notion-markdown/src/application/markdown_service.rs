// タイトル一覧のMarkdown取得サービス
//
// 日付範囲の構築 → クエリ条件の構築 → Notion API呼び出し → 投稿の抽出 → Markdown変換
// を1リクエストにつき1回ずつ行う。

use crate::domain::{render_markdown, Credential, MarkdownDocument, QueryRequest, RenderOptions};
use crate::infrastructure::notion::{
    extract_posts, DatabaseQuery, DatabaseQueryClient, NotionError,
};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// タイトル一覧をMarkdownとして取得するサービス
#[derive(Clone)]
pub struct MarkdownService {
    /// データベースクエリクライアント
    client: Arc<dyn DatabaseQueryClient>,
    /// 投稿テキストを読み出すタイトルプロパティ名
    title_property_name: String,
}

impl MarkdownService {
    pub fn new(
        client: Arc<dyn DatabaseQueryClient>,
        title_property_name: impl Into<String>,
    ) -> Self {
        Self {
            client,
            title_property_name: title_property_name.into(),
        }
    }

    /// タイトルの一覧をMarkdownのリスト形式で取得する
    ///
    /// # Returns
    /// - `Ok(MarkdownDocument)`: 変換結果（0件なら空）
    /// - `Err(NotionError)`: Notion API呼び出しの失敗
    #[instrument(
        skip(self, credential, request),
        fields(
            database_id = %request.database_id,
            from_date = %request.from_date,
            to_date = %request.to_date,
        )
    )]
    pub async fn fetch_titles_as_markdown(
        &self,
        credential: &Credential,
        request: &QueryRequest,
    ) -> Result<MarkdownDocument, NotionError> {
        let query = DatabaseQuery::new(
            &request.database_id,
            &request.date_property_name,
            &request.range,
        );

        let response = self.client.query_database(credential, &query).await?;
        if response.has_more {
            warn!(
                result_count = response.results.len(),
                next_cursor = response.next_cursor.as_deref().unwrap_or_default(),
                "結果が1ページに収まらないため、続きは取得しません"
            );
        }

        let posts = extract_posts(&response, &self.title_property_name);

        let options = RenderOptions {
            indent: request.indent,
            date_heading: request.date_heading,
            timezone: request.timezone,
        };
        let document = render_markdown(&posts, &options);

        info!(
            post_count = posts.len(),
            line_count = document.lines().len(),
            "Markdownを生成"
        );

        Ok(document)
    }
}
