// Notionデータベースクエリのレスポンス型
//
// 必要なフィールドのみ定義し、それ以外は無視する。
// 部分ページ（権限不足等でプロパティが返らない結果）も受け付けられるよう、
// ページの詳細フィールドはすべてOptionにしている。

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;

/// データベースクエリのレスポンス（1ページ分）
#[derive(Debug, Clone, Deserialize)]
pub struct QueryDatabaseResponse {
    pub results: Vec<PageObject>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// クエリ結果の1行
#[derive(Debug, Clone, Deserialize)]
pub struct PageObject {
    pub object: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub created_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub properties: Option<HashMap<String, PropertyValue>>,
}

impl PageObject {
    /// フルページであれば作成日時とプロパティを返す
    ///
    /// `object`が`page`で、`url`・`created_time`・`properties`を持つものをフルページとみなす。
    pub fn as_full_page(&self) -> Option<(DateTime<Utc>, &HashMap<String, PropertyValue>)> {
        if self.object != "page" || self.url.is_none() {
            return None;
        }
        Some((self.created_time?, self.properties.as_ref()?))
    }
}

/// プロパティ値
///
/// `type`が`title`の場合のみ`title`にリッチテキストが入る。
#[derive(Debug, Clone, Deserialize)]
pub struct PropertyValue {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub title: Option<Vec<RichText>>,
}

/// リッチテキストのセグメント
#[derive(Debug, Clone, Deserialize)]
pub struct RichText {
    #[serde(default)]
    pub plain_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_full_page() {
        let value = json!({
            "object": "list",
            "results": [{
                "object": "page",
                "id": "page-1",
                "created_time": "2025-06-25T01:23:00.000Z",
                "last_edited_time": "2025-06-25T01:23:00.000Z",
                "url": "https://www.notion.so/page-1",
                "properties": {
                    "post": {
                        "id": "title",
                        "type": "title",
                        "title": [{
                            "type": "text",
                            "text": { "content": "hello", "link": null },
                            "annotations": { "bold": false },
                            "plain_text": "hello",
                            "href": null
                        }]
                    },
                    "作成日時": {
                        "id": "abc",
                        "type": "created_time",
                        "created_time": "2025-06-25T01:23:00.000Z"
                    }
                }
            }],
            "next_cursor": null,
            "has_more": false
        });

        let response: QueryDatabaseResponse = serde_json::from_value(value).unwrap();

        assert_eq!(response.results.len(), 1);
        assert!(!response.has_more);
        let (created_time, properties) = response.results[0].as_full_page().unwrap();
        assert_eq!(created_time.to_rfc3339(), "2025-06-25T01:23:00+00:00");
        assert_eq!(properties["post"].kind, "title");
        assert_eq!(properties["post"].title.as_ref().unwrap()[0].plain_text, "hello");
        assert_eq!(properties["作成日時"].kind, "created_time");
        assert!(properties["作成日時"].title.is_none());
    }

    #[test]
    fn test_partial_page_is_not_full() {
        let value = json!({
            "results": [{ "object": "page", "id": "page-1" }]
        });

        let response: QueryDatabaseResponse = serde_json::from_value(value).unwrap();

        assert!(response.results[0].as_full_page().is_none());
    }

    #[test]
    fn test_non_page_object_is_not_full() {
        let value = json!({
            "results": [{
                "object": "database",
                "id": "db-1",
                "created_time": "2025-06-25T01:23:00.000Z",
                "url": "https://www.notion.so/db-1",
                "properties": {}
            }]
        });

        let response: QueryDatabaseResponse = serde_json::from_value(value).unwrap();

        assert!(response.results[0].as_full_page().is_none());
    }

    #[test]
    fn test_missing_results_is_error() {
        let value = json!({ "object": "error", "status": 400 });

        let result: Result<QueryDatabaseResponse, _> = serde_json::from_value(value);

        assert!(result.is_err());
    }
}
