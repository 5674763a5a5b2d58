// Notionデータベースクエリモジュール
//
// - DatabaseQuery: データベースクエリのフィルター・ソート条件
// - NotionClient: Notion APIへのHTTPクライアント（DatabaseQueryClient実装）
// - QueryDatabaseResponse: クエリ結果の受信型
// - extract_posts: クエリ結果から投稿を取り出す

mod client;
mod database_query;
mod post_extractor;
mod response;

pub use client::{DatabaseQueryClient, NotionClient, NotionError};
pub use database_query::{
    CompoundFilter, DateCondition, DatePropertyFilter, DatabaseQuery, PropertySort, SortDirection,
};
pub use post_extractor::extract_posts;
pub use response::{PageObject, PropertyValue, QueryDatabaseResponse, RichText};
