// クエリ結果から投稿を取り出す
//
// フルページでない行、タイトルプロパティが無い行、型がtitleでない行は
// エラーにせず読み飛ばす。1行のタイトルに含まれるリッチテキストの
// セグメントごとに1件のPostを生成する。

use super::response::QueryDatabaseResponse;
use crate::domain::Post;
use tracing::debug;

/// タイトルプロパティの型名
const TITLE_TYPE: &str = "title";

/// クエリ結果から投稿の一覧を取り出す
///
/// 行の順序、行内のセグメントの順序を保つ。
pub fn extract_posts(response: &QueryDatabaseResponse, title_property_name: &str) -> Vec<Post> {
    let mut posts = Vec::new();

    for page in &response.results {
        let Some((created_time, properties)) = page.as_full_page() else {
            debug!(page_id = %page.id, "フルページではないためスキップ");
            continue;
        };

        let Some(property) = properties.get(title_property_name) else {
            debug!(
                page_id = %page.id,
                property = title_property_name,
                "プロパティが無いためスキップ"
            );
            continue;
        };

        if property.kind != TITLE_TYPE {
            debug!(page_id = %page.id, kind = %property.kind, "titleではないためスキップ");
            continue;
        }

        let segments = property.title.as_deref().unwrap_or_default();
        posts.extend(
            segments
                .iter()
                .map(|segment| Post::new(segment.plain_text.clone(), created_time)),
        );
    }

    posts
}
