use chrono::{DateTime, Utc};

/// タイトルから取り出した1件の投稿
///
/// `text`は改行を含むことがある。リッチテキストのセグメント1つにつき1件生成される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    /// セグメントのプレーンテキスト
    pub text: String,
    /// ページの作成日時
    pub created_at: DateTime<Utc>,
}

impl Post {
    pub fn new(text: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            text: text.into(),
            created_at,
        }
    }
}
