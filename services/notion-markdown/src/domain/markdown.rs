//! Markdownレンダラー
//!
//! 投稿の一覧をMarkdownの箇条書きに変換する。
//! - 投稿内の改行ごとに1つのリスト項目にする
//! - `indent`有効時は2行目以降を4スペースでインデントする
//! - `date_heading`有効時は作成日（指定タイムゾーン）ごとに`## YYYY-MM-DD`見出しでまとめる

use super::post::Post;
use chrono::NaiveDate;
use chrono_tz::Tz;

/// 2行目以降のインデント
const INDENT: &str = "    ";

/// レンダリングオプション
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// 2行目以降をインデントするか
    pub indent: bool,
    /// 日付ごとに見出しを付けるか
    pub date_heading: bool,
    /// 見出しの日付を決めるタイムゾーン
    pub timezone: Tz,
}

/// レンダリング結果（行の並び）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkdownDocument {
    lines: Vec<String>,
}

impl MarkdownDocument {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// 行を改行で連結する（末尾改行なし）
    pub fn render(&self) -> String {
        self.lines.join("\n")
    }

    /// レスポンスボディを生成する（末尾に改行を1つ付ける）
    pub fn into_body(self) -> String {
        let mut body = self.render();
        body.push('\n');
        body
    }
}

/// 投稿の一覧をMarkdownに変換する
///
/// 入力の順序を保つ。失敗しない。
pub fn render_markdown(posts: &[Post], options: &RenderOptions) -> MarkdownDocument {
    let lines = if options.date_heading {
        render_with_date_headings(posts, options)
    } else {
        posts
            .iter()
            .flat_map(|post| render_post(post, options.indent))
            .collect()
    };

    MarkdownDocument { lines }
}

/// 1件の投稿をリスト項目の行に変換する
fn render_post(post: &Post, indent: bool) -> impl Iterator<Item = String> + '_ {
    post.text.split('\n').enumerate().map(move |(index, line)| {
        let item = format!("- {}", line.trim());
        if index > 0 && indent {
            format!("{}{}", INDENT, item)
        } else {
            item
        }
    })
}

/// 作成日ごとにグループ化して見出しを付ける
///
/// グループは最初に出現した順に並ぶ。
fn render_with_date_headings(posts: &[Post], options: &RenderOptions) -> Vec<String> {
    let mut groups: Vec<(NaiveDate, Vec<String>)> = Vec::new();

    for post in posts {
        let date = post.created_at.with_timezone(&options.timezone).date_naive();
        let items = render_post(post, options.indent);

        match groups.iter_mut().find(|(group_date, _)| *group_date == date) {
            Some((_, group_items)) => group_items.extend(items),
            None => groups.push((date, items.collect())),
        }
    }

    let mut lines = Vec::new();
    for (index, (date, items)) in groups.into_iter().enumerate() {
        if index > 0 {
            lines.push(String::new());
        }
        lines.push(format!("## {}", date.format("%Y-%m-%d")));
        lines.push(String::new());
        lines.extend(items);
    }
    lines
}
