// ドメイン層モジュール
pub mod credential;
pub mod date_range;
pub mod markdown;
pub mod post;
pub mod query_request;

// 再エクスポート
pub use credential::Credential;
pub use date_range::{DateRange, DateRangeError};
pub use markdown::{render_markdown, MarkdownDocument, RenderOptions};
pub use post::Post;
pub use query_request::QueryRequest;
