// アプリケーション層モジュール
pub mod markdown_service;
pub mod request_validator;

// 再エクスポート
pub use markdown_service::MarkdownService;
pub use request_validator::{
    check_header, parse_query_request, validate_request, QueryParams, Rejection,
};
