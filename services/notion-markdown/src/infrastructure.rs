// インフラストラクチャ層モジュール
pub mod config;
pub mod logging;
pub mod notion;

// 再エクスポート
pub use config::{AppConfig, AuthSettings, ConfigError, NotionSettings, QuerySettings};
pub use logging::init_logging;
pub use notion::{
    extract_posts, DatabaseQuery, DatabaseQueryClient, NotionClient, NotionError,
    QueryDatabaseResponse,
};
