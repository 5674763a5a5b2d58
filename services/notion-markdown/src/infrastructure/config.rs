// アプリケーション設定
//
// 環境変数から設定値を読み込み、コアロジックに渡す設定バンドルに分割する。
// 未設定・空文字の環境変数はデフォルト値にフォールバックする。

use chrono_tz::Tz;
use std::net::SocketAddr;
use thiserror::Error;
use url::Url;

/// デフォルトのタイムゾーン
pub const DEFAULT_TIMEZONE: Tz = Tz::Asia__Tokyo;

/// デフォルトの日付プロパティ名
pub const DEFAULT_DATE_PROPERTY_NAME: &str = "作成日時";

/// デフォルトのタイトルプロパティ名
pub const DEFAULT_TITLE_PROPERTY_NAME: &str = "post";

/// デフォルトの共有シークレットヘッダー名
pub const DEFAULT_SECRET_HEADER_NAME: &str = "x-secret";

/// デフォルトのNotion APIベースURL
pub const DEFAULT_NOTION_API_BASE_URL: &str = "https://api.notion.com";

/// デフォルトのNotion-Versionヘッダー値
pub const DEFAULT_NOTION_VERSION: &str = "2022-06-28";

/// デフォルトのリッスンアドレス
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

/// 設定エラー
#[derive(Debug, Error)]
pub enum ConfigError {
    /// TIMEZONEがIANAタイムゾーン名として解釈できない
    #[error("タイムゾーンが不正です: {0}")]
    InvalidTimezone(String),

    /// BIND_ADDRがソケットアドレスとして解釈できない
    #[error("リッスンアドレスが不正です: {0}")]
    InvalidBindAddr(String),

    /// NOTION_API_BASE_URLがURLとして解釈できない
    #[error("Notion APIのベースURLが不正です: {0}")]
    InvalidNotionBaseUrl(String),
}

/// 認証設定
///
/// 共有シークレットが設定されている場合のみシークレットヘッダーを検証する。
#[derive(Clone)]
pub struct AuthSettings {
    /// 共有シークレット（WORKER_SECRET環境変数、未設定ならNone）
    pub worker_secret: Option<String>,
    /// 共有シークレットを載せるヘッダー名（小文字）
    pub secret_header_name: String,
}

impl AuthSettings {
    pub fn new(worker_secret: Option<String>) -> Self {
        Self {
            worker_secret: worker_secret.filter(|s| !s.is_empty()),
            secret_header_name: DEFAULT_SECRET_HEADER_NAME.to_string(),
        }
    }

    /// シークレットヘッダー名を変更する
    pub fn with_secret_header_name(mut self, name: impl Into<String>) -> Self {
        self.secret_header_name = name.into().to_ascii_lowercase();
        self
    }
}

impl std::fmt::Debug for AuthSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSettings")
            .field("worker_secret", &self.worker_secret.as_ref().map(|_| "***"))
            .field("secret_header_name", &self.secret_header_name)
            .finish()
    }
}

/// クエリ設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySettings {
    /// 日付の解釈と見出しに使うタイムゾーン
    pub timezone: Tz,
    /// フィルター・ソート対象の日付プロパティ名
    pub date_property_name: String,
    /// 投稿テキストを読み出すタイトルプロパティ名
    pub title_property_name: String,
}

impl Default for QuerySettings {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE,
            date_property_name: DEFAULT_DATE_PROPERTY_NAME.to_string(),
            title_property_name: DEFAULT_TITLE_PROPERTY_NAME.to_string(),
        }
    }
}

/// Notion API接続設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotionSettings {
    /// APIベースURL
    pub api_base_url: String,
    /// Notion-Versionヘッダー値
    pub notion_version: String,
}

impl NotionSettings {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            notion_version: DEFAULT_NOTION_VERSION.to_string(),
        }
    }

    /// データベースクエリエンドポイントURLを構築
    ///
    /// データベースIDはパスセグメントとしてエスケープされる。
    ///
    /// # 戻り値
    /// 例: "https://api.notion.com/v1/databases/{id}/query"
    pub fn database_query_url(&self, database_id: &str) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(&self.api_base_url)?;
        url.path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend(["v1", "databases", database_id, "query"]);
        Ok(url)
    }
}

impl Default for NotionSettings {
    fn default() -> Self {
        Self::new(DEFAULT_NOTION_API_BASE_URL)
    }
}

/// アプリケーション設定
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub auth: AuthSettings,
    pub query: QuerySettings,
    pub notion: NotionSettings,
    /// スタンドアロンサーバーのリッスンアドレス
    pub bind_addr: SocketAddr,
}

impl AppConfig {
    /// 環境変数から設定を読み込み
    ///
    /// # 環境変数
    /// - `TIMEZONE`: IANAタイムゾーン名（デフォルト: Asia/Tokyo）
    /// - `DATE_PROPERTY_NAME`: 日付プロパティ名（デフォルト: 作成日時）
    /// - `TITLE_PROPERTY_NAME`: タイトルプロパティ名（デフォルト: post）
    /// - `WORKER_SECRET`: 共有シークレット（任意）
    /// - `SECRET_HEADER_NAME`: 共有シークレットのヘッダー名（デフォルト: x-secret）
    /// - `NOTION_API_BASE_URL`: Notion APIベースURL（デフォルト: https://api.notion.com）
    /// - `NOTION_VERSION`: Notion-Versionヘッダー値（デフォルト: 2022-06-28）
    /// - `BIND_ADDR`: リッスンアドレス（デフォルト: 127.0.0.1:8080）
    ///
    /// # 戻り値
    /// - `Ok(AppConfig)`: 設定が正常に読み込まれた
    /// - `Err(ConfigError)`: タイムゾーン・アドレス・URLのいずれかが解釈できない
    pub fn from_env() -> Result<Self, ConfigError> {
        let timezone = match get_optional_string("TIMEZONE") {
            Some(name) => name
                .parse::<Tz>()
                .map_err(|_| ConfigError::InvalidTimezone(name.clone()))?,
            None => DEFAULT_TIMEZONE,
        };

        let bind_addr_str = get_or_default("BIND_ADDR", DEFAULT_BIND_ADDR);
        let bind_addr = bind_addr_str
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidBindAddr(bind_addr_str.clone()))?;

        let auth = AuthSettings::new(get_optional_string("WORKER_SECRET")).with_secret_header_name(
            get_or_default("SECRET_HEADER_NAME", DEFAULT_SECRET_HEADER_NAME),
        );

        let query = QuerySettings {
            timezone,
            date_property_name: get_or_default("DATE_PROPERTY_NAME", DEFAULT_DATE_PROPERTY_NAME),
            title_property_name: get_or_default("TITLE_PROPERTY_NAME", DEFAULT_TITLE_PROPERTY_NAME),
        };

        let notion = NotionSettings {
            api_base_url: get_or_default("NOTION_API_BASE_URL", DEFAULT_NOTION_API_BASE_URL),
            notion_version: get_or_default("NOTION_VERSION", DEFAULT_NOTION_VERSION),
        };
        notion
            .database_query_url("probe")
            .map_err(|_| ConfigError::InvalidNotionBaseUrl(notion.api_base_url.clone()))?;

        Ok(Self {
            auth,
            query,
            notion,
            bind_addr,
        })
    }
}

/// 環境変数を読み込む（未設定・空白のみはNone扱い）
fn get_optional_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.trim().is_empty())
}

fn get_or_default(key: &str, default: &str) -> String {
    get_optional_string(key).unwrap_or_else(|| default.to_string())
}
