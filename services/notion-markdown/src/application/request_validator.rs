//! リクエストバリデーター
//!
//! ヘッダーとクエリ文字列を検証し、Notionトークンと検証済みパラメーターを取り出す。
//! - 共有シークレットが設定されていればシークレットヘッダーと照合（不一致は401）
//! - `Authorization: Bearer <token>`からトークンを取り出す（不備は401）
//! - `database_id`は必須（無い・空は400）
//! - `date`/`to_date`は省略時に実行日・`date`で補う
//! - `indent`/`date_heading`はキーの有無だけで判定する

use crate::domain::{Credential, DateRange, QueryRequest};
use crate::infrastructure::config::{AuthSettings, QuerySettings};
use axum::http::{header::AUTHORIZATION, HeaderMap};
use chrono::NaiveDate;
use thiserror::Error;
use tracing::warn;

/// Bearerスキームの接頭辞
const BEARER_PREFIX: &str = "Bearer ";

/// カレンダー日付の形式
const DATE_FORMAT: &str = "%Y-%m-%d";

/// `YYYY-MM-DD`の文字数
const DATE_LENGTH: usize = 10;

/// リクエストの拒否理由
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// 認証失敗（401）
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// パラメーター不備（400）
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// クエリ文字列のパラメーター
///
/// 同じキーが複数ある場合は最初の値を使う。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    /// クエリ文字列（`?`を含まない）をパースする
    pub fn parse(query: Option<&str>) -> Self {
        let pairs: Vec<(String, String)> = query
            .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
            .unwrap_or_default();
        Self(pairs)
    }

    /// キーに対応する最初の値を取得
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// 値が空でなければ取得
    fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    /// キーが存在するか（値は問わない）
    pub fn has(&self, key: &str) -> bool {
        self.0.iter().any(|(k, _)| k == key)
    }
}

/// ヘッダーを検証してNotionトークンを返す
///
/// # Returns
/// - `Ok(Credential)`: `Bearer `以降のトークン
/// - `Err(Rejection::Unauthorized)`: シークレット不一致、またはAuthorizationヘッダーの不備
pub fn check_header(headers: &HeaderMap, settings: &AuthSettings) -> Result<Credential, Rejection> {
    if let Some(secret) = &settings.worker_secret {
        let provided = headers
            .get(settings.secret_header_name.as_str())
            .and_then(|h| h.to_str().ok());
        if provided != Some(secret.as_str()) {
            warn!(header = %settings.secret_header_name, "共有シークレットが一致しません");
            return Err(Rejection::Unauthorized("共有シークレットが一致しません".to_string()));
        }
    }

    let Some(authorization) = headers.get(AUTHORIZATION).and_then(|h| h.to_str().ok()) else {
        warn!("Authorizationヘッダーがありません");
        return Err(Rejection::Unauthorized("Authorizationヘッダーが必要です".to_string()));
    };

    match authorization.strip_prefix(BEARER_PREFIX) {
        Some(token) if !token.is_empty() && !token.contains(char::is_whitespace) => {
            Ok(Credential::new(token))
        }
        _ => {
            warn!("Authorizationヘッダーの形式が不正です");
            Err(Rejection::Unauthorized(
                "Authorizationヘッダーは`Bearer <token>`形式である必要があります".to_string(),
            ))
        }
    }
}

/// クエリパラメーターを検証してQueryRequestを生成する
///
/// # Arguments
/// * `params` - クエリパラメーター
/// * `settings` - 環境変数由来のクエリ設定
/// * `today` - `date`省略時に使う日付（UTCの実行日）
pub fn parse_query_request(
    params: &QueryParams,
    settings: &QuerySettings,
    today: NaiveDate,
) -> Result<QueryRequest, Rejection> {
    let Some(database_id) = params.get_non_empty("database_id") else {
        return Err(Rejection::BadRequest("Missing database_id".to_string()));
    };

    let from_date = match params.get_non_empty("date") {
        Some(value) => parse_date("date", value)?,
        None => today,
    };

    let to_date = match params.get_non_empty("to_date") {
        Some(value) => parse_date("to_date", value)?,
        None => from_date,
    };

    if from_date > to_date {
        return Err(Rejection::BadRequest(format!(
            "dateはto_date以前である必要があります: {} > {}",
            from_date, to_date
        )));
    }

    let range = DateRange::build(from_date, to_date, settings.timezone)
        .map_err(|e| Rejection::BadRequest(e.to_string()))?;

    Ok(QueryRequest {
        timezone: settings.timezone,
        date_property_name: settings.date_property_name.clone(),
        database_id: database_id.to_string(),
        from_date,
        to_date,
        range,
        indent: params.has("indent"),
        date_heading: params.has("date_heading") || params.has("split_by_date"),
    })
}

/// ヘッダー→クエリの順に検証する
///
/// 認証エラーはパラメーター不備より優先される。
pub fn validate_request(
    headers: &HeaderMap,
    query: Option<&str>,
    auth: &AuthSettings,
    settings: &QuerySettings,
    today: NaiveDate,
) -> Result<(Credential, QueryRequest), Rejection> {
    let credential = check_header(headers, auth)?;
    let request = parse_query_request(&QueryParams::parse(query), settings, today)?;
    Ok((credential, request))
}

/// `YYYY-MM-DD`（ゼロ埋め・4桁年）の日付をパースする
///
/// chronoの`%Y`は符号付きや4桁超の年、`%m`/`%d`はゼロ埋めなしも受け付けるため、
/// 先に文字の並びを確認する。
fn parse_date(key: &str, value: &str) -> Result<NaiveDate, Rejection> {
    let invalid =
        || Rejection::BadRequest(format!("{}はYYYY-MM-DD形式で指定してください: {}", key, value));

    if !is_date_shape(value) {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| invalid())
}

fn is_date_shape(value: &str) -> bool {
    value.len() == DATE_LENGTH
        && value.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        })
}
