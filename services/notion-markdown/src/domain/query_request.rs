use super::DateRange;
use chrono::NaiveDate;
use chrono_tz::Tz;

/// 検証済みのクエリパラメーター
///
/// RequestValidatorが生成する。`from_date <= to_date`が保証され、
/// `range`はタイムゾーン解決済みの境界時刻を保持する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    /// 日付の解釈と見出しに使うタイムゾーン
    pub timezone: Tz,
    /// フィルター・ソート対象の日付プロパティ名
    pub date_property_name: String,
    /// 検索対象のデータベースID（空文字列にはならない）
    pub database_id: String,
    /// 取得範囲の開始日
    pub from_date: NaiveDate,
    /// 取得範囲の終了日
    pub to_date: NaiveDate,
    /// `from_date`〜`to_date`をタイムゾーンで解決した範囲
    pub range: DateRange,
    /// 2行目以降をインデントするか
    pub indent: bool,
    /// 日付ごとに見出しを付けるか
    pub date_heading: bool,
}
