//! 日付範囲の構築
//!
//! カレンダー日付とタイムゾーンから、Notionのdateフィルターに渡す
//! ISO8601拡張形式（オフセット付き）の境界時刻を生成する。

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone};
use chrono_tz::Tz;
use thiserror::Error;

/// 1日の終わり（23:59:59）
const END_OF_DAY: NaiveTime = match NaiveTime::from_hms_opt(23, 59, 59) {
    Some(time) => time,
    None => panic!("23:59:59は有効な時刻"),
};

/// 日付範囲の構築エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateRangeError {
    /// オフセット適用後のUTC時刻が表現可能な範囲を超える
    #[error("日時が表現可能な範囲外です: {0}")]
    OutOfRange(NaiveDateTime),
}

/// タイムゾーン解決済みの取得範囲
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    /// 開始日の00:00:00（ローカル時刻）
    pub start: DateTime<FixedOffset>,
    /// 終了日の23:59:59（ローカル時刻）
    pub end: DateTime<FixedOffset>,
}

impl DateRange {
    /// 開始日・終了日・タイムゾーンから範囲を構築する
    ///
    /// オフセットはそれぞれの境界時刻におけるタイムゾーンの実際のオフセットを使う。
    /// 夏時間の切り替えをまたぐ範囲では開始と終了でオフセットが異なる。
    pub fn build(
        from_date: NaiveDate,
        to_date: NaiveDate,
        timezone: Tz,
    ) -> Result<Self, DateRangeError> {
        Ok(Self {
            start: resolve_local(from_date.and_time(NaiveTime::MIN), timezone)?,
            end: resolve_local(to_date.and_time(END_OF_DAY), timezone)?,
        })
    }

    /// 開始時刻をISO8601拡張形式で取得（例: `2025-06-25T00:00:00+09:00`）
    pub fn start_iso8601(&self) -> String {
        format_iso8601(&self.start)
    }

    /// 終了時刻をISO8601拡張形式で取得（例: `2025-06-26T23:59:59+09:00`）
    pub fn end_iso8601(&self) -> String {
        format_iso8601(&self.end)
    }
}

/// ローカル時刻にタイムゾーンのオフセットを付与する
///
/// 壁時計時刻はそのまま保持する。夏時間の開始で存在しない時刻は、
/// 同じ値をUTCとみなした時点のオフセットを採用する。
fn resolve_local(
    local: NaiveDateTime,
    timezone: Tz,
) -> Result<DateTime<FixedOffset>, DateRangeError> {
    let offset = match timezone.offset_from_local_datetime(&local).earliest() {
        Some(offset) => offset.fix(),
        None => timezone.offset_from_utc_datetime(&local).fix(),
    };
    let utc = local
        .checked_sub_offset(offset)
        .ok_or(DateRangeError::OutOfRange(local))?;
    Ok(DateTime::from_naive_utc_and_offset(utc, offset))
}

/// オフセット0は`Z`、それ以外は`±HH:MM`で出力する
fn format_iso8601(datetime: &DateTime<FixedOffset>) -> String {
    let local = datetime.format("%Y-%m-%dT%H:%M:%S");
    if datetime.offset().local_minus_utc() == 0 {
        format!("{}Z", local)
    } else {
        format!("{}{}", local, datetime.format("%:z"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn build(from: &str, to: &str, timezone: Tz) -> DateRange {
        DateRange::build(date(from), date(to), timezone).unwrap()
    }

    // ==================== 固定オフセット ====================

    #[test]
    fn test_build_asia_tokyo() {
        let range = build("2025-06-25", "2025-06-26", Tz::Asia__Tokyo);

        assert_eq!(range.start_iso8601(), "2025-06-25T00:00:00+09:00");
        assert_eq!(range.end_iso8601(), "2025-06-26T23:59:59+09:00");
    }

    #[test]
    fn test_build_utc_uses_z_suffix() {
        let range = build("2025-06-25", "2025-06-26", Tz::UTC);

        assert_eq!(range.start_iso8601(), "2025-06-25T00:00:00Z");
        assert_eq!(range.end_iso8601(), "2025-06-26T23:59:59Z");
    }

    #[test]
    fn test_build_resolves_correct_instant() {
        let range = build("2025-06-25", "2025-06-25", Tz::Asia__Tokyo);

        // 2025-06-25T00:00:00+09:00 == 2025-06-24T15:00:00Z
        let expected_start = DateTime::parse_from_rfc3339("2025-06-24T15:00:00Z").unwrap();
        assert_eq!(range.start, expected_start);
        assert_eq!(range.end.timestamp() - range.start.timestamp(), 86399);
    }

    #[test]
    fn test_build_same_day() {
        let range = build("2025-01-01", "2025-01-01", Tz::Asia__Tokyo);

        assert_eq!(range.start_iso8601(), "2025-01-01T00:00:00+09:00");
        assert_eq!(range.end_iso8601(), "2025-01-01T23:59:59+09:00");
    }

    // ==================== 可変オフセット ====================

    #[test]
    fn test_build_negative_offset_summer() {
        let range = build("2025-07-01", "2025-07-01", Tz::America__New_York);

        assert_eq!(range.start_iso8601(), "2025-07-01T00:00:00-04:00");
        assert_eq!(range.end_iso8601(), "2025-07-01T23:59:59-04:00");
    }

    #[test]
    fn test_build_negative_offset_winter() {
        let range = build("2025-01-15", "2025-01-15", Tz::America__New_York);

        assert_eq!(range.start_iso8601(), "2025-01-15T00:00:00-05:00");
        assert_eq!(range.end_iso8601(), "2025-01-15T23:59:59-05:00");
    }

    #[test]
    fn test_build_across_dst_start() {
        // 2025-03-09 02:00にEST(-05:00)からEDT(-04:00)へ切り替わる
        let range = build("2025-03-08", "2025-03-09", Tz::America__New_York);

        assert_eq!(range.start_iso8601(), "2025-03-08T00:00:00-05:00");
        assert_eq!(range.end_iso8601(), "2025-03-09T23:59:59-04:00");
    }

    #[test]
    fn test_build_zero_offset_zone_in_winter_uses_z() {
        let range = build("2025-01-10", "2025-01-10", Tz::Europe__London);

        assert_eq!(range.start_iso8601(), "2025-01-10T00:00:00Z");
    }

    #[test]
    fn test_build_zero_offset_zone_in_summer_uses_offset() {
        let range = build("2025-07-10", "2025-07-10", Tz::Europe__London);

        assert_eq!(range.start_iso8601(), "2025-07-10T00:00:00+01:00");
    }

    // ==================== 範囲外 ====================

    #[test]
    fn test_build_min_date_with_positive_offset_is_error() {
        // UTCへ戻すと表現可能な最小日時を下回る
        let result = DateRange::build(NaiveDate::MIN, NaiveDate::MIN, Tz::Asia__Tokyo);

        assert!(matches!(result, Err(DateRangeError::OutOfRange(_))));
    }

    #[test]
    fn test_build_max_date_with_negative_offset_is_error() {
        let result = DateRange::build(NaiveDate::MAX, NaiveDate::MAX, Tz::America__New_York);

        assert!(matches!(result, Err(DateRangeError::OutOfRange(_))));
    }

    #[test]
    fn test_build_nonexistent_midnight_keeps_wall_clock() {
        // キューバは夏時間開始時に00:00が存在しない
        let range = build("2025-03-09", "2025-03-09", Tz::America__Havana);

        assert!(range.start_iso8601().starts_with("2025-03-09T00:00:00"));
        assert!(range.end_iso8601().starts_with("2025-03-09T23:59:59"));
    }
}
