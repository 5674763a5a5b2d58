// データベースクエリ条件
//
// 日付プロパティに対する「開始時刻より後」かつ「終了時刻より前」のAND条件と、
// 同じプロパティの昇順ソートを組み立てる。

use crate::domain::DateRange;
use serde::Serialize;

/// データベースクエリ（POST /v1/databases/{id}/query のリクエスト）
///
/// `database_id`はURLパスに使うためボディには含めない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatabaseQuery {
    #[serde(skip)]
    pub database_id: String,
    pub filter: CompoundFilter,
    pub sorts: Vec<PropertySort>,
}

/// AND結合フィルター
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompoundFilter {
    pub and: Vec<DatePropertyFilter>,
}

/// 日付プロパティフィルター
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatePropertyFilter {
    pub property: String,
    pub date: DateCondition,
}

/// 日付の比較条件
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DateCondition {
    After(String),
    Before(String),
}

/// プロパティソート
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertySort {
    pub property: String,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
}

impl DatabaseQuery {
    /// 日付範囲からクエリを構築する
    ///
    /// 入力はすべて解決済みであること（ここではデフォルト値を補わない）。
    pub fn new(
        database_id: impl Into<String>,
        date_property_name: &str,
        range: &DateRange,
    ) -> Self {
        Self {
            database_id: database_id.into(),
            filter: CompoundFilter {
                and: vec![
                    DatePropertyFilter {
                        property: date_property_name.to_string(),
                        date: DateCondition::After(range.start_iso8601()),
                    },
                    DatePropertyFilter {
                        property: date_property_name.to_string(),
                        date: DateCondition::Before(range.end_iso8601()),
                    },
                ],
            },
            sorts: vec![PropertySort {
                property: date_property_name.to_string(),
                direction: SortDirection::Ascending,
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use chrono_tz::Tz;
    use serde_json::json;

    fn range(tz: Tz) -> DateRange {
        DateRange::build(
            NaiveDate::from_ymd_opt(2025, 6, 25).unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 26).unwrap(),
            tz,
        )
        .unwrap()
    }

    #[test]
    fn test_query_body_asia_tokyo() {
        let query = DatabaseQuery::new("dummy-database-id", "作成日時", &range(Tz::Asia__Tokyo));

        assert_eq!(query.database_id, "dummy-database-id");
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({
                "filter": {
                    "and": [
                        { "property": "作成日時", "date": { "after": "2025-06-25T00:00:00+09:00" } },
                        { "property": "作成日時", "date": { "before": "2025-06-26T23:59:59+09:00" } }
                    ]
                },
                "sorts": [
                    { "property": "作成日時", "direction": "ascending" }
                ]
            })
        );
    }

    #[test]
    fn test_query_body_utc() {
        let query = DatabaseQuery::new("dummy-database-id", "作成日時", &range(Tz::UTC));

        let body = serde_json::to_value(&query).unwrap();
        assert_eq!(body["filter"]["and"][0]["date"]["after"], "2025-06-25T00:00:00Z");
        assert_eq!(body["filter"]["and"][1]["date"]["before"], "2025-06-26T23:59:59Z");
    }

    #[test]
    fn test_query_body_omits_database_id() {
        let query = DatabaseQuery::new("dummy-database-id", "created_at", &range(Tz::UTC));

        let body = serde_json::to_value(&query).unwrap();
        assert!(body.get("database_id").is_none());
        assert_eq!(body["sorts"][0]["property"], "created_at");
    }
}
