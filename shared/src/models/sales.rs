//! Sales report request/response

use serde::{Deserialize, Serialize};

/// Sales report query
///
/// Both bounds are `YYYY-MM`. Either both are given or neither.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesQuery {
    #[serde(rename = "startDate", default)]
    pub start_date: Option<String>,
    #[serde(rename = "endDate", default)]
    pub end_date: Option<String>,
}

impl SalesQuery {
    pub fn between(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start_date: Some(start.into()),
            end_date: Some(end.into()),
        }
    }
}

/// Sales report: total revenue, rounded to 2 decimal places
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SalesReport {
    pub total: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_camel_case_fields() {
        let query: SalesQuery =
            serde_json::from_str(r#"{"startDate":"2024-01","endDate":"2024-02"}"#).unwrap();
        assert_eq!(query, SalesQuery::between("2024-01", "2024-02"));

        let empty: SalesQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, SalesQuery::default());
    }

    #[test]
    fn test_report_total_is_number() {
        let json = serde_json::to_string(&SalesReport { total: 25.5 }).unwrap();
        assert_eq!(json, r#"{"total":25.5}"#);
    }
}
