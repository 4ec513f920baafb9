//! TfL API response DTOs.
//!
//! These types map directly to the JSON array returned by the Unified API's
//! line-status endpoint. Unknown fields are ignored; `reason` is omitted by
//! the API when a line is running normally, so it defaults to empty.

use std::collections::HashMap;

use serde::Deserialize;
use tracing::warn;

use crate::error::TflError;

/// One transit line's current state.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Line name, e.g. "Central".
    pub name: String,

    /// Current status entries. A line can carry several at once, e.g.
    /// partial closures on different sections with different reasons.
    pub line_statuses: Vec<LineStatus>,
}

/// A single severity entry for a line.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineStatus {
    /// Severity code. Lower is more severe; 10 means "Good Service".
    pub status_severity: i32,

    /// Human-readable severity, e.g. "Part Closure".
    pub status_severity_description: String,

    /// Free-text explanation. Empty when the line is running normally.
    #[serde(default)]
    pub reason: String,
}

/// Decode a response body as a JSON array of line reports.
///
/// A well-formed empty array is a valid result with zero reports. A report
/// with an empty line name is rejected as a decode failure, so every
/// `Report` this function produces has a usable name.
pub(crate) fn decode_reports(body: &str) -> Result<Vec<Report>, TflError> {
    let reports: Vec<Report> = serde_json::from_str(body).map_err(|e| {
        warn!(error = %e, "failed to decode line status response");
        TflError::Json {
            message: e.to_string(),
        }
    })?;

    if reports.iter().any(|r| r.name.is_empty()) {
        return Err(TflError::Json {
            message: "report with empty line name".to_string(),
        });
    }

    Ok(reports)
}

/// Index reports by lowercased line name for convenient lookup.
///
/// When two reports share a name after lowercasing, the later one in
/// sequence order wins. An empty input yields an empty map.
pub fn reports_by_name(reports: Vec<Report>) -> HashMap<String, Report> {
    reports
        .into_iter()
        .map(|r| (r.name.to_lowercase(), r))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn report(name: &str, severity: i32) -> Report {
        Report {
            name: name.to_string(),
            line_statuses: vec![LineStatus {
                status_severity: severity,
                status_severity_description: if severity == 10 {
                    "Good Service".to_string()
                } else {
                    "Part Closure".to_string()
                },
                reason: String::new(),
            }],
        }
    }

    #[test]
    fn deserialize_report() {
        let json = r#"{
            "name": "Central",
            "lineStatuses": [
                {
                    "statusSeverity": 6,
                    "statusSeverityDescription": "Severe Delays",
                    "reason": "Central Line: Severe delays due to a signal failure at Bank."
                },
                {
                    "statusSeverity": 10,
                    "statusSeverityDescription": "Good Service"
                }
            ]
        }"#;

        let report: Report = serde_json::from_str(json).unwrap();

        assert_eq!(report.name, "Central");
        assert_eq!(report.line_statuses.len(), 2);
        assert_eq!(report.line_statuses[0].status_severity, 6);
        assert!(report.line_statuses[0].reason.contains("signal failure"));

        // Omitted reason defaults to empty
        assert_eq!(report.line_statuses[1].status_severity, 10);
        assert_eq!(
            report.line_statuses[1].status_severity_description,
            "Good Service"
        );
        assert_eq!(report.line_statuses[1].reason, "");
    }

    #[test]
    fn decode_full_response() {
        // The tube mode alone carries eleven lines
        let names = [
            "Bakerloo",
            "Central",
            "Circle",
            "District",
            "Hammersmith & City",
            "Jubilee",
            "Metropolitan",
            "Northern",
            "Piccadilly",
            "Victoria",
            "Waterloo & City",
        ];
        let entries: Vec<String> = names
            .iter()
            .map(|n| {
                format!(
                    r#"{{"name": "{n}", "lineStatuses": [{{"statusSeverity": 10, "statusSeverityDescription": "Good Service"}}]}}"#
                )
            })
            .collect();
        let body = format!("[{}]", entries.join(","));

        let reports = decode_reports(&body).unwrap();

        assert_eq!(reports.len(), 11);
        assert_eq!(reports[0].name, "Bakerloo");
        assert_eq!(reports[10].name, "Waterloo & City");
    }

    #[test]
    fn decode_empty_array() {
        let reports = decode_reports("[]").unwrap();
        assert!(reports.is_empty());
    }

    #[test]
    fn decode_malformed_body() {
        assert!(decode_reports("not json at all").is_err());
        assert!(decode_reports(r#"{"name": "Central"}"#).is_err());
        assert!(decode_reports("null").is_err());
        assert!(decode_reports(r#"[{"lineStatuses": []}]"#).is_err());
    }

    #[test]
    fn decode_rejects_empty_line_name() {
        let body = r#"[{"name": "", "lineStatuses": []}]"#;
        let err = decode_reports(body).unwrap_err();
        assert!(err.to_string().contains("empty line name"));
    }

    #[test]
    fn reports_by_name_lowercases_keys() {
        let map = reports_by_name(vec![report("Central", 10), report("DLR", 10)]);

        assert_eq!(map.len(), 2);
        assert_eq!(map["central"].name, "Central");
        assert_eq!(map["dlr"].name, "DLR");
        assert!(!map.contains_key("Central"));
    }

    #[test]
    fn reports_by_name_later_entry_wins() {
        let map = reports_by_name(vec![report("Central", 10), report("CENTRAL", 6)]);

        assert_eq!(map.len(), 1);
        assert_eq!(map["central"].name, "CENTRAL");
        assert_eq!(map["central"].line_statuses[0].status_severity, 6);
    }

    #[test]
    fn reports_by_name_empty_input() {
        assert!(reports_by_name(Vec::new()).is_empty());
    }
}
