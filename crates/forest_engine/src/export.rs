//! Village report export

use std::fmt::Write as _;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::analytics::VillageSummary;

pub const CSV_HEADER: &str = "village,farmers,claims,pits,saplings,survival_rate";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Csv,
    Json,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(ReportFormat::Csv),
            "json" => Ok(ReportFormat::Json),
            other => Err(format!("unknown report format: {}", other)),
        }
    }
}

/// Renders the village table; rows keep the order given
pub fn render_village_report(
    rows: &[VillageSummary],
    format: ReportFormat,
) -> Result<String, serde_json::Error> {
    match format {
        ReportFormat::Csv => Ok(to_csv(rows)),
        ReportFormat::Json => serde_json::to_string_pretty(rows),
    }
}

fn to_csv(rows: &[VillageSummary]) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');
    for row in rows {
        let rate = row
            .survival_rate
            .map(|r| r.to_string())
            .unwrap_or_default();
        // writing to a String cannot fail
        let _ = writeln!(
            out,
            "{},{},{},{},{},{}",
            csv_field(&row.village),
            row.farmers,
            row.claims,
            row.pits,
            row.saplings,
            rate
        );
    }
    out
}

/// Quotes a field containing a separator, quote or newline
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
