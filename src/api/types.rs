use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer};
use std::fmt;

/// Backend status that is relabeled for display.
pub const HIGH_RISK_STATUS: &str = "High Risk";
pub const URGENT_LABEL: &str = "Urgent";

/// Opaque report identifier. The backend may send it as a JSON number or
/// string; either way it is kept as text and sent back verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReportId(String);

impl ReportId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for ReportId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for ReportId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for ReportId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Unsigned(u64),
            Signed(i64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Unsigned(n) => Self(n.to_string()),
            RawId::Signed(n) => Self(n.to_string()),
            RawId::Text(s) => Self(s),
        })
    }
}

/// A stored medical report summary, as listed by `GET /api/reports/`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Report {
    pub id: ReportId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub status: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub ai_description: String,
}

impl Report {
    pub fn display_status(&self) -> &str {
        display_status(&self.status)
    }

    /// First line of the AI description.
    pub fn summary(&self) -> &str {
        let first = self.ai_description.split('\n').next().unwrap_or_default();
        first.strip_suffix('\r').unwrap_or(first)
    }

    /// Date shown on the timeline, e.g. `January 5, 2025 at 09:30 AM`.
    pub fn display_date<Tz: TimeZone>(&self, tz: &Tz) -> String
    where
        Tz::Offset: fmt::Display,
    {
        format_report_date(&self.created_at.with_timezone(tz))
    }
}

/// `"High Risk"` is shown as `"Urgent"`; every other status verbatim.
pub fn display_status(status: &str) -> &str {
    if status == HIGH_RISK_STATUS {
        URGENT_LABEL
    } else {
        status
    }
}

pub fn format_report_date<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    at.format("%B %-d, %Y at %I:%M %p").to_string()
}

pub fn parse_reports(json: &str) -> Result<Vec<Report>, serde_json::Error> {
    serde_json::from_str(json)
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
