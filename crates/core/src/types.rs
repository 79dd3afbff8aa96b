//! Upstream data model for the Voidly censorship index API.
//!
//! Everything here is request-scoped: decoded from one upstream response,
//! rendered, and dropped. Fields the upstream may omit are explicit
//! `Option`s or defaulted collections so every rendering branch is
//! statically exhaustive.

use serde::{Deserialize, Serialize};

/// Connectivity status reported for a country. Unrecognized wire values
/// decode to `Unknown` rather than failing the whole snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum CountryStatus {
    FullOutage,
    PartialOutage,
    Degraded,
    Normal,
    Unknown,
}

impl From<String> for CountryStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "full_outage" => Self::FullOutage,
            "partial_outage" => Self::PartialOutage,
            "degraded" => Self::Degraded,
            "normal" => Self::Normal,
            _ => Self::Unknown,
        }
    }
}

impl From<CountryStatus> for &'static str {
    fn from(value: CountryStatus) -> Self {
        match value {
            CountryStatus::FullOutage => "full_outage",
            CountryStatus::PartialOutage => "partial_outage",
            CountryStatus::Degraded => "degraded",
            CountryStatus::Normal => "normal",
            CountryStatus::Unknown => "unknown",
        }
    }
}

impl CountryStatus {
    /// Human-readable form used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::FullOutage => "Full Outage",
            Self::PartialOutage => "Partial Outage",
            Self::Degraded => "Degraded",
            Self::Normal => "Normal",
            Self::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for CountryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Incident severity. Upstream casing varies, so the parse is
/// case-insensitive; unrecognized values become `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
    Unknown,
}

impl From<String> for Severity {
    fn from(value: String) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "low" => Self::Low,
            "medium" => Self::Medium,
            "high" => Self::High,
            "critical" => Self::Critical,
            _ => Self::Unknown,
        }
    }
}

impl From<Severity> for &'static str {
    fn from(value: Severity) -> Self {
        match value {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
            Severity::Unknown => "unknown",
        }
    }
}

impl Severity {
    /// Upper-cased tag used in reports.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
            Self::Unknown => "UNKNOWN",
        }
    }
}

/// OONI-derived measurement aggregates for one country.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementMetrics {
    /// Fraction of measurements flagged anomalous, in [0, 1].
    pub anomaly_rate: f64,
    /// Fraction of measurements confirmed blocked, in [0, 1].
    pub confirmed_rate: f64,
    pub measurement_count: u64,
    #[serde(default)]
    pub affected_services: Vec<String>,
    #[serde(default)]
    pub last_updated: Option<String>,
}

/// A discrete censorship event identified by the upstream service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    pub id: String,
    pub country: String,
    #[serde(default)]
    pub country_name: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub severity: Severity,
    pub status: String,
    pub start_time: String,
    #[serde(default)]
    pub affected_services: Vec<String>,
}

/// Per-country entry in the global index, also the root object of the
/// per-country detail endpoint. The metrics block arrives under the
/// upstream's `ooni` key and is absent when no recent measurements exist.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryRecord {
    pub code: String,
    #[serde(default)]
    pub name: Option<String>,
    pub status: CountryStatus,
    #[serde(default, alias = "ooni")]
    pub metrics: Option<MeasurementMetrics>,
    #[serde(default)]
    pub incidents: Vec<Incident>,
}

/// Counts per status bucket in the global index summary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSummary {
    #[serde(default)]
    pub full_outage: u64,
    #[serde(default)]
    pub partial_outage: u64,
    #[serde(default)]
    pub degraded: u64,
    #[serde(default)]
    pub normal: u64,
    #[serde(default)]
    pub unknown: u64,
}

/// Root object of the global censorship-index endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexSnapshot {
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub summary: StatusSummary,
    #[serde(default)]
    pub countries: Vec<CountryRecord>,
}

/// Root object of the active-incidents endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IncidentFeed {
    #[serde(default)]
    pub incidents: Vec<Incident>,
}
