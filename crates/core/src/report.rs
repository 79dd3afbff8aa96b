//! Markdown report rendering for tool output.
//!
//! Every function here is pure: identical input produces byte-identical
//! output. Sorting and filtering work on borrowed slices and never mutate
//! the decoded upstream data.

use crate::countries::country_name;
use crate::types::{CountryRecord, Incident, IncidentFeed, IndexSnapshot, MeasurementMetrics};
use chrono::{DateTime, Utc};
use std::cmp::Ordering;

/// Countries shown in the global index ranking.
const INDEX_TOP_N: usize = 10;
/// Measurement floor for the stricter most-censored ranking.
const RANKING_MIN_MEASUREMENTS: u64 = 100;
/// Incidents shown in the active-incidents report.
const INCIDENT_LIMIT: usize = 20;
/// Services listed per country in the most-censored report.
const SERVICE_LIMIT: usize = 5;
/// Incident descriptions are cut at this many characters.
const DESCRIPTION_LIMIT: usize = 200;

/// Render the global index snapshot: summary counts plus the ten most
/// censored countries among those with any measurements at all.
pub fn global_index(snapshot: &IndexSnapshot) -> String {
    let mut out = String::from("# Global Censorship Index\n\n");

    if let Some(ts) = &snapshot.timestamp {
        out.push_str(&format!("Snapshot: {}\n\n", format_timestamp(ts)));
    }

    out.push_str("## Summary\n\n");
    let s = &snapshot.summary;
    out.push_str(&format!("- Full outage: {}\n", s.full_outage));
    out.push_str(&format!("- Partial outage: {}\n", s.partial_outage));
    out.push_str(&format!("- Degraded: {}\n", s.degraded));
    out.push_str(&format!("- Normal: {}\n", s.normal));
    out.push_str(&format!("- Unknown: {}\n", s.unknown));

    let ranked = ranked_by_anomaly(&snapshot.countries, 0);
    if !ranked.is_empty() {
        out.push_str("\n## Most Censored Countries\n\n");
        for (i, (country, metrics)) in ranked.iter().take(INDEX_TOP_N).enumerate() {
            out.push_str(&format!(
                "{}. **{}** ({}) — anomaly rate {}%, {} measurements\n",
                i + 1,
                display_name(country),
                country.code,
                percent(metrics.anomaly_rate, 1),
                group_thousands(metrics.measurement_count),
            ));
        }
    }

    out
}

/// Render the status report for one country. `code` must already be
/// upper-cased; the heading uses the static reference table and falls
/// back to the raw code for unrecognized entries.
pub fn country_status(code: &str, record: &CountryRecord) -> String {
    let heading_name = country_name(code).unwrap_or(code);
    let mut out = format!("# Censorship Status: {heading_name}\n\n");

    out.push_str(&format!("Current status: **{}**\n", record.status.label()));

    match &record.metrics {
        Some(metrics) => {
            out.push_str("\n## Measurements\n\n");
            out.push_str(&format!(
                "- Anomaly rate: {}%\n",
                percent(metrics.anomaly_rate, 1)
            ));
            out.push_str(&format!(
                "- Confirmed blocking rate: {}%\n",
                percent(metrics.confirmed_rate, 2)
            ));
            out.push_str(&format!(
                "- Measurements: {}\n",
                group_thousands(metrics.measurement_count)
            ));
            if let Some(updated) = &metrics.last_updated {
                out.push_str(&format!("- Last updated: {}\n", format_timestamp(updated)));
            }
            if !metrics.affected_services.is_empty() {
                out.push_str(&format!(
                    "- Affected services: {}\n",
                    metrics.affected_services.join(", ")
                ));
            }
        }
        None => {
            out.push_str("\nNo recent measurement data is available for this country.\n");
        }
    }

    if !record.incidents.is_empty() {
        out.push_str("\n## Active Incidents\n\n");
        for incident in &record.incidents {
            out.push_str(&format!(
                "- [{}] {} — {}, started {}\n",
                incident.severity.tag(),
                incident.title,
                incident.status,
                format_timestamp(&incident.start_time),
            ));
        }
    }

    if let Some(metrics) = &record.metrics {
        out.push('\n');
        out.push_str(&interpretation(metrics.anomaly_rate));
        out.push('\n');
    }

    out
}

/// Render the most-censored ranking: countries with more than 100
/// measurements, sorted by anomaly rate, limited to `limit` entries.
pub fn most_censored(snapshot: &IndexSnapshot, limit: usize) -> String {
    let ranked = ranked_by_anomaly(&snapshot.countries, RANKING_MIN_MEASUREMENTS);
    let shown: Vec<_> = ranked.into_iter().take(limit).collect();

    let mut out = String::from("# Most Censored Countries\n\n");
    out.push_str(&format!(
        "Top {} by anomaly rate, among countries with more than {} measurements.\n",
        shown.len(),
        RANKING_MIN_MEASUREMENTS
    ));

    for (i, (country, metrics)) in shown.iter().enumerate() {
        out.push_str(&format!(
            "\n## {}. {} ({})\n\n",
            i + 1,
            display_name(country),
            country.code
        ));
        out.push_str(&format!(
            "- Anomaly rate: {}%\n",
            percent(metrics.anomaly_rate, 1)
        ));
        out.push_str(&format!(
            "- Measurements: {}\n",
            group_thousands(metrics.measurement_count)
        ));
        if !metrics.affected_services.is_empty() {
            let services: Vec<_> = metrics
                .affected_services
                .iter()
                .take(SERVICE_LIMIT)
                .map(String::as_str)
                .collect();
            out.push_str(&format!("- Affected services: {}\n", services.join(", ")));
        }
    }

    out
}

/// Render the active incident feed, capped at the first twenty entries.
pub fn active_incidents(feed: &IncidentFeed) -> String {
    let mut out = String::from("# Active Censorship Incidents\n\n");
    out.push_str(&format!("Total active incidents: {}\n", feed.incidents.len()));

    for incident in feed.incidents.iter().take(INCIDENT_LIMIT) {
        out.push_str(&format!(
            "\n## [{}] {}\n\n",
            incident.severity.tag(),
            incident.title
        ));
        out.push_str(&format!("- Country: {}\n", incident_country(incident)));
        out.push_str(&format!("- Status: {}\n", incident.status));
        out.push_str(&format!(
            "- Started: {}\n",
            format_timestamp(&incident.start_time)
        ));
        if !incident.affected_services.is_empty() {
            out.push_str(&format!(
                "- Affected services: {}\n",
                incident.affected_services.join(", ")
            ));
        }
        if !incident.description.is_empty() {
            out.push('\n');
            out.push_str(&truncate(&incident.description, DESCRIPTION_LIMIT));
            out.push('\n');
        }
    }

    out
}

/// Disclaimer prepended to domain-blocking queries. There is no public
/// domain-level endpoint; the country report follows verbatim.
pub fn domain_disclaimer(domain: &str, code: &str) -> String {
    format!(
        "Note: per-domain measurement data is not publicly available, so this \
         shows the overall censorship picture for the country instead.\n\
         Domain queried: {domain} ({code})\n\n"
    )
}

/// Countries holding more than `min_measurements` measurements, paired
/// with their metrics and sorted descending by anomaly rate. The sort is
/// stable, so ties keep upstream order. Countries without metrics never
/// rank.
fn ranked_by_anomaly(
    countries: &[CountryRecord],
    min_measurements: u64,
) -> Vec<(&CountryRecord, &MeasurementMetrics)> {
    let mut ranked: Vec<(&CountryRecord, &MeasurementMetrics)> = countries
        .iter()
        .filter_map(|c| c.metrics.as_ref().map(|m| (c, m)))
        .filter(|(_, m)| m.measurement_count > min_measurements)
        .collect();
    ranked.sort_by(|(_, a), (_, b)| {
        b.anomaly_rate
            .partial_cmp(&a.anomaly_rate)
            .unwrap_or(Ordering::Equal)
    });
    ranked
}

/// Interpretation paragraph keyed off the anomaly-rate thresholds.
fn interpretation(anomaly_rate: f64) -> String {
    if anomaly_rate > 0.5 {
        "The anomaly rate indicates significant censorship activity. Internet users \
         in this country likely face widespread blocking of websites and services."
            .to_string()
    } else if anomaly_rate > 0.2 {
        format!(
            "An anomaly rate around {:.0}% suggests moderate censorship. Some websites \
             and services may be blocked or disrupted.",
            anomaly_rate * 100.0
        )
    } else {
        "Censorship levels appear relatively low based on current measurements.".to_string()
    }
}

fn display_name(country: &CountryRecord) -> &str {
    country
        .name
        .as_deref()
        .or_else(|| country_name(&country.code))
        .unwrap_or(&country.code)
}

fn incident_country(incident: &Incident) -> String {
    match &incident.country_name {
        Some(name) => format!("{} ({})", name, incident.country),
        None => incident.country.clone(),
    }
}

/// A rate in [0, 1] as a percentage with fixed decimals.
fn percent(rate: f64, decimals: usize) -> String {
    format!("{:.prec$}", rate * 100.0, prec = decimals)
}

/// Locale-independent comma grouping.
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// First `limit` characters plus an ellipsis marker, only when the input
/// actually exceeded the limit.
fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        text.to_string()
    } else {
        let mut out: String = text.chars().take(limit).collect();
        out.push_str("...");
        out
    }
}

/// RFC 3339 timestamps reformat to `YYYY-MM-DD HH:MM UTC`; anything else
/// passes through verbatim.
fn format_timestamp(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => dt
            .with_timezone(&Utc)
            .format("%Y-%m-%d %H:%M UTC")
            .to_string(),
        Err(_) => raw.to_string(),
    }
}
