//! EU data-residency report
//!
//! Classifies the Vertex AI region and a resource inventory (log sinks,
//! BigQuery datasets, Cloud Storage buckets) as EU or non-EU and renders a
//! plain-text report. The inventory is a JSON document exported from the
//! cloud console or CLI; this module never calls provider listing APIs.

use crate::config::regional_endpoint;
use crate::Result;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fmt;
use std::path::Path;

pub const EU_REGIONS: &[&str] = &[
    "europe-west1",
    "europe-west2",
    "europe-west3",
    "europe-west4",
    "europe-west6",
    "europe-west8",
    "europe-west9",
    "europe-west10",
    "europe-central2",
    "europe-north1",
];

pub const RECOMMENDATIONS: &[&str] = &[
    "Ensure all logging sinks point to EU destinations",
    "Create BigQuery datasets with location=EU",
    "Use Cloud Storage buckets with location=EU or EUROPE-*",
    "Set up organization policies to restrict to EU regions",
    "Enable VPC Service Controls for additional protection",
];

pub fn is_eu_region(location: &str) -> bool {
    EU_REGIONS.contains(&location)
}

/// Substring match on the sink destination, as exported.
pub fn is_eu_sink_destination(destination: &str) -> bool {
    let destination = destination.to_lowercase();
    destination.contains("europe") || destination.contains("eu")
}

pub fn is_eu_dataset_location(location: &str) -> bool {
    location == "EU" || location.starts_with("europe")
}

pub fn is_eu_bucket_location(location: &str) -> bool {
    location == "EU" || location.starts_with("EUROPE")
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogSink {
    pub name: String,
    pub destination: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Dataset {
    pub id: String,
    pub location: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Bucket {
    pub name: String,
    pub location: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Inventory {
    #[serde(default)]
    pub log_sinks: Vec<LogSink>,
    #[serde(default)]
    pub datasets: Vec<Dataset>,
    #[serde(default)]
    pub buckets: Vec<Bucket>,
}

impl Inventory {
    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Compliant,
    NonCompliant,
    Warning,
}

impl Status {
    fn marker(self) -> &'static str {
        match self {
            Status::Compliant => "✅",
            Status::NonCompliant => "❌",
            Status::Warning => "⚠️ ",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub status: Status,
    pub message: String,
}

impl Finding {
    fn new(status: Status, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Section {
    pub title: &'static str,
    pub findings: Vec<Finding>,
}

#[derive(Debug, Clone)]
pub struct ResidencyReport {
    pub generated_at: DateTime<Utc>,
    pub vertex_compliant: bool,
    pub sections: Vec<Section>,
}

impl ResidencyReport {
    pub fn build(
        location: &str,
        inventory: Option<&Inventory>,
        generated_at: DateTime<Utc>,
    ) -> Self {
        let vertex_compliant = is_eu_region(location);

        let sections = vec![
            Section {
                title: "VERTEX AI CONFIGURATION",
                findings: vertex_findings(location, vertex_compliant),
            },
            Section {
                title: "LOGGING CONFIGURATION",
                findings: inventory.map_or_else(
                    || vec![not_checked("logging configuration")],
                    |inv| sink_findings(&inv.log_sinks),
                ),
            },
            Section {
                title: "BIGQUERY DATASETS",
                findings: inventory.map_or_else(
                    || vec![not_checked("BigQuery datasets")],
                    |inv| dataset_findings(&inv.datasets),
                ),
            },
            Section {
                title: "STORAGE BUCKETS",
                findings: inventory.map_or_else(
                    || vec![not_checked("storage buckets")],
                    |inv| bucket_findings(&inv.buckets),
                ),
            },
            Section {
                title: "PROJECT POLICIES",
                findings: vec![Finding::new(
                    Status::Warning,
                    "Project location policy check requires organization admin access\n   Manually verify organization policies restrict resources to EU",
                )],
            },
        ];

        for section in &sections {
            for finding in &section.findings {
                tracing::debug!("{}: {:?} {}", section.title, finding.status, finding.message);
            }
        }

        Self {
            generated_at,
            vertex_compliant,
            sections,
        }
    }

    pub fn has_non_compliant(&self) -> bool {
        self.sections
            .iter()
            .flat_map(|s| &s.findings)
            .any(|f| f.status == Status::NonCompliant)
    }
}

fn not_checked(what: &str) -> Finding {
    Finding::new(
        Status::Warning,
        format!("Could not check {}: no inventory supplied", what),
    )
}

fn vertex_findings(location: &str, compliant: bool) -> Vec<Finding> {
    let region = if compliant {
        Finding::new(
            Status::Compliant,
            format!("Vertex AI region: {} (EU compliant)", location),
        )
    } else {
        Finding::new(
            Status::NonCompliant,
            format!("Vertex AI region: {} (NOT EU compliant)", location),
        )
    };

    vec![
        region,
        Finding::new(
            Status::Compliant,
            format!(
                "Vertex AI endpoint for {}\n   Endpoint: {}",
                location,
                regional_endpoint(location)
            ),
        ),
    ]
}

fn sink_findings(sinks: &[LogSink]) -> Vec<Finding> {
    if sinks.is_empty() {
        return vec![Finding::new(
            Status::Warning,
            "No custom logging sinks found - logs may use default global storage",
        )];
    }

    let (eu, non_eu): (Vec<&LogSink>, Vec<&LogSink>) = sinks
        .iter()
        .partition(|s| is_eu_sink_destination(&s.destination));

    let mut findings = Vec::new();
    if !eu.is_empty() {
        findings.push(Finding::new(
            Status::Compliant,
            format!("Found EU logging sinks: {}", join(eu.iter().map(|s| s.name.clone()))),
        ));
    }
    if !non_eu.is_empty() {
        findings.push(Finding::new(
            Status::Warning,
            format!(
                "Found non-EU logging sinks: {}",
                join(non_eu.iter().map(|s| s.name.clone()))
            ),
        ));
    }
    findings
}

fn dataset_findings(datasets: &[Dataset]) -> Vec<Finding> {
    classify(
        datasets.iter().map(|d| {
            (
                format!("{} ({})", d.id, d.location),
                is_eu_dataset_location(&d.location),
            )
        }),
        "EU BigQuery datasets",
        "Non-EU BigQuery datasets",
        "No BigQuery datasets found",
    )
}

fn bucket_findings(buckets: &[Bucket]) -> Vec<Finding> {
    classify(
        buckets.iter().map(|b| {
            (
                format!("{} ({})", b.name, b.location),
                is_eu_bucket_location(&b.location),
            )
        }),
        "EU Storage buckets",
        "Non-EU Storage buckets",
        "No Storage buckets found",
    )
}

fn classify(
    items: impl Iterator<Item = (String, bool)>,
    eu_label: &str,
    non_eu_label: &str,
    empty_label: &str,
) -> Vec<Finding> {
    let (eu, non_eu): (Vec<_>, Vec<_>) = items.partition(|(_, is_eu)| *is_eu);

    let mut findings = Vec::new();
    if !eu.is_empty() {
        findings.push(Finding::new(
            Status::Compliant,
            format!("{}: {}", eu_label, join(eu.into_iter().map(|(d, _)| d))),
        ));
    }
    if !non_eu.is_empty() {
        findings.push(Finding::new(
            Status::NonCompliant,
            format!("{}: {}", non_eu_label, join(non_eu.into_iter().map(|(d, _)| d))),
        ));
    }
    if findings.is_empty() {
        findings.push(Finding::new(Status::Warning, empty_label));
    }
    findings
}

fn join(items: impl Iterator<Item = String>) -> String {
    items.collect::<Vec<_>>().join(", ")
}

impl fmt::Display for ResidencyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(60);
        writeln!(f, "{}", rule)?;
        writeln!(f, "EU DATA RESIDENCY VALIDATION REPORT")?;
        writeln!(f, "Generated: {}", self.generated_at.format("%Y-%m-%d %H:%M:%S UTC"))?;
        writeln!(f, "{}", rule)?;
        writeln!(f)?;

        for (i, section) in self.sections.iter().enumerate() {
            writeln!(f, "{}. {}", i + 1, section.title)?;
            writeln!(f, "{}", "-".repeat(30))?;
            for finding in &section.findings {
                writeln!(f, "{} {}", finding.status.marker(), finding.message)?;
            }
            writeln!(f)?;
        }

        writeln!(f, "{}", rule)?;
        writeln!(f, "SUMMARY")?;
        writeln!(f, "{}", rule)?;
        if self.vertex_compliant {
            writeln!(f, "✅ Vertex AI: EU compliant")?;
        } else {
            writeln!(f, "❌ Vertex AI: NOT EU compliant")?;
        }
        writeln!(f)?;
        writeln!(f, "RECOMMENDATIONS:")?;
        for recommendation in RECOMMENDATIONS {
            writeln!(f, "- {}", recommendation)?;
        }
        Ok(())
    }
}
