use anyhow::{Context, Result};
use clap::Parser;
use llm_client_adapter::config::{self, VertexConfig};
use llm_client_adapter::residency::{Inventory, ResidencyReport};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "eu-residency-report")]
#[command(about = "Check a Vertex AI setup for EU data residency")]
struct CliArgs {
    /// JSON inventory of log sinks, BigQuery datasets and storage buckets.
    #[arg(long, value_name = "PATH")]
    inventory: Option<PathBuf>,

    /// Vertex AI location; defaults to VERTEX_AI_LOCATION.
    #[arg(long)]
    location: Option<String>,

    /// Exit non-zero when any non-compliant finding is present.
    #[arg(long)]
    strict: bool,
}

/// `--location` when given and non-blank, otherwise the configured region.
fn resolve_location(flag: Option<&str>, lookup: impl Fn(&str) -> Option<String>) -> String {
    match flag.map(str::trim).filter(|l| !l.is_empty()) {
        Some(location) => location.to_string(),
        None => VertexConfig::location_from_lookup(lookup),
    }
}

fn should_fail(strict: bool, report: &ResidencyReport) -> bool {
    strict && report.has_non_compliant()
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "llm_client_adapter=info,eu_residency_report=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = CliArgs::parse();
    let location = resolve_location(args.location.as_deref(), config::env_lookup());

    let inventory = match &args.inventory {
        Some(path) => Some(
            Inventory::from_path(path)
                .with_context(|| format!("Failed to load inventory from {}", path.display()))?,
        ),
        None => {
            warn!("No --inventory supplied; logging, BigQuery and storage checks are skipped");
            None
        }
    };

    let report = ResidencyReport::build(&location, inventory.as_ref(), chrono::Utc::now());
    print!("{}", report);

    if should_fail(args.strict, &report) {
        info!("Non-compliant findings present");
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use llm_client_adapter::config::DEFAULT_VERTEX_LOCATION;

    fn env(location: Option<&'static str>) -> impl Fn(&str) -> Option<String> {
        move |key: &str| {
            if key == config::VERTEX_AI_LOCATION {
                location.map(str::to_string)
            } else {
                None
            }
        }
    }

    #[test]
    fn test_parse_args() {
        let args = CliArgs::try_parse_from([
            "eu-residency-report",
            "--inventory",
            "inv.json",
            "--location",
            "europe-west4",
            "--strict",
        ])
        .unwrap();

        assert_eq!(args.inventory, Some(PathBuf::from("inv.json")));
        assert_eq!(args.location.as_deref(), Some("europe-west4"));
        assert!(args.strict);

        let args = CliArgs::try_parse_from(["eu-residency-report"]).unwrap();
        assert!(args.inventory.is_none());
        assert!(!args.strict);
    }

    #[test]
    fn test_location_flag_wins_over_env() {
        assert_eq!(
            resolve_location(Some("europe-west1"), env(Some("us-east1"))),
            "europe-west1"
        );
    }

    #[test]
    fn test_location_falls_back_to_env_then_default() {
        assert_eq!(resolve_location(None, env(Some("europe-north1"))), "europe-north1");
        assert_eq!(resolve_location(None, env(None)), DEFAULT_VERTEX_LOCATION);
    }

    #[test]
    fn test_blank_location_is_treated_as_missing() {
        assert_eq!(resolve_location(None, env(Some(""))), "us-central1");
        assert_eq!(resolve_location(Some("  "), env(None)), "us-central1");

        let report = ResidencyReport::build(
            &resolve_location(None, env(Some(" "))),
            None,
            chrono::Utc::now(),
        );
        assert!(report
            .to_string()
            .contains("Endpoint: https://us-central1-aiplatform.googleapis.com"));
    }

    #[test]
    fn test_strict_fails_only_on_non_compliance() {
        let now = chrono::Utc::now();
        let compliant = ResidencyReport::build("europe-west1", Some(&Inventory::default()), now);
        let non_compliant = ResidencyReport::build("us-central1", None, now);

        assert!(!should_fail(true, &compliant));
        assert!(should_fail(true, &non_compliant));
        assert!(!should_fail(false, &non_compliant));
    }
}
