use anyhow::Result;
use clap::Parser;
use llm_client_adapter::menu::{self, MenuOutcome};
use llm_client_adapter::provider::{Provider, ProviderConfig};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "llm-chat")]
#[command(about = "Send text and image prompts to a hosted LLM")]
struct CliArgs {
    /// Which hosted model API to talk to.
    #[arg(value_enum)]
    provider: Provider,

    /// Override the default system instruction.
    #[arg(long)]
    system: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "llm_client_adapter=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = CliArgs::parse();

    let config = match ProviderConfig::from_env(args.provider) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    for line in config.describe() {
        println!("{}", line);
    }
    println!();

    let service = config.build_service(reqwest::Client::new())?;

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();

    match menu::run_menu(
        service.as_ref(),
        args.system.as_deref(),
        &mut input,
        &mut output,
    )
    .await?
    {
        MenuOutcome::Answered(result) => {
            info!("Response extracted from {}", result.shape);
            Ok(())
        }
        MenuOutcome::Exited => Ok(()),
        MenuOutcome::Failed | MenuOutcome::InvalidChoice => std::process::exit(1),
    }
}
