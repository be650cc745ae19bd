use anyhow::Context;
use clap::Parser;
use sitewire::utils::{logger, validation::Validate};
use sitewire::{Bootstrapper, CliConfig, Dom, HttpFetcher, InMemoryDom};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting sitewire");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = cli
        .resolve()
        .context("failed to resolve the page configuration")?;

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    let dom = Arc::new(InMemoryDom::with_containers(config.container_ids()));
    let fetcher = HttpFetcher::new();
    let bootstrapper = Bootstrapper::new(fetcher, dom.clone() as Arc<dyn Dom>, config);

    match bootstrapper.run().await {
        Ok(report) => {
            println!("✅ Page assembled successfully");
            println!("{}", serde_json::to_string_pretty(&report.summary())?);
            if let Some(carousel) = &report.carousel {
                tracing::info!("Stopping carousel autoplay before exit");
                carousel.stop_autoplay();
            }
        }
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    }

    Ok(())
}
