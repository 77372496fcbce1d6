use anyhow::Context;
use clap::Parser;
use skill_gate::utils::{logger, validation::Validate};
use skill_gate::{build_adapter, CliConfig, GateConfig, InboundRequest};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // Logging level may come from the config file, so nothing is logged before it loads
    let mut config = match GateConfig::from_file(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load {}: {}", cli.config.display(), e);
            std::process::exit(2);
        }
    };

    logger::init_cli_logger(cli.verbose, config.log_level());

    tracing::info!("Starting skill-gate replay");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }
    if cli.no_validate {
        config.adapter.validate = false;
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(2);
    }

    let adapter = match build_adapter(&config) {
        Ok(adapter) => adapter,
        Err(e) => {
            tracing::error!("❌ Failed to build request adapter: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(2);
        }
    };

    let content = std::fs::read_to_string(&cli.request)
        .with_context(|| format!("reading request file {}", cli.request.display()))?;
    let request: InboundRequest = serde_json::from_str(&content)
        .with_context(|| format!("parsing request file {}", cli.request.display()))?;

    let response = adapter.handle(&request).await;
    println!("{}", serde_json::to_string_pretty(&response)?);

    if response.is_success() {
        tracing::info!("✅ Request handled with status {}", response.status_code);
        Ok(())
    } else {
        tracing::warn!("Request finished with status {}", response.status_code);
        std::process::exit(1);
    }
}
