use clap::Parser;
use sidekick_burn::burner::BurnReport;
use sidekick_burn::cli::{burn::handle_burn_command, Cli};
use sidekick_burn::client::Aptos;
use sidekick_burn::config::{BurnConfig, NetworkConfig};
use sidekick_burn::json;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = BurnConfig::default();
    let network = NetworkConfig::mainnet();
    debug!("Burn config: {}", json::to_log_string(&config));

    let aptos = match Aptos::new(network, config.transaction.clone()) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(e.exit_code());
        }
    };
    info!("Using {} ({})", aptos.network().name, aptos.network().fullnode_url);

    match handle_burn_command(&cli, &aptos, &aptos, &config).await {
        Ok(BurnReport::Completed { batches, burned }) => {
            info!("Burned {} tokens in {} batches", burned, batches);
            println!("Burning tokens completed successfully.");
        }
        Ok(report @ BurnReport::Halted { .. }) => {
            eprintln!("Burning stopped early: {}", json::to_log_string(&report));
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(e.exit_code());
        }
    }
}
