//! Build a client context with a freshly generated signer identity and the
//! token-metadata plugin, then print what was registered.

use clap::Parser;
use sidekick_burn::identity;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(name = "bootstrap_identity")]
struct Args {
    /// RPC endpoint the context talks to
    #[clap(long, default_value = "https://api.devnet.solana.com")]
    endpoint: String,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let context = match identity::bootstrap(&args.endpoint) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(e.exit_code());
        }
    };

    info!("Context endpoint: {}", context.endpoint());
    for line in context.summary() {
        println!("{}", line);
    }
}
