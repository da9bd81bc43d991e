pub mod burn;
pub mod keys;

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sidekick-burn")]
#[command(about = "Supervlabs burn token", long_about = None)]
pub struct Cli {
    /// Secret key in hexadecimal format
    #[arg(short = 'k', long = "secret_key")]
    pub secret_key: Option<String>,
    /// Secret key file path
    #[arg(short = 'f', long = "secret_key_file")]
    pub secret_key_file: Option<PathBuf>,
}
