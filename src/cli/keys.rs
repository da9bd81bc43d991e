use crate::cli::Cli;
use crate::error::{BurnError, Result};
use std::fs;
use tracing::{info, warn};

/// Pick the secret key from `--secret_key`, falling back to the contents of
/// `--secret_key_file`. The inline key wins when both are given; an empty
/// inline key counts as not given.
pub fn resolve_secret_key(cli: &Cli) -> Result<String> {
    let inline = cli.secret_key.as_deref().filter(|k| !k.is_empty());
    match (inline, &cli.secret_key_file) {
        (Some(key), file) => {
            if let Some(path) = file {
                warn!("Both a secret key and a key file were given; ignoring {}", path.display());
            }
            Ok(key.to_string())
        }
        (None, Some(path)) => {
            let contents = fs::read_to_string(path)?;
            info!("Secret key loaded from file: {}", path.display());
            Ok(contents)
        }
        (None, None) => Err(BurnError::MissingSecretKey),
    }
}
