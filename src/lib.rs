pub mod account;
pub mod burner;
pub mod cli;
pub mod client;
pub mod config;
pub mod crypto;
pub mod encoding;
pub mod error;
pub mod identity;
pub mod json;
pub mod tokens;
pub mod transaction;

#[cfg(test)]
mod testing;
