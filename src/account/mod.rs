//! Account module
//!
//! Addresses and the Ed25519 account used as transaction sender.

pub mod types;

pub use types::{Account, AccountAddress};
