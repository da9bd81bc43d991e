//! Aptos transaction structures: the BCS form that gets signed and submitted,
//! and the JSON views the fullnode returns.

use crate::account::AccountAddress;
use crate::crypto::{sha3_256, KeyPair};
use crate::encoding::{write_length, write_uleb128, CanonicalSerialize};
use crate::error::{BurnError, Result};
use crate::json::u64_str;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

const RAW_TRANSACTION_SALT: &[u8] = b"APTOS::RawTransaction";

/// `<address>::<module>::<function>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryFunctionId {
    pub address: AccountAddress,
    pub module: String,
    pub function: String,
}

impl FromStr for EntryFunctionId {
    type Err = BurnError;
    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split("::").collect();
        if parts.len() != 3 || parts[1].is_empty() || parts[2].is_empty() {
            return Err(BurnError::Encoding(format!("invalid entry function id: {}", s)));
        }
        Ok(EntryFunctionId {
            address: AccountAddress::from_hex(parts[0])?,
            module: parts[1].to_string(),
            function: parts[2].to_string(),
        })
    }
}

impl fmt::Display for EntryFunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}::{}", self.address, self.module, self.function)
    }
}

/// Entry function call with no type arguments. Each argument is already
/// BCS-encoded.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryFunction {
    pub id: EntryFunctionId,
    pub args: Vec<Vec<u8>>,
}

impl EntryFunction {
    /// Call taking a single `vector<address>` (or `vector<Object<T>>`) argument.
    pub fn with_address_vector(id: EntryFunctionId, addresses: &[AccountAddress]) -> Self {
        EntryFunction { id, args: vec![addresses.to_vec().to_bytes()] }
    }
}

impl CanonicalSerialize for EntryFunction {
    fn canonical_serialize<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        self.id.address.canonical_serialize(writer)?;
        self.id.module.clone().canonical_serialize(writer)?;
        self.id.function.clone().canonical_serialize(writer)?;
        // ty_args
        write_length(writer, 0)?;
        self.args.canonical_serialize(writer)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TransactionPayload {
    EntryFunction(EntryFunction),
}

impl CanonicalSerialize for TransactionPayload {
    fn canonical_serialize<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        match self {
            TransactionPayload::EntryFunction(f) => {
                // Variants 0 and 1 are the retired Script and ModuleBundle payloads.
                write_uleb128(writer, 2)?;
                f.canonical_serialize(writer)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawTransaction {
    pub sender: AccountAddress,
    pub sequence_number: u64,
    pub payload: TransactionPayload,
    pub max_gas_amount: u64,
    pub gas_unit_price: u64,
    pub expiration_timestamp_secs: u64,
    pub chain_id: u8,
}

impl CanonicalSerialize for RawTransaction {
    fn canonical_serialize<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        self.sender.canonical_serialize(writer)?;
        self.sequence_number.canonical_serialize(writer)?;
        self.payload.canonical_serialize(writer)?;
        self.max_gas_amount.canonical_serialize(writer)?;
        self.gas_unit_price.canonical_serialize(writer)?;
        self.expiration_timestamp_secs.canonical_serialize(writer)?;
        self.chain_id.canonical_serialize(writer)
    }
}

impl RawTransaction {
    /// `sha3_256("APTOS::RawTransaction") || bcs(self)`
    pub fn signing_message(&self) -> Vec<u8> {
        let mut message = sha3_256(RAW_TRANSACTION_SALT).to_vec();
        message.extend(self.to_bytes());
        message
    }

    pub fn sign(self, keypair: &KeyPair) -> SignedTransaction {
        let signature = keypair.sign(&self.signing_message()).to_bytes();
        SignedTransaction {
            raw: self,
            authenticator: TransactionAuthenticator::Ed25519 {
                public_key: keypair.public_key().to_bytes(),
                signature,
            },
        }
    }

    /// The fullnode refuses to simulate a validly signed transaction, so the
    /// signature is left zeroed.
    pub fn into_simulation(self, public_key: [u8; 32]) -> SignedTransaction {
        SignedTransaction {
            raw: self,
            authenticator: TransactionAuthenticator::Ed25519 { public_key, signature: [0u8; 64] },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TransactionAuthenticator {
    Ed25519 { public_key: [u8; 32], signature: [u8; 64] },
}

impl CanonicalSerialize for TransactionAuthenticator {
    fn canonical_serialize<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        match self {
            TransactionAuthenticator::Ed25519 { public_key, signature } => {
                write_uleb128(writer, 0)?;
                public_key.to_vec().canonical_serialize(writer)?;
                signature.to_vec().canonical_serialize(writer)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignedTransaction {
    pub raw: RawTransaction,
    pub authenticator: TransactionAuthenticator,
}

impl CanonicalSerialize for SignedTransaction {
    fn canonical_serialize<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        self.raw.canonical_serialize(writer)?;
        self.authenticator.canonical_serialize(writer)
    }
}

/// Returned by `POST /transactions`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PendingTransaction {
    pub hash: String,
    pub sender: AccountAddress,
    #[serde(with = "u64_str")]
    pub sequence_number: u64,
}

/// A transaction the ledger has executed (committed or simulated).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExecutedTransaction {
    pub hash: String,
    pub success: bool,
    pub vm_status: String,
    #[serde(with = "u64_str")]
    pub gas_used: u64,
    #[serde(default, with = "u64_str")]
    pub version: u64,
}
