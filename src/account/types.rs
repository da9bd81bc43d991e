//! Account addresses and the local signing account.

use crate::crypto::KeyPair;
use crate::encoding::CanonicalSerialize;
use crate::error::{BurnError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

/// 32-byte on-chain address. Also used for object addresses such as token ids.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountAddress([u8; 32]);

impl AccountAddress {
    pub const LENGTH: usize = 32;

    pub const fn new(bytes: [u8; 32]) -> Self {
        AccountAddress(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Parse `0x`-prefixed or bare hex. Short forms such as `0x1` are left-padded.
    pub fn from_hex(input: &str) -> Result<Self> {
        let hex_str = input
            .strip_prefix("0x")
            .or_else(|| input.strip_prefix("0X"))
            .unwrap_or(input);

        if hex_str.is_empty() || hex_str.len() > Self::LENGTH * 2 {
            return Err(BurnError::InvalidAddress(input.to_string()));
        }

        let padded = format!("{:0>64}", hex_str);
        let bytes = hex::decode(&padded).map_err(|_| BurnError::InvalidAddress(input.to_string()))?;

        let mut out = [0u8; 32];
        out.copy_from_slice(&bytes);
        Ok(AccountAddress(out))
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl FromStr for AccountAddress {
    type Err = BurnError;
    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl Serialize for AccountAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for AccountAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        AccountAddress::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

impl CanonicalSerialize for AccountAddress {
    fn canonical_serialize<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.0)
    }
}

/// An Ed25519 account that signs transactions locally.
#[derive(Debug)]
pub struct Account {
    pub address: AccountAddress,
    keypair: KeyPair,
}

impl Account {
    /// Account whose address is derived from the key (no key rotation).
    pub fn from_keypair(keypair: KeyPair) -> Self {
        let address = AccountAddress::new(keypair.authentication_key());
        Account { address, keypair }
    }

    pub fn from_private_key_hex(secret: &str) -> Result<Self> {
        Ok(Self::from_keypair(KeyPair::from_private_key_hex(secret)?))
    }

    pub fn keypair(&self) -> &KeyPair {
        &self.keypair
    }

    pub fn public_key_bytes(&self) -> [u8; 32] {
        self.keypair.public_key().to_bytes()
    }
}
