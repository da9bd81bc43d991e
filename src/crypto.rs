use crate::error::{BurnError, Result};
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;
use sha3::{Digest, Sha3_256};

/// AIP-80 prefix some wallets put in front of exported Ed25519 keys.
const AIP80_PREFIX: &str = "ed25519-priv-";

/// Authentication key scheme byte for a single Ed25519 key.
pub const ED25519_SCHEME: u8 = 0x00;

pub struct KeyPair {
    pub signing_key: SigningKey,
}

impl KeyPair {
    /// Generate a new Ed25519 keypair
    pub fn generate() -> Self {
        let mut csprng = OsRng;
        KeyPair { signing_key: SigningKey::generate(&mut csprng) }
    }

    /// Parse a 32-byte private key given as hex.
    ///
    /// Surrounding whitespace is ignored (key files usually end in a newline),
    /// as are an AIP-80 `ed25519-priv-` prefix and a `0x` prefix.
    pub fn from_private_key_hex(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let trimmed = trimmed.strip_prefix(AIP80_PREFIX).unwrap_or(trimmed);
        let hex_str = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        let bytes = hex::decode(hex_str)
            .map_err(|e| BurnError::InvalidSecretKey(format!("not hex: {}", e)))?;
        let secret: [u8; 32] = bytes.as_slice().try_into().map_err(|_| {
            BurnError::InvalidSecretKey(format!("expected 32 bytes, got {}", bytes.len()))
        })?;

        Ok(KeyPair { signing_key: SigningKey::from_bytes(&secret) })
    }

    /// Sign a message with the private key
    pub fn sign(&self, message: &[u8]) -> Signature {
        self.signing_key.sign(message)
    }

    /// Verify a signature against a message using this keypair's public key
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        self.public_key().verify(message, signature).is_ok()
    }

    /// Get the public key
    pub fn public_key(&self) -> VerifyingKey {
        self.signing_key.verifying_key()
    }

    /// Get public key as hex string
    pub fn public_key_hex(&self) -> String {
        format!("0x{}", hex::encode(self.public_key().to_bytes()))
    }

    /// Authentication key of this key pair, which is also the address of
    /// an account that never rotated its key.
    pub fn authentication_key(&self) -> [u8; 32] {
        let mut preimage = self.public_key().to_bytes().to_vec();
        preimage.push(ED25519_SCHEME);
        sha3_256(&preimage)
    }
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair").field("public_key", &self.public_key_hex()).finish()
    }
}

pub fn sha3_256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha3_256::new();
    hasher.update(data);
    hasher.finalize().into()
}
