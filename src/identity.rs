//! Client context for the asset-minting toolkit: an endpoint, the signer
//! identity and whatever programs plugins register.

use crate::crypto::KeyPair;
use crate::error::{BurnError, Result};
use reqwest::Url;
use std::sync::Arc;
use tracing::debug;

/// On-chain program a plugin makes available to the context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    pub name: String,
    pub public_key: String,
}

/// Something that can extend a [`Context`].
pub trait Plugin {
    fn install(&self, context: &mut Context);
}

pub struct Context {
    endpoint: Url,
    identity: Option<Arc<KeyPair>>,
    payer: Option<Arc<KeyPair>>,
    programs: Vec<Program>,
}

impl Context {
    pub fn new(endpoint: &str) -> Result<Self> {
        let url = Url::parse(endpoint).map_err(|e| BurnError::InvalidEndpoint(format!("{}: {}", endpoint, e)))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(BurnError::InvalidEndpoint(format!("unsupported scheme in {}", endpoint)));
        }
        Ok(Self { endpoint: url, identity: None, payer: None, programs: Vec::new() })
    }

    pub fn use_plugin<P: Plugin>(mut self, plugin: P) -> Self {
        plugin.install(&mut self);
        self
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn identity(&self) -> Option<&KeyPair> {
        self.identity.as_deref()
    }

    pub fn payer(&self) -> Option<&KeyPair> {
        self.payer.as_deref()
    }

    pub fn set_identity(&mut self, signer: Arc<KeyPair>) {
        self.identity = Some(signer);
    }

    pub fn set_payer(&mut self, signer: Arc<KeyPair>) {
        self.payer = Some(signer);
    }

    /// Register `program`, replacing any earlier program with the same name.
    pub fn register_program(&mut self, program: Program) {
        debug!("Registering program {} ({})", program.name, program.public_key);
        self.programs.retain(|p| p.name != program.name);
        self.programs.push(program);
    }

    pub fn programs(&self) -> &[Program] {
        &self.programs
    }

    /// Human-readable lines describing the identity and registered programs.
    /// Keys are printed as hex.
    pub fn summary(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(signer) = self.identity() {
            lines.push(format!("Identity public key (hex): {}", signer.public_key_hex()));
        }
        if let Some(payer) = self.payer() {
            lines.push(format!("Payer public key (hex): {}", payer.public_key_hex()));
        }
        for program in &self.programs {
            lines.push(format!("Program {}: {}", program.name, program.public_key));
        }
        lines
    }
}

/// Fresh random signer.
pub fn generate_signer() -> Arc<KeyPair> {
    Arc::new(KeyPair::generate())
}

/// Makes `signer` both the identity and the fee payer.
pub struct SignerIdentity {
    signer: Arc<KeyPair>,
}

pub fn signer_identity(signer: Arc<KeyPair>) -> SignerIdentity {
    SignerIdentity { signer }
}

impl Plugin for SignerIdentity {
    fn install(&self, context: &mut Context) {
        context.set_identity(self.signer.clone());
        context.set_payer(self.signer.clone());
    }
}

pub const TOKEN_METADATA_PROGRAM: &str = "mplTokenMetadata";
pub const TOKEN_METADATA_PROGRAM_ID: &str = "metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s";

/// Registers the token-metadata program.
pub struct TokenMetadataPlugin;

impl Plugin for TokenMetadataPlugin {
    fn install(&self, context: &mut Context) {
        context.register_program(Program {
            name: TOKEN_METADATA_PROGRAM.to_string(),
            public_key: TOKEN_METADATA_PROGRAM_ID.to_string(),
        });
    }
}

/// Endpoint context with a generated signer identity and the token-metadata plugin.
pub fn bootstrap(endpoint: &str) -> Result<Context> {
    let signer = generate_signer();
    Ok(Context::new(endpoint)?
        .use_plugin(signer_identity(signer))
        .use_plugin(TokenMetadataPlugin))
}
