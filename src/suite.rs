use async_trait::async_trait;
use serde_json::Value;

use crate::{DocumentLoader, Error};

/// Outcome of a proof verification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProofVerification {
    pub verified: bool,
    /// Per-proof error details, forwarded verbatim when verification fails.
    pub errors: Vec<String>,
}

impl ProofVerification {
    pub fn verified() -> Self {
        Self {
            verified: true,
            errors: Vec::new(),
        }
    }

    pub fn error(message: &str) -> Self {
        Self {
            verified: false,
            errors: vec![message.to_string()],
        }
    }

    pub fn with_error(mut self, error: String) -> Self {
        self.verified = false;
        self.errors.push(error);
        self
    }
}

/// Verifies the cryptographic proof attached to a JSON document.
///
/// `loader` resolves whatever the suite needs to dereference (verification
/// methods, contexts).
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait ProofSuite: Sync {
    async fn verify(&self, document: &Value, loader: &dyn DocumentLoader) -> ProofVerification;
}

/// Accepts the document as soon as one suite verifies it.
pub(crate) async fn verify_with_suites(
    document: &Value,
    suites: &[&dyn ProofSuite],
    loader: &dyn DocumentLoader,
) -> Result<(), Error> {
    let mut errors = Vec::new();
    for suite in suites {
        let result = suite.verify(document, loader).await;
        if result.verified {
            return Ok(());
        }
        errors.extend(result.errors);
    }
    if errors.is_empty() {
        errors.push("No suite verified the proof".to_string());
    }
    Err(Error::Proof { errors })
}
