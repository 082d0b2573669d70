use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Unable to fetch resource: {0}")]
    Fetch(String),
    #[error("Unable to parse resource: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for LoadError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

/// Resolves a document (status list credential, JSON-LD context, key
/// document) from its identifier.
///
/// Timeouts, caching and transport are the implementer's concern; failures
/// are reported to the status check as resolution errors.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait DocumentLoader: Sync {
    async fn load(&self, url: &str) -> Result<Value, LoadError>;
}

/// Serves documents from memory.
#[derive(Debug, Clone, Default)]
pub struct MapLoader {
    documents: HashMap<String, Value>,
}

impl MapLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Using the builder pattern, registers `document` under `url`.
    pub fn with_document(mut self, url: impl Into<String>, document: Value) -> Self {
        self.insert(url, document);
        self
    }

    /// Registers a document given as JSON text.
    pub fn with_json(self, url: impl Into<String>, json: &str) -> Result<Self, LoadError> {
        let document = serde_json::from_str(json)?;
        Ok(self.with_document(url, document))
    }

    pub fn insert(&mut self, url: impl Into<String>, document: Value) -> Option<Value> {
        self.documents.insert(url.into(), document)
    }

    pub fn get(&self, url: &str) -> Option<&Value> {
        self.documents.get(url)
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl DocumentLoader for MapLoader {
    async fn load(&self, url: &str) -> Result<Value, LoadError> {
        self.documents
            .get(url)
            .cloned()
            .ok_or_else(|| LoadError::NotFound(url.to_string()))
    }
}
