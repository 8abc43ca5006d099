use async_trait::async_trait;
use passport_model::Document;
use serde_json::{Map, Value};

use crate::error::Result;

/// Schemaless document collections (`events`, `leaders`).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>>;

    async fn list(&self, collection: &str) -> Result<Vec<Document>>;

    /// Upsert: `fields` overwrite same-named keys, other keys are kept.
    async fn merge(
        &self,
        collection: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> Result<()>;
}
