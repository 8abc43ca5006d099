use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use parking_lot::RwLock;
use passport_model::Document;
use serde_json::{Map, Value};

use crate::error::Result;
use crate::traits::DocumentStore;

type Collection = BTreeMap<String, Map<String, Value>>;

/// Document store held in memory. Listing order is by document id.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<String, Collection>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace (or create) a document.
    pub fn insert(&self, collection: &str, doc: Document) {
        self.collections
            .write()
            .entry(collection.to_string())
            .or_default()
            .insert(doc.id, doc.fields);
    }

    pub fn with_documents(
        self,
        collection: &str,
        docs: impl IntoIterator<Item = Document>,
    ) -> Self {
        for doc in docs {
            self.insert(collection, doc);
        }
        self
    }

    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .get(collection)
            .map(BTreeMap::len)
            .unwrap_or(0)
    }

    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        let guard = self.collections.read();
        Ok(guard
            .get(collection)
            .and_then(|docs| docs.get(id))
            .map(|fields| Document::new(id, fields.clone())))
    }

    async fn list(&self, collection: &str) -> Result<Vec<Document>> {
        let guard = self.collections.read();
        Ok(guard
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .map(|(id, fields)| Document::new(id.clone(), fields.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn merge(
        &self,
        collection: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> Result<()> {
        let mut guard = self.collections.write();
        let existing = guard
            .entry(collection.to_string())
            .or_default()
            .entry(id.to_string())
            .or_default();
        existing.extend(fields);
        Ok(())
    }
}
