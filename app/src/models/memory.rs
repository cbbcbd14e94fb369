use super::{FindQuery, Record};
use crate::error::DBError;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;

/// Process local store, used when no database is configured and in tests
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, HashMap<String, Record>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    pub fn insert(&self, collection: &str, record: Record) -> Result<(), DBError> {
        let mut collections = self.collections.write();
        let documents = collections.entry(collection.to_owned()).or_default();
        if documents.contains_key(&record.id) {
            return Err(DBError::Duplicate(collection.to_owned(), record.id));
        }
        documents.insert(record.id.clone(), record);
        Ok(())
    }

    pub fn find_one(&self, collection: &str, id: &str) -> Option<Value> {
        let collections = self.collections.read();
        collections
            .get(collection)
            .and_then(|documents| documents.get(id))
            .map(|record| record.body.clone())
    }

    pub fn find(&self, collection: &str, query: &FindQuery) -> Vec<Value> {
        let collections = self.collections.read();
        let documents = match collections.get(collection) {
            Some(documents) => documents,
            None => return Vec::new(),
        };

        let mut matches: Vec<&Record> = documents
            .values()
            .filter(|record| match &query.field_eq {
                Some((field, value)) => {
                    record.body.get(field).and_then(Value::as_str) == Some(value.as_str())
                }
                None => true,
            })
            .filter(|record| match &query.created {
                Some(window) => window.contains(&record.created_at),
                None => true,
            })
            .collect();
        matches.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

        matches
            .into_iter()
            .take(query.limit.unwrap_or(usize::MAX))
            .map(|record| record.body.clone())
            .collect()
    }

    pub fn find_containing(
        &self,
        collection: &str,
        array_field: &str,
        element_id: &str,
    ) -> Option<Value> {
        let collections = self.collections.read();
        collections
            .get(collection)?
            .values()
            .find(|record| {
                record
                    .body
                    .get(array_field)
                    .and_then(Value::as_array)
                    .map(|elements| {
                        elements
                            .iter()
                            .any(|e| e.get("_id").and_then(Value::as_str) == Some(element_id))
                    })
                    .unwrap_or(false)
            })
            .map(|record| record.body.clone())
    }

    pub fn replace(&self, collection: &str, record: Record) -> bool {
        let mut collections = self.collections.write();
        match collections
            .get_mut(collection)
            .and_then(|documents| documents.get_mut(&record.id))
        {
            Some(stored) => {
                *stored = record;
                true
            }
            None => false,
        }
    }

    pub fn delete(&self, collection: &str, id: &str) -> bool {
        let mut collections = self.collections.write();
        collections
            .get_mut(collection)
            .and_then(|documents| documents.remove(id))
            .is_some()
    }
}
