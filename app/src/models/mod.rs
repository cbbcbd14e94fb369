use crate::config::Config;
use crate::error::DBError;
use chrono::{DateTime, Utc};
use garden_core::{Document, TimeWindow};
use serde_json::Value;
use tracing::{info, warn};

macro_rules! sql_stmnt {
    ($ret:ident, $stmt:expr) => {
        sqlx::query_as::<_, $ret>($stmt)
    };
    ($stmt:expr) => {
        sqlx::query($stmt)
    };
    ($ret:ident, $stmt:expr, $($bind:expr),*) => {
        sqlx::query_as::<_, $ret>($stmt)$(.bind($bind))*
    };
    ($stmt:expr, $($bind:expr),*) => {
        sqlx::query($stmt)$(.bind($bind))*
    };
}

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// A document together with the metadata the store indexes on
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub body: Value,
}

impl Record {
    pub fn from_document<D: Document>(doc: &D) -> Result<Self, DBError> {
        Ok(Record {
            id: doc.id().to_owned(),
            created_at: doc.created_at(),
            updated_at: doc.updated_at(),
            body: serde_json::to_value(doc)?,
        })
    }
}

/// Selection over a single collection.
/// Results are always ordered by `updated_at`, newest first.
#[derive(Debug, Clone, Default)]
pub struct FindQuery {
    pub field_eq: Option<(String, String)>,
    pub created: Option<TimeWindow>,
    pub limit: Option<usize>,
}

impl FindQuery {
    pub fn all() -> Self {
        FindQuery::default()
    }

    pub fn field(mut self, field: &str, value: &str) -> Self {
        self.field_eq = Some((field.to_owned(), value.to_owned()));
        self
    }

    pub fn created_within(mut self, window: TimeWindow) -> Self {
        self.created = Some(window);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Handle to the persistent collections, shared by every request
pub enum DocumentStore {
    Memory(MemoryStore),
    Postgres(PgStore),
}

impl DocumentStore {
    pub fn backend(&self) -> &'static str {
        match self {
            DocumentStore::Memory(_) => "memory",
            DocumentStore::Postgres(_) => "postgres",
        }
    }

    pub async fn insert(&self, collection: &str, record: Record) -> Result<(), DBError> {
        match self {
            DocumentStore::Memory(store) => store.insert(collection, record),
            DocumentStore::Postgres(store) => store.insert(collection, record).await,
        }
    }

    pub async fn find_one(&self, collection: &str, id: &str) -> Result<Option<Value>, DBError> {
        match self {
            DocumentStore::Memory(store) => Ok(store.find_one(collection, id)),
            DocumentStore::Postgres(store) => store.find_one(collection, id).await,
        }
    }

    pub async fn find(&self, collection: &str, query: &FindQuery) -> Result<Vec<Value>, DBError> {
        match self {
            DocumentStore::Memory(store) => Ok(store.find(collection, query)),
            DocumentStore::Postgres(store) => store.find(collection, query).await,
        }
    }

    /// Document whose `array_field` holds an element with `_id == element_id`
    pub async fn find_containing(
        &self,
        collection: &str,
        array_field: &str,
        element_id: &str,
    ) -> Result<Option<Value>, DBError> {
        match self {
            DocumentStore::Memory(store) => {
                Ok(store.find_containing(collection, array_field, element_id))
            }
            DocumentStore::Postgres(store) => {
                store
                    .find_containing(collection, array_field, element_id)
                    .await
            }
        }
    }

    /// Returns false if no document with the record's id exists
    pub async fn replace(&self, collection: &str, record: Record) -> Result<bool, DBError> {
        match self {
            DocumentStore::Memory(store) => Ok(store.replace(collection, record)),
            DocumentStore::Postgres(store) => store.replace(collection, record).await,
        }
    }

    pub async fn delete(&self, collection: &str, id: &str) -> Result<bool, DBError> {
        match self {
            DocumentStore::Memory(store) => Ok(store.delete(collection, id)),
            DocumentStore::Postgres(store) => store.delete(collection, id).await,
        }
    }

    pub async fn ping(&self) -> Result<(), DBError> {
        match self {
            DocumentStore::Memory(_) => Ok(()),
            DocumentStore::Postgres(store) => store.ping().await,
        }
    }

    pub async fn close(&self) {
        if let DocumentStore::Postgres(store) = self {
            store.close().await;
        }
    }
}

pub async fn establish_db_connection(config: &Config) -> Result<DocumentStore, DBError> {
    match config.database_url() {
        Some(database_url) => {
            let store = PgStore::connect(database_url, config.database_max_connections()).await?;
            info!(backend = "postgres", "Connected to document store");
            Ok(DocumentStore::Postgres(store))
        }
        None => {
            warn!("DATABASE_URL not set, documents are kept in memory only");
            Ok(DocumentStore::Memory(MemoryStore::new()))
        }
    }
}

#[cfg(test)]
mod test;
