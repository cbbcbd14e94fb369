use super::{FindQuery, Record};
use crate::error::DBError;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::PgPool;
use tracing::debug;

const UNIQUE_VIOLATION: &str = "23505";

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();

#[derive(sqlx::FromRow)]
struct BodyRecord {
    body: String,
}

impl BodyRecord {
    fn parse(self) -> Result<Value, DBError> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// All collections share one `documents` table, keyed by `(collection, id)`
pub struct PgStore {
    conn: PgPool,
}

impl PgStore {
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, DBError> {
        let conn = sqlx::postgres::PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        MIGRATOR.run(&conn).await?;
        debug!("Applied document store migrations");
        Ok(PgStore { conn })
    }

    pub async fn insert(&self, collection: &str, record: Record) -> Result<(), DBError> {
        let res = sql_stmnt!(
            r#"INSERT INTO documents (collection, id, body, created_at, updated_at)
                VALUES ($1, $2, $3::jsonb, $4, $5)"#,
            collection,
            &record.id,
            record.body.to_string(),
            record.created_at,
            record.updated_at
        )
        .execute(&self.conn)
        .await;

        match res {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(err)) if err.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                Err(DBError::Duplicate(collection.to_owned(), record.id))
            }
            Err(err) => Err(err.into()),
        }
    }

    pub async fn find_one(&self, collection: &str, id: &str) -> Result<Option<Value>, DBError> {
        let row = sql_stmnt!(
            BodyRecord,
            "SELECT body::text AS body FROM documents WHERE collection = $1 AND id = $2",
            collection,
            id
        )
        .fetch_optional(&self.conn)
        .await?;
        row.map(BodyRecord::parse).transpose()
    }

    pub async fn find(&self, collection: &str, query: &FindQuery) -> Result<Vec<Value>, DBError> {
        let (field, value) = match &query.field_eq {
            Some((field, value)) => (field.as_str(), Some(value.as_str())),
            None => ("", None),
        };
        let start: Option<DateTime<Utc>> = query.created.map(|w| w.start());
        let end: Option<DateTime<Utc>> = query.created.map(|w| w.end());
        let limit: Option<i64> = query.limit.map(|l| l.min(i64::MAX as usize) as i64);

        let rows = sql_stmnt!(
            BodyRecord,
            r#"SELECT body::text AS body FROM documents
                WHERE collection = $1
                AND ($2::text IS NULL OR body ->> $3 = $2)
                AND ($4::timestamptz IS NULL OR created_at >= $4)
                AND ($5::timestamptz IS NULL OR created_at < $5)
                ORDER BY updated_at DESC
                LIMIT $6"#,
            collection,
            value,
            field,
            start,
            end,
            limit
        )
        .fetch_all(&self.conn)
        .await?;
        rows.into_iter().map(BodyRecord::parse).collect()
    }

    pub async fn find_containing(
        &self,
        collection: &str,
        array_field: &str,
        element_id: &str,
    ) -> Result<Option<Value>, DBError> {
        let needle = serde_json::json!([{ "_id": element_id }]);
        let row = sql_stmnt!(
            BodyRecord,
            r#"SELECT body::text AS body FROM documents
                WHERE collection = $1 AND body -> $2 @> $3::jsonb
                LIMIT 1"#,
            collection,
            array_field,
            needle.to_string()
        )
        .fetch_optional(&self.conn)
        .await?;
        row.map(BodyRecord::parse).transpose()
    }

    pub async fn replace(&self, collection: &str, record: Record) -> Result<bool, DBError> {
        let res = sql_stmnt!(
            r#"UPDATE documents SET body = $3::jsonb, updated_at = $4
                WHERE collection = $1 AND id = $2"#,
            collection,
            &record.id,
            record.body.to_string(),
            record.updated_at
        )
        .execute(&self.conn)
        .await?;
        Ok(res.rows_affected() == 1)
    }

    pub async fn delete(&self, collection: &str, id: &str) -> Result<bool, DBError> {
        let res = sql_stmnt!(
            "DELETE FROM documents WHERE collection = $1 AND id = $2",
            collection,
            id
        )
        .execute(&self.conn)
        .await?;
        Ok(res.rows_affected() == 1)
    }

    pub async fn ping(&self) -> Result<(), DBError> {
        sql_stmnt!("SELECT 1").execute(&self.conn).await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.conn.close().await;
    }
}
