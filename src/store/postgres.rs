//! PostgreSQL-backed record store client.
//!
//! A thin client over the remote managed store's table. Connects using the
//! standard environment variables:
//! - PGHOST (default: localhost)
//! - PGPORT (default: 5432)
//! - PGUSER (default: $USER)
//! - PGPASSWORD (default: empty)
//! - PGDATABASE (default: same as PGUSER)
//!
//! The connection is established lazily and dropped on query failure so
//! the next operation reconnects. Inserts omit the owner column entirely;
//! the store defaults it from the session identity.

use native_tls::TlsConnector;
use postgres::{Client, NoTls, Row};
use postgres_native_tls::MakeTlsConnector;
use tracing::{debug, info, warn};

use crate::model::{Record, RecordPatch};

use super::{RecordStore, StoreError};

const RECORD_COLUMNS: &str = "id::text AS id, owner::text AS owner, name, brewery, category, \
     abv::float8 AS abv, ibu::bigint AS ibu, notes, \
     COALESCE(EXTRACT(EPOCH FROM created_at)::bigint, 0) AS created_at";

/// PostgreSQL record store client.
pub struct PgStore {
    connection_string: String,
    table: String,
    use_tls: bool,
    client: Option<Client>,
}

impl PgStore {
    /// Creates a client from environment variables. Fails when neither
    /// PGUSER nor USER is set, or when the table name is not a plain
    /// identifier (it is interpolated into query text).
    pub fn from_env(table: &str, use_tls: bool) -> Result<Self, StoreError> {
        if table.is_empty()
            || !table
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(StoreError::Connection(format!(
                "invalid table name: {}",
                table
            )));
        }

        let user = std::env::var("PGUSER")
            .or_else(|_| std::env::var("USER"))
            .map_err(|_| StoreError::Connection("PGUSER or USER not set".to_string()))?;
        let host = std::env::var("PGHOST").unwrap_or_else(|_| "localhost".to_string());
        let port = std::env::var("PGPORT").unwrap_or_else(|_| "5432".to_string());
        let password = std::env::var("PGPASSWORD").unwrap_or_default();
        let database = std::env::var("PGDATABASE").unwrap_or_else(|_| user.clone());

        let connection_string = if password.is_empty() {
            format!(
                "host={} port={} user={} dbname={}",
                host, port, user, database
            )
        } else {
            format!(
                "host={} port={} user={} password={} dbname={}",
                host, port, user, password, database
            )
        };

        Ok(Self {
            connection_string,
            table: table.to_string(),
            use_tls,
            client: None,
        })
    }

    fn connect(&self) -> Result<Client, StoreError> {
        let result = if self.use_tls {
            let connector = TlsConnector::new()
                .map_err(|e| StoreError::Connection(format!("TLS setup failed: {}", e)))?;
            Client::connect(&self.connection_string, MakeTlsConnector::new(connector))
        } else {
            Client::connect(&self.connection_string, NoTls)
        };
        match result {
            Ok(client) => {
                info!(tls = self.use_tls, "connected to record store");
                Ok(client)
            }
            Err(e) => Err(StoreError::Connection(format_pg_error(&e))),
        }
    }

    fn ensure_connected(&mut self) -> Result<(), StoreError> {
        if self.client.is_none() {
            self.client = Some(self.connect()?);
        }
        Ok(())
    }

    fn client(&mut self) -> Result<&mut Client, StoreError> {
        self.client
            .as_mut()
            .ok_or_else(|| StoreError::Connection("not connected".to_string()))
    }

    /// Wraps a query error and drops the connection so the next call
    /// reconnects.
    fn query_failed(&mut self, e: &postgres::Error) -> StoreError {
        let msg = format_pg_error(e);
        warn!("store query failed: {}", msg);
        self.client = None;
        StoreError::Query(msg)
    }
}

impl RecordStore for PgStore {
    fn select_all(&mut self, owner: &str) -> Result<Vec<Record>, StoreError> {
        let query = format!(
            "SELECT {} FROM {} WHERE owner = $1 ORDER BY created_at DESC",
            RECORD_COLUMNS, self.table
        );
        self.ensure_connected()?;
        let client = self.client()?;
        match client.query(&query, &[&owner]) {
            Ok(rows) => {
                debug!(count = rows.len(), "fetched records");
                Ok(rows.iter().map(record_from_row).collect())
            }
            Err(e) => Err(self.query_failed(&e)),
        }
    }

    fn insert(&mut self, patch: &RecordPatch) -> Result<Record, StoreError> {
        // owner is omitted: the store defaults it from the session identity.
        let query = format!(
            "INSERT INTO {} (name, brewery, category, abv, ibu, notes) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
            self.table, RECORD_COLUMNS
        );
        self.ensure_connected()?;
        let client = self.client()?;
        match client.query_one(
            &query,
            &[
                &patch.name,
                &patch.brewery,
                &patch.category,
                &patch.abv,
                &patch.ibu,
                &patch.notes,
            ],
        ) {
            Ok(row) => Ok(record_from_row(&row)),
            Err(e) => Err(self.query_failed(&e)),
        }
    }

    fn update(&mut self, id: &str, patch: &RecordPatch) -> Result<(), StoreError> {
        let query = format!(
            "UPDATE {} SET name = $2, brewery = $3, category = $4, abv = $5, ibu = $6, notes = $7 \
             WHERE id::text = $1",
            self.table
        );
        self.ensure_connected()?;
        let client = self.client()?;
        match client.execute(
            &query,
            &[
                &id,
                &patch.name,
                &patch.brewery,
                &patch.category,
                &patch.abv,
                &patch.ibu,
                &patch.notes,
            ],
        ) {
            Ok(0) => Err(StoreError::Query(format!("no record with id {}", id))),
            Ok(_) => Ok(()),
            Err(e) => Err(self.query_failed(&e)),
        }
    }

    fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        let query = format!("DELETE FROM {} WHERE id::text = $1", self.table);
        self.ensure_connected()?;
        let client = self.client()?;
        match client.execute(&query, &[&id]) {
            Ok(0) => Err(StoreError::Query(format!("no record with id {}", id))),
            Ok(_) => Ok(()),
            Err(e) => Err(self.query_failed(&e)),
        }
    }
}

fn record_from_row(row: &Row) -> Record {
    Record {
        id: row.get("id"),
        owner: row.get("owner"),
        name: row.get("name"),
        brewery: row.get("brewery"),
        category: row.get("category"),
        abv: row.get("abv"),
        ibu: row.get("ibu"),
        notes: row.get("notes"),
        created_at: row.get("created_at"),
    }
}

/// Prefers the server's own message over the client wrapper text.
fn format_pg_error(e: &postgres::Error) -> String {
    e.as_db_error()
        .map(|db| db.message().to_string())
        .unwrap_or_else(|| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_name_must_be_plain_identifier() {
        unsafe {
            std::env::set_var("PGUSER", "tester");
        }
        assert!(PgStore::from_env("beers", false).is_ok());
        assert!(PgStore::from_env("beer_log", false).is_ok());
        assert!(PgStore::from_env("", false).is_err());
        assert!(PgStore::from_env("beers; drop table x", false).is_err());
    }
}
