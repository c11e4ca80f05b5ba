//! SQLite tool - ad-hoc queries against a caller-specified database file

use std::path::PathBuf;
use async_trait::async_trait;
use serde_json::{json, Value};
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqliteRow};
use sqlx::{Column, Connection, Row, TypeInfo, ValueRef};
use crate::Result;
use crate::error::Error;
use super::Tool;

/// Run one SQL statement against a SQLite file. Row-returning queries
/// (SELECT, PRAGMA, EXPLAIN) render a capped column table, everything
/// else reports rows affected. Database errors come back as text, so a
/// bad query never faults the handler.
pub struct SqliteQueryTool {
    max_rows: usize,
}

impl SqliteQueryTool {
    pub fn new(max_rows: usize) -> Self {
        Self { max_rows }
    }

    async fn run_query(
        &self,
        db_path: &PathBuf,
        query: &str,
        params: &[Value],
        fetch: bool,
    ) -> std::result::Result<String, sqlx::Error> {
        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true);
        let mut conn = SqliteConnection::connect_with(&options).await?;

        let mut prepared = sqlx::query(query);
        for param in params {
            prepared = bind_param(prepared, param);
        }

        let text = if fetch && returns_rows(query) {
            let mut rows = prepared.fetch_all(&mut conn).await?;
            let total = rows.len();
            rows.truncate(self.max_rows);

            if rows.is_empty() {
                format!(
                    "Query executed successfully. No rows returned.\nDatabase: {}",
                    db_path.display()
                )
            } else {
                let mut lines = vec![
                    format!("Database: {}", db_path.display()),
                    format!("Rows returned: {}", rows.len()),
                    String::new(),
                ];

                let columns: Vec<String> = rows[0]
                    .columns()
                    .iter()
                    .map(|c| c.name().to_string())
                    .collect();
                let header = columns.join(" | ");
                lines.push(header.clone());
                lines.push("-".repeat(header.len()));

                for row in &rows {
                    let cells: Vec<String> = (0..columns.len())
                        .map(|i| render_value(row, i))
                        .collect();
                    lines.push(cells.join(" | "));
                }

                if total >= self.max_rows {
                    lines.push(String::new());
                    lines.push(format!(
                        "Note: Results limited to {} rows. Use LIMIT/OFFSET for pagination.",
                        self.max_rows
                    ));
                }
                lines.join("\n")
            }
        } else {
            let result = prepared.execute(&mut conn).await?;
            let mut lines = vec![
                "Query executed successfully.".to_string(),
                format!("Database: {}", db_path.display()),
                format!("Rows affected: {}", result.rows_affected()),
            ];
            if is_insert(query) && result.last_insert_rowid() != 0 {
                lines.push(format!("Last inserted row ID: {}", result.last_insert_rowid()));
            }
            lines.join("\n")
        };

        conn.close().await?;
        Ok(text)
    }
}

#[async_trait]
impl Tool for SqliteQueryTool {
    fn name(&self) -> &str { "sqlite_query" }
    fn description(&self) -> &str { "Execute SQLite queries and return results" }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "database": {
                    "type": "string",
                    "description": "Path to the SQLite database file (created if missing)"
                },
                "query": {
                    "type": "string",
                    "description": "SQL statement to execute; use ? placeholders with params"
                },
                "params": {
                    "type": "array",
                    "description": "Positional parameters for ? placeholders"
                },
                "fetch": {
                    "type": "boolean",
                    "description": "Fetch and render rows for row-returning queries (default: true)"
                }
            },
            "required": ["database", "query"]
        })
    }

    async fn execute(&self, params: Value) -> Result<String> {
        let database = params.get("database")
            .and_then(|v| v.as_str())
            .ok_or_else(|| Error::Tool("Missing 'database' parameter".to_string()))?;
        let query = params.get("query")
            .and_then(|v| v.as_str())
            .ok_or_else(|| Error::Tool("Missing 'query' parameter".to_string()))?;
        let bind_values = match params.get("params") {
            Some(Value::Array(values)) => values.clone(),
            Some(_) => return Err(Error::Tool("'params' must be an array".to_string())),
            None => Vec::new(),
        };
        let fetch = params.get("fetch").and_then(|v| v.as_bool()).unwrap_or(true);

        let db_path = PathBuf::from(database);
        let db_path = if db_path.is_absolute() {
            db_path
        } else {
            std::env::current_dir()?.join(db_path)
        };
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        match self.run_query(&db_path, query, &bind_values, fetch).await {
            Ok(text) => Ok(text),
            Err(err) => Ok(format!(
                "SQLite error: {}\nDatabase: {}\nQuery: {}",
                err,
                db_path.display(),
                query
            )),
        }
    }
}

fn returns_rows(query: &str) -> bool {
    let upper = query.trim().to_uppercase();
    upper.starts_with("SELECT") || upper.starts_with("PRAGMA") || upper.starts_with("EXPLAIN")
}

fn is_insert(query: &str) -> bool {
    query.trim().to_uppercase().starts_with("INSERT")
}

fn bind_param<'q>(
    query: sqlx::query::Query<'q, sqlx::Sqlite, sqlx::sqlite::SqliteArguments<'q>>,
    value: &Value,
) -> sqlx::query::Query<'q, sqlx::Sqlite, sqlx::sqlite::SqliteArguments<'q>> {
    match value {
        Value::Null => query.bind(None::<String>),
        Value::Bool(b) => query.bind(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                query.bind(i)
            } else {
                query.bind(n.as_f64().unwrap_or(0.0))
            }
        }
        Value::String(s) => query.bind(s.clone()),
        // arrays and objects are bound as JSON text
        other => query.bind(other.to_string()),
    }
}

/// Render one cell by its runtime storage class.
fn render_value(row: &SqliteRow, index: usize) -> String {
    let raw = match row.try_get_raw(index) {
        Ok(raw) => raw,
        Err(_) => return "?".to_string(),
    };
    if raw.is_null() {
        return "NULL".to_string();
    }

    let type_name = raw.type_info().name().to_string();
    match type_name.as_str() {
        "INTEGER" => row.try_get::<i64, _>(index).map(|v| v.to_string()),
        "REAL" => row.try_get::<f64, _>(index).map(|v| v.to_string()),
        "BLOB" => row
            .try_get::<Vec<u8>, _>(index)
            .map(|v| format!("<{} bytes>", v.len())),
        _ => row.try_get::<String, _>(index),
    }
    .unwrap_or_else(|_| "?".to_string())
}
