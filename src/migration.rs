//! Database bootstrap: create the target database if missing, then the person/address tables.
//! Statements are idempotent so they run on every start.

use crate::error::{AppError, ConfigError};
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;

const DDL: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS address (
        id BIGSERIAL PRIMARY KEY,
        street VARCHAR(100) NOT NULL,
        city VARCHAR(50) NOT NULL,
        state VARCHAR(50) NOT NULL,
        postal_code VARCHAR(5),
        country TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS person (
        id BIGSERIAL PRIMARY KEY,
        name VARCHAR(50) NOT NULL,
        phone_number VARCHAR(10),
        email_address TEXT NOT NULL,
        address_id BIGINT UNIQUE REFERENCES address (id)
    )
    "#,
];

/// Create the address and person tables. The UNIQUE foreign key keeps an address
/// owned by at most one person.
pub async fn apply_migrations(pool: &PgPool) -> Result<(), AppError> {
    for sql in DDL {
        sqlx::query(sql).execute(pool).await?;
    }
    tracing::info!("schema ready");
    Ok(())
}

/// Connect to the `postgres` maintenance database on the same server and create the
/// target database if it does not exist.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| invalid_url(e.to_string()))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(&db_name)
            .fetch_one(&mut conn)
            .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let scheme_end = url.find("://").map(|i| i + 3).unwrap_or(0);
    let path_start = url[scheme_end..]
        .find('/')
        .map(|i| scheme_end + i + 1)
        .ok_or_else(|| invalid_url("missing database path".into()))?;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let (db_name, query) = match path_and_query.split_once('?') {
        Some((name, query)) => (name.trim(), Some(query)),
        None => (path_and_query.trim(), None),
    };
    let base = url.get(..path_start).unwrap_or(url);
    let admin_url = match query {
        Some(q) => format!("{}postgres?{}", base, q),
        None => format!("{}postgres", base),
    };
    Ok((admin_url, db_name.to_string()))
}

// The URL itself is left out of the error; it may carry credentials.
fn invalid_url(reason: String) -> AppError {
    ConfigError::Invalid {
        key: "DATABASE_URL",
        value: reason,
    }
    .into()
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
