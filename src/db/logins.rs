use crate::db::DbPool;
use crate::errors::{Error, Result};
use rusqlite::params;
use tracing::{info, instrument};

/// Appends one login record. The caller passes the already-hashed
/// credential; this layer never sees plaintext passwords.
///
/// No uniqueness is enforced: the table is an append-only audit trail and
/// every successful login adds a row.
#[instrument(skip(pool, password_hash))]
pub async fn record_login(pool: &DbPool, email: &str, password_hash: &str) -> Result<()> {
    let conn = pool
        .lock()
        .map_err(|_| Error::Database("Failed to acquire DB lock".to_string()))?;
    let mut stmt =
        conn.prepare_cached("INSERT INTO logins (email, password_hash) VALUES (?1, ?2)")?;
    let rows = stmt.execute(params![email, password_hash])?;
    if rows == 0 {
        return Err(Error::Database(
            "Login insert affected no rows".to_string(),
        ));
    }
    info!("Recorded login for '{}'", email);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_utils::{init_test_tracing, setup_test_db};
    use crate::errors::Result;

    #[tokio::test]
    async fn stores_the_hash_and_appends_on_every_login() -> Result<()> {
        init_test_tracing();
        let pool = setup_test_db().await?;

        record_login(&pool, "ada@example.com", "deadbeef01").await?;
        record_login(&pool, "ada@example.com", "deadbeef01").await?;

        let conn = pool.lock().unwrap();
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM logins WHERE email = 'ada@example.com'",
            [],
            |row| row.get(0),
        )?;
        assert_eq!(count, 2, "every login attempt appends a row");

        let stored: String = conn.query_row(
            "SELECT password_hash FROM logins ORDER BY id DESC LIMIT 1",
            [],
            |row| row.get(0),
        )?;
        assert_eq!(stored, "deadbeef01");
        Ok(())
    }

    #[tokio::test]
    async fn login_rows_carry_a_creation_timestamp() -> Result<()> {
        use chrono::{DateTime, Utc};

        init_test_tracing();
        let pool = setup_test_db().await?;
        record_login(&pool, "ada@example.com", "deadbeef01").await?;

        let conn = pool.lock().unwrap();
        let created_at: DateTime<Utc> = conn.query_row(
            "SELECT created_at FROM logins ORDER BY id DESC LIMIT 1",
            [],
            |row| row.get(0),
        )?;
        let age = Utc::now().signed_duration_since(created_at);
        assert!(age.num_minutes().abs() < 5, "timestamp should be recent");
        Ok(())
    }
}
