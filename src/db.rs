//! SQLite pool construction and schema bootstrap.

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

/// Opens the connection pool. Capped at a single connection: SQLite
/// serializes writes anyway, and `sqlite::memory:` databases are private to
/// the connection that opened them.
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    SqlitePoolOptions::new()
        .max_connections(1)
        .connect(database_url)
        .await
}

/// Creates the tables if they do not exist. `UNIQUE` on `users.email` is the
/// single enforcement point for registration uniqueness.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS tasks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            description TEXT NOT NULL,
            priority TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'Pending',
            user_id INTEGER NOT NULL,
            FOREIGN KEY (user_id) REFERENCES users (id)
        )",
    )
    .execute(pool)
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_rt::test]
    async fn test_init_schema_is_idempotent() {
        let pool = connect("sqlite::memory:").await.unwrap();
        init_schema(&pool).await.unwrap();
        init_schema(&pool).await.unwrap();
    }

    #[actix_rt::test]
    async fn test_email_uniqueness_enforced_at_insert() {
        let pool = connect("sqlite::memory:").await.unwrap();
        init_schema(&pool).await.unwrap();

        sqlx::query("INSERT INTO users (name, email, password_hash) VALUES (?, ?, ?)")
            .bind("First")
            .bind("dup@example.com")
            .bind("hash")
            .execute(&pool)
            .await
            .unwrap();

        let dup = sqlx::query("INSERT INTO users (name, email, password_hash) VALUES (?, ?, ?)")
            .bind("Second")
            .bind("dup@example.com")
            .bind("hash")
            .execute(&pool)
            .await;

        assert!(
            matches!(dup, Err(sqlx::Error::Database(ref e)) if e.is_unique_violation()),
            "duplicate email insert should hit the unique constraint"
        );
    }
}
