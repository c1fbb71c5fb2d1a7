use serde::Serialize;
use sqlx::FromRow;

/// A user row. The password hash never leaves the server.
#[derive(Debug, Serialize, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}
