use crate::{
    auth::{
        hash_password, is_strong_password, is_valid_email, verify_password, LoginRequest,
        LoginResponse, RegisterRequest, TokenCodec,
    },
    error::AppError,
    models::User,
};
use actix_web::{post, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::SqlitePool;

/// Register a new account.
///
/// Validates the credential policy, hashes the password and inserts the user.
/// Uniqueness is enforced by the store's UNIQUE(email) constraint at insert
/// time, not by a prior lookup, so concurrent registrations with the same
/// email cannot both succeed.
#[post("/register")]
pub async fn register(
    pool: web::Data<SqlitePool>,
    body: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    let body = body.into_inner();
    let (name, email, password) = match (body.name, body.email, body.password) {
        (Some(name), Some(email), Some(password))
            if !name.is_empty() && !email.is_empty() && !password.is_empty() =>
        {
            (name, email, password)
        }
        _ => return Err(AppError::BadRequest("Please provide all fields".into())),
    };

    if !is_valid_email(&email) {
        return Err(AppError::BadRequest("Invalid email".into()));
    }

    if !is_strong_password(&password) {
        return Err(AppError::BadRequest(
            "Password must be at least 8 characters and include upper case, lower case, digit and special character".into(),
        ));
    }

    let password_hash = hash_password(&password)?;

    let result = sqlx::query("INSERT INTO users (name, email, password_hash) VALUES (?, ?, ?)")
        .bind(&name)
        .bind(&email)
        .bind(&password_hash)
        .execute(&**pool)
        .await;

    match result {
        Ok(done) => Ok(HttpResponse::Created().json(json!({
            "id": done.last_insert_rowid(),
            "name": name,
            "email": email,
        }))),
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            Err(AppError::BadRequest("Email already registered".into()))
        }
        Err(err) => Err(err.into()),
    }
}

/// Authenticate a user and mint a session token.
///
/// Leaves no session record behind; the token is the whole session.
#[post("/login")]
pub async fn login(
    pool: web::Data<SqlitePool>,
    codec: web::Data<TokenCodec>,
    body: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    let body = body.into_inner();
    let (email, password) = match (body.email, body.password) {
        (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
            (email, password)
        }
        _ => {
            return Err(AppError::BadRequest(
                "Please provide email and password".into(),
            ))
        }
    };

    let user = sqlx::query_as::<_, User>(
        "SELECT id, name, email, password_hash FROM users WHERE email = ?",
    )
    .bind(&email)
    .fetch_optional(&**pool)
    .await?
    .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    if !verify_password(&password, &user.password_hash)? {
        return Err(AppError::Unauthorized("Invalid password".into()));
    }

    let token = codec.generate(user.id)?;

    Ok(HttpResponse::Ok().json(LoginResponse { auth: true, token }))
}

/// Stateless logout. There is no server-side session to tear down, so this
/// always succeeds; the caller discards its token locally.
#[post("/logout")]
pub async fn logout() -> impl Responder {
    HttpResponse::Ok().json(json!({ "message": "Logged out successfully" }))
}
