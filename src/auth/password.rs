use crate::error::AppError;
use bcrypt::{hash, verify};
use lazy_static::lazy_static;

/// Fixed bcrypt cost factor; not user-tunable.
const BCRYPT_COST: u32 = 8;

lazy_static! {
    // local@domain.tld: no whitespace, exactly one '@', dotted domain.
    static ref EMAIL_REGEX: regex::Regex =
        regex::Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

/// Pure shape check on the login key. Total: never fails.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Pure strength check: at least 8 characters, with at least one lowercase
/// letter, one uppercase letter, one digit and one character outside the
/// alphanumeric set. Total: never fails.
pub fn is_strong_password(password: &str) -> bool {
    password.chars().count() >= 8
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| !c.is_alphanumeric())
}

pub fn hash_password(password: &str) -> Result<String, AppError> {
    Ok(hash(password, BCRYPT_COST)?)
}

/// Constant-time comparison against the stored digest.
pub fn verify_password(password: &str, hashed_password: &str) -> Result<bool, AppError> {
    Ok(verify(password, hashed_password)?)
}
