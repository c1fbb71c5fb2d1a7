use crate::error::AppError;
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

/// Session token validity window, in hours.
const TOKEN_TTL_HOURS: i64 = 24;

/// Claims carried by a session token. Tokens are never persisted; the claims
/// are the whole session state.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// The authenticated user's id.
    pub sub: i64,
    /// Expiration timestamp, seconds since epoch.
    pub exp: usize,
}

/// Signs and verifies session tokens. Built once at startup from the
/// configured secret; read-only afterwards.
#[derive(Clone)]
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenCodec {
    pub fn from_secret(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }

    /// Mints a token bound to `user_id`, expiring in 24 hours.
    pub fn generate(&self, user_id: i64) -> Result<String, AppError> {
        let expiration = Utc::now()
            .checked_add_signed(Duration::hours(TOKEN_TTL_HOURS))
            .expect("valid timestamp")
            .timestamp() as usize;

        let claims = Claims {
            sub: user_id,
            exp: expiration,
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))
    }

    /// Verifies the signature and expiry, returning the decoded claims.
    /// Expiry gets its own message so callers can tell a stale token from a
    /// forged one.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AppError::Unauthorized("Token expired".into()),
                _ => AppError::Unauthorized("Invalid token".into()),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_generation_and_verification() {
        let codec = TokenCodec::from_secret(b"test_secret_for_gen_verify");
        let token = codec.generate(1).unwrap();
        let claims = codec.verify(&token).unwrap();
        assert_eq!(claims.sub, 1);
    }

    #[test]
    fn test_token_expiration() {
        let secret = b"test_secret_for_expiration";
        let codec = TokenCodec::from_secret(secret);

        let expiration = Utc::now()
            .checked_sub_signed(Duration::hours(2))
            .expect("valid timestamp")
            .timestamp() as usize;
        let claims = Claims {
            sub: 2,
            exp: expiration,
        };
        let expired_token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret),
        )
        .unwrap();

        match codec.verify(&expired_token) {
            Err(AppError::Unauthorized(msg)) => assert_eq!(msg, "Token expired"),
            Ok(_) => panic!("expired token must not verify"),
            Err(e) => panic!("unexpected error type: {:?}", e),
        }
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = TokenCodec::from_secret(b"one_secret").generate(3).unwrap();
        let codec = TokenCodec::from_secret(b"a_completely_different_secret");

        match codec.verify(&token) {
            Err(AppError::Unauthorized(msg)) => assert_eq!(msg, "Invalid token"),
            Ok(_) => panic!("token signed with another secret must not verify"),
            Err(e) => panic!("unexpected error type: {:?}", e),
        }
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let codec = TokenCodec::from_secret(b"garbage_test_secret");

        match codec.verify("not-a-jwt") {
            Err(AppError::Unauthorized(msg)) => assert_eq!(msg, "Invalid token"),
            Ok(_) => panic!("garbage must not verify"),
            Err(e) => panic!("unexpected error type: {:?}", e),
        }
    }
}
