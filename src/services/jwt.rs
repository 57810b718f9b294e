use crate::{
    config::JwtConfig,
    error::{Error, Result},
    models::users::TokenPair,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use uuid::Uuid;

/// Which half of a token pair a JWT is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - user id as string
    pub sub: String,
    /// Expiration time as Unix timestamp
    pub exp: i64,
    /// Issued at time as Unix timestamp
    pub iat: i64,
    /// Unique token id
    pub jti: String,
    pub token_type: TokenType,
}

/// Generates a signed JWT for a user
///
/// # Arguments
/// * `user_id` - The user's id
/// * `token_type` - Access or refresh
/// * `secret` - The JWT secret key for signing
/// * `lifetime` - How long the token stays valid
///
/// # Example
/// ```rust,no_run
/// use chrono::Duration;
/// use movierama::services::jwt::{generate_jwt, TokenType};
///
/// let token = generate_jwt(42, TokenType::Access, "my-secret", Duration::minutes(5))?;
/// # Ok::<(), movierama::error::Error>(())
/// ```
pub fn generate_jwt(
    user_id: i64,
    token_type: TokenType,
    secret: &str,
    lifetime: Duration,
) -> Result<String> {
    let now = Utc::now();
    let expiration = now + lifetime;

    let claims = Claims {
        sub: user_id.to_string(),
        exp: expiration.timestamp(),
        iat: now.timestamp(),
        jti: Uuid::now_v7().to_string(),
        token_type,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
    .map_err(|e| Error::Internal(format!("Failed to generate JWT: {}", e)))
}

/// Issues a fresh access/refresh pair with lifetimes from `config`.
pub fn generate_token_pair(user_id: i64, config: &JwtConfig) -> Result<TokenPair> {
    let secret = config.secret.expose_secret();

    Ok(TokenPair {
        access: generate_jwt(
            user_id,
            TokenType::Access,
            secret,
            Duration::minutes(config.access_token_expiration_minutes),
        )?,
        refresh: generate_jwt(
            user_id,
            TokenType::Refresh,
            secret,
            Duration::days(config.refresh_token_expiration_days),
        )?,
    })
}

/// Verifies a JWT and returns its claims if it is valid and of the
/// `expected` type
///
/// # Errors
/// Returns [`Error::InvalidToken`] if the token is malformed, expired, has a
/// bad signature, or is of the other token type
pub fn verify_jwt(token: &str, secret: &str, expected: TokenType) -> Result<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => Error::InvalidToken("Token has expired".to_string()),
        ErrorKind::InvalidSignature => Error::InvalidToken("Invalid token signature".to_string()),
        _ => Error::InvalidToken("Token is invalid or expired".to_string()),
    })?;

    if token_data.claims.token_type != expected {
        return Err(Error::InvalidToken(format!(
            "Token has wrong type, expected {} token",
            expected
        )));
    }

    Ok(token_data.claims)
}

/// Extracts the user id from a valid JWT of the `expected` type
pub fn get_user_id_from_token(token: &str, secret: &str, expected: TokenType) -> Result<i64> {
    let claims = verify_jwt(token, secret, expected)?;
    claims
        .sub
        .parse::<i64>()
        .map_err(|_| Error::InvalidToken("Token contained no recognizable user identification".to_string()))
}

/// Validates an access token from an Authorization header value and returns
/// the user id. Format: "Authorization: Bearer <token>"
pub fn authenticate_jwt_token(auth_header: &str, secret: &str) -> Result<i64> {
    let token = extract_token_from_header(auth_header)?;
    get_user_id_from_token(token, secret, TokenType::Access)
}

/// Extracts the Bearer token from the Authorization header
fn extract_token_from_header(header: &str) -> Result<&str> {
    match header.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim()),
        Some(_) => Err(Error::InvalidToken("Empty token".to_string())),
        None => Err(Error::InvalidToken(
            "Invalid Authorization header format. Expected: 'Bearer <token>'".to_string(),
        )),
    }
}
