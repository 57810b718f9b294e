use crate::DbConn;
use crate::{
    config::JwtConfig,
    error::{Error, Result},
    models::users::{
        LoginUser, NewUser, PublicUser, RefreshTokenRequest, RegisterUser, TokenPair,
        UserListParams,
    },
    queries::users,
    services::jwt::{self, TokenType},
    validation::{
        validate_email, validate_name, validate_password, validate_required_string,
        validate_username, FieldErrors,
    },
};
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use secrecy::ExposeSecret;

pub const INVALID_CREDENTIALS_MESSAGE: &str = "No active account found with the given credentials";

/// Hashes a password into an Argon2 PHC string
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| Error::Internal(format!("Failed to hash password: {}", e)))?
        .to_string();

    Ok(password_hash)
}

/// Verifies a password against a password hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| Error::Internal(format!("Invalid password hash: {}", e)))?;

    let argon2 = Argon2::default();

    match argon2.verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(Error::Internal(format!(
            "Password verification failed: {}",
            e
        ))),
    }
}

/// Registers a new user with field validation and password hashing
///
/// Every invalid field is reported at once. Username and email must not be
/// taken by another account.
pub async fn register_user(conn: &mut DbConn, register_user: RegisterUser) -> Result<PublicUser> {
    let mut errors = FieldErrors::default();

    let first_name = errors.check(validate_name(register_user.first_name.as_deref(), "first_name"));
    let last_name = errors.check(validate_name(register_user.last_name.as_deref(), "last_name"));
    let username = errors.check(validate_username(register_user.username.as_deref()));
    let email = errors.check(validate_email(register_user.email.as_deref()));
    let password = errors.check(validate_password(register_user.password.as_deref()));

    if let Some(username) = &username {
        if users::get_user_by_username(conn, username).await?.is_some() {
            errors.add("username", "A user with that username already exists.");
        }
    }

    if let Some(email) = &email {
        if users::get_user_by_email(conn, email).await?.is_some() {
            errors.add("email", "A user with that email already exists.");
        }
    }

    errors.into_result()?;

    let (Some(first_name), Some(last_name), Some(username), Some(email), Some(password)) =
        (first_name, last_name, username, email, password)
    else {
        return Err(Error::Internal("Validated registration is incomplete".to_string()));
    };

    let new_user = NewUser {
        first_name,
        last_name,
        username,
        email,
        password_hash: hash_password(&password)?,
    };

    // The unique constraints still catch a concurrent registration
    let user = users::create_user(conn, new_user).await?;
    tracing::info!(user_id = user.id, username = %user.username, "User registered");

    Ok(user.into())
}

/// Lists every user in the requested order
pub async fn list_users(conn: &mut DbConn, params: &UserListParams) -> Result<Vec<PublicUser>> {
    let users = users::list_users(conn, &params.ordering()).await?;
    Ok(users.into_iter().map(PublicUser::from).collect())
}

/// Gets one user by id
pub async fn get_user(conn: &mut DbConn, id: i64) -> Result<PublicUser> {
    users::get_user_by_id(conn, id)
        .await?
        .map(PublicUser::from)
        .ok_or_else(|| Error::NotFound("User not found".to_string()))
}

/// Exchanges username and password for an access/refresh token pair
pub async fn login_user(
    conn: &mut DbConn,
    login_user: LoginUser,
    config: &JwtConfig,
) -> Result<TokenPair> {
    let mut errors = FieldErrors::default();
    let username = errors.check(validate_required_string(login_user.username.as_deref(), "username"));
    let password = errors.check(validate_password(login_user.password.as_deref()));
    errors.into_result()?;

    let (Some(username), Some(password)) = (username, password) else {
        return Err(Error::Internal("Validated login is incomplete".to_string()));
    };

    let user = users::get_user_by_username(conn, &username)
        .await?
        .ok_or_else(|| Error::Authentication(INVALID_CREDENTIALS_MESSAGE.to_string()))?;

    if !verify_password(&password, &user.password)? {
        tracing::debug!(username = %username, "Login rejected: wrong password");
        return Err(Error::Authentication(INVALID_CREDENTIALS_MESSAGE.to_string()));
    }

    jwt::generate_token_pair(user.id, config)
}

/// Exchanges a valid refresh token for a new token pair
///
/// The subject must still exist; tokens of deleted users are rejected.
pub async fn refresh_tokens(
    conn: &mut DbConn,
    request: RefreshTokenRequest,
    config: &JwtConfig,
) -> Result<TokenPair> {
    let refresh = validate_required_string(request.refresh.as_deref(), "refresh")?;

    let user_id = jwt::get_user_id_from_token(
        &refresh,
        config.secret.expose_secret(),
        TokenType::Refresh,
    )?;

    if users::get_user_by_id(conn, user_id).await?.is_none() {
        return Err(Error::InvalidToken("User not found".to_string()));
    }

    jwt::generate_token_pair(user_id, config)
}
