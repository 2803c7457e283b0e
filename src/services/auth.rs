use std::sync::OnceLock;

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::rngs::OsRng;
use rusqlite::ErrorCode;
use tracing::{error, info, warn};

use crate::db::queries;
use crate::errors::AppError;
use crate::models::User;
use crate::state::AppState;

pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("failed to hash password: {e}"))?;
    Ok(hash.to_string())
}

pub fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed =
        PasswordHash::new(hash).map_err(|e| anyhow::anyhow!("invalid password hash: {e}"))?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

// Verified against when the email is unknown, so both login failures cost one argon2 run.
fn dummy_hash() -> Option<&'static str> {
    static DUMMY: OnceLock<Option<String>> = OnceLock::new();
    DUMMY
        .get_or_init(|| hash_password("servicebook-dummy-password").ok())
        .as_deref()
}

/// Creates a user account and returns its id.
///
/// Fails with [`AppError::DuplicateEmail`] when the email is taken; nothing
/// is written in that case.
pub fn register(
    state: &AppState,
    fullname: &str,
    email: &str,
    password: &str,
) -> Result<i64, AppError> {
    let fullname = fullname.trim();
    let email = email.trim();
    if fullname.is_empty() || email.is_empty() || password.is_empty() {
        return Err(AppError::Validation("fullname, email and password are required".into()));
    }

    let password_hash = hash_password(password)?;

    let conn = state.conn()?;
    match queries::insert_user(&conn, fullname, email, &password_hash) {
        Ok(id) => {
            info!(user_id = id, "user registered");
            Ok(id)
        }
        Err(e) if e.sqlite_error_code() == Some(ErrorCode::ConstraintViolation) => {
            warn!(email = %email, "email already registered");
            Err(AppError::DuplicateEmail)
        }
        Err(e) => Err(e.into()),
    }
}

/// Checks credentials. Unknown email and wrong password yield the same error.
pub fn login(state: &AppState, email: &str, password: &str) -> Result<User, AppError> {
    let email = email.trim();
    let user = {
        let conn = state.conn()?;
        queries::get_user_by_email(&conn, email)?
    };

    let Some(user) = user else {
        if let Some(hash) = dummy_hash() {
            let _ = verify_password(password, hash);
        }
        warn!("login failed");
        return Err(AppError::InvalidCredentials);
    };

    let valid = verify_password(password, &user.password_hash).unwrap_or_else(|e| {
        error!(user_id = user.id, error = %e, "stored password hash is unreadable");
        false
    });

    if !valid {
        warn!("login failed");
        return Err(AppError::InvalidCredentials);
    }

    info!(user_id = user.id, "user logged in");
    Ok(user)
}
