use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};

use crate::app_error::{AppError, AppResult};

/// Well-formed Argon2id hash with the default cost parameters that no password
/// matches. Login verifies against it when the email is unknown.
pub const DUMMY_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Hash a password with Argon2id into a PHC string.
pub fn hash_password(raw: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(raw.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(e.to_string()))
}

/// Unparseable stored hashes never verify.
pub fn verify_password(raw: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        tracing::warn!("Stored password hash is not a valid PHC string");
        return false;
    };
    Argon2::default()
        .verify_password(raw.as_bytes(), &parsed)
        .is_ok()
}

/// `hash_password` on the blocking thread pool.
pub async fn hash_password_blocking(raw: String) -> AppResult<String> {
    run_blocking(move || hash_password(&raw)).await?
}

/// `verify_password` on the blocking thread pool.
pub async fn verify_password_blocking(raw: String, stored_hash: String) -> AppResult<bool> {
    run_blocking(move || verify_password(&raw, &stored_hash)).await
}

async fn run_blocking<T, F>(f: F) -> AppResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    tokio::task::spawn_blocking(f).await.map_err(|e| {
        tracing::error!("spawn_blocking join error: {}", e);
        AppError::Internal(e.to_string())
    })
}
