use std::net::SocketAddr;

use axum::http::HeaderValue;
use env_helpers::{get_env, get_env_default};
use secrecy::SecretString;
use time::Duration;

pub struct AppConfig {
    pub database_url: String,
    pub db_max_connections: u32,
    pub jwt_secret: SecretString,
    pub access_token_ttl: Duration,
    pub bind_addr: SocketAddr,
    pub cors_origin: HeaderValue,
    /// Path of the structured JSON log file.
    pub log_file: String,
    /// Password assigned to the seeded demo accounts.
    pub seed_password: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let database_url: String = get_env("DATABASE_URL");
        let db_max_connections: u32 = get_env_default("DB_MAX_CONNECTIONS", 5);

        let jwt_secret: SecretString = SecretString::new(get_env::<String>("JWT_SECRET").into());
        let access_token_ttl_secs: i64 = get_env_default("ACCESS_TOKEN_TTL_SECS", 86_400);

        let bind_addr: SocketAddr = get_env_default(
            "BIND_ADDR",
            SocketAddr::from(([127, 0, 0, 1], 7000)),
        );
        let cors_origin: HeaderValue =
            get_env_default("CORS_ORIGIN", String::from("http://localhost:3000"))
                .parse()
                .expect("CORS_ORIGIN must be a valid header value");

        let log_file: String = get_env_default("LOG_FILE", "app.log".to_string());
        let seed_password: String = get_env_default("SEED_PASSWORD", "questioner40".to_string());

        Self {
            database_url,
            db_max_connections,
            jwt_secret,
            access_token_ttl: Duration::seconds(access_token_ttl_secs),
            bind_addr,
            cors_origin,
            log_file,
            seed_password,
        }
    }
}
