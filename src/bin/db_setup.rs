//! Schema management: `db_setup <create|drop|seed|reset>`, defaulting to `reset`.

use dotenvy::dotenv;
use tracing::info;

use questioner::{
    adapters::persistence::schema,
    infra::{config::AppConfig, db::init_db, error::InfraError, setup::init_tracing},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = AppConfig::from_env();
    init_tracing(&config.log_file);

    let command = std::env::args().nth(1).unwrap_or_else(|| "reset".to_string());
    let pool = init_db(&config.database_url, config.db_max_connections).await?;

    match command.as_str() {
        "create" => schema::create_tables(&pool).await.map_err(InfraError::Schema)?,
        "drop" => schema::drop_tables(&pool).await.map_err(InfraError::Schema)?,
        "seed" => schema::seed_tables(&pool, &config.seed_password)
            .await
            .map_err(InfraError::Schema)?,
        "reset" => {
            schema::drop_tables(&pool).await.map_err(InfraError::Schema)?;
            schema::create_tables(&pool).await.map_err(InfraError::Schema)?;
            schema::seed_tables(&pool, &config.seed_password)
                .await
                .map_err(InfraError::Schema)?;
        }
        other => anyhow::bail!("unknown command {other:?}; expected create, drop, seed or reset"),
    }

    info!(command = %command, "db_setup finished");
    Ok(())
}
