use folio_persistence_postgres::{PostgresDatabase, PostgresDatabaseConfig};

pub type Db = PostgresDatabase;

/// Connect to the configured database, reset it and apply all migrations.
pub async fn setup() -> Db {
    let db = setup_clean().await;
    db.run_migrations(None).await.unwrap();
    db
}

/// Connect to the configured database and drop all tables.
pub async fn setup_clean() -> Db {
    let config = folio_config::load().unwrap();

    let db = Db::connect(&PostgresDatabaseConfig {
        url: config.database.url,
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        acquire_timeout: config.database.acquire_timeout.into(),
        idle_timeout: config.database.idle_timeout.map(Into::into),
        max_lifetime: config.database.max_lifetime.map(Into::into),
    })
    .await
    .unwrap();

    db.reset().await.unwrap();
    db
}
