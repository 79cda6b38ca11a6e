use folio_config::Config;
use folio_di::Provide;
use folio_persistence_contracts::Database;
use folio_utils::folio_version;
use tracing::info;

use crate::{
    database,
    environment::{types::RestServer, ConfigProvider, Provider},
};

pub async fn serve(config: Config) -> anyhow::Result<()> {
    info!("Starting folio {}", folio_version());

    info!("Connecting to database");
    let database = database::connect(&config.database).await?;
    database.ping().await?;

    info!("Applying pending migrations");
    let mut applied = false;
    for name in database.run_migrations(None).await? {
        info!("Applied {name}");
        applied = true;
    }
    if !applied {
        info!("No migrations pending");
    }

    let config_provider = ConfigProvider::new(&config);
    let mut provider = Provider::new(config_provider, database);
    let server: RestServer = provider.provide();
    server.serve().await
}
