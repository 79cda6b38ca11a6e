use std::{collections::HashSet, fmt::Write, time::Duration};

use anyhow::{anyhow, Context};
use bb8::{Pool, PooledConnection};
use bb8_postgres::{
    tokio_postgres::{self, NoTls},
    PostgresConnectionManager,
};
use folio_persistence_contracts::{Database, Transaction};
use folio_utils::trace_instrument;
use ouroboros::self_referencing;
use tracing::trace;

pub mod contact;

type PgManager = PostgresConnectionManager<NoTls>;
type PgClient = tokio_postgres::Client;
type PgPooledConnection = PooledConnection<'static, PgManager>;
type PgTransaction<'a> = tokio_postgres::Transaction<'a>;

#[derive(Debug, Clone)]
pub struct PostgresDatabase {
    pool: Pool<PgManager>,
}

#[derive(Debug)]
pub struct PostgresDatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Option<Duration>,
    pub max_lifetime: Option<Duration>,
}

impl PostgresDatabase {
    pub async fn connect(config: &PostgresDatabaseConfig) -> anyhow::Result<Self> {
        let manager = PgManager::new(
            config.url.parse().context("Failed to parse database url")?,
            NoTls,
        );
        let pool = Pool::builder()
            .max_size(config.max_connections)
            .min_idle(config.min_connections)
            .connection_timeout(config.acquire_timeout)
            .idle_timeout(config.idle_timeout)
            .max_lifetime(config.max_lifetime)
            .build(manager)
            .await
            .context("Failed to create database connection pool")?;

        Ok(Self { pool })
    }

    /// Create a database handle that never connects. Useful for wiring
    /// tests that only need a value of this type.
    #[cfg(feature = "dummy")]
    pub async fn dummy() -> Self {
        let manager = PgManager::new(tokio_postgres::Config::new(), NoTls);
        Self {
            pool: Pool::builder().build_unchecked(manager),
        }
    }

    pub async fn list_migrations(&self) -> anyhow::Result<Vec<MigrationStatus>> {
        let conn = self.connection().await?;
        create_migrations_table(&conn).await?;
        list_migrations(&conn)
            .await
            .context("Failed to list migrations")
    }

    /// Apply the next `cnt` pending migrations (all of them if `None`) and
    /// return their names.
    pub async fn run_migrations(&self, cnt: Option<usize>) -> anyhow::Result<Vec<&'static str>> {
        let mut conn = self.connection().await?;
        create_migrations_table(&conn).await?;

        let pending = list_migrations(&conn)
            .await
            .context("Failed to list migrations")?
            .into_iter()
            .filter_map(|MigrationStatus { migration, applied }| (!applied).then_some(migration))
            .take(cnt.unwrap_or(usize::MAX))
            .collect::<Vec<_>>();

        let mut out = Vec::with_capacity(pending.len());
        for migration in pending {
            let txn = conn
                .transaction()
                .await
                .context("Failed to begin transaction")?;
            txn.batch_execute(migration.up)
                .await
                .with_context(|| format!("Failed to run migration {}", migration.name))?;
            txn.execute(
                "insert into _migrations (name) values ($1)",
                &[&migration.name],
            )
            .await
            .with_context(|| format!("Failed to mark migration {} as applied", migration.name))?;
            txn.commit().await.context("Failed to commit transaction")?;
            out.push(migration.name);
        }

        Ok(out)
    }

    /// Revert the last `cnt` applied migrations (all of them if `None`) and
    /// return their names, most recent first.
    pub async fn revert_migrations(&self, cnt: Option<usize>) -> anyhow::Result<Vec<&'static str>> {
        let mut conn = self.connection().await?;
        create_migrations_table(&conn).await?;

        let applied = list_migrations(&conn)
            .await
            .context("Failed to list migrations")?
            .into_iter()
            .rev()
            .filter_map(|MigrationStatus { migration, applied }| applied.then_some(migration))
            .take(cnt.unwrap_or(usize::MAX))
            .collect::<Vec<_>>();

        let mut out = Vec::with_capacity(applied.len());
        for migration in applied {
            let txn = conn
                .transaction()
                .await
                .context("Failed to begin transaction")?;
            txn.batch_execute(migration.down)
                .await
                .with_context(|| format!("Failed to revert migration {}", migration.name))?;
            txn.execute("delete from _migrations where name=$1", &[&migration.name])
                .await
                .with_context(|| {
                    format!("Failed to mark migration {} as reverted", migration.name)
                })?;
            txn.commit().await.context("Failed to commit transaction")?;
            out.push(migration.name);
        }

        Ok(out)
    }

    /// Drop all tables, including the migration history.
    pub async fn reset(&self) -> anyhow::Result<()> {
        self.connection()
            .await?
            .batch_execute("drop schema public cascade; create schema public;")
            .await
            .context("Failed to drop and recreate schema public")
    }

    async fn connection(&self) -> anyhow::Result<PooledConnection<'_, PgManager>> {
        self.pool
            .get()
            .await
            .context("Failed to acquire database connection")
    }
}

impl Database for PostgresDatabase {
    type Transaction = PostgresTransaction;

    async fn begin_transaction(&self) -> anyhow::Result<Self::Transaction> {
        trace!("begin transaction");

        let conn = self
            .pool
            .get_owned()
            .await
            .context("Failed to acquire database connection")?;

        PostgresTransactionAsyncSendTryBuilder {
            conn,
            txn_builder: |conn| Box::pin(async move { conn.transaction().await.map(Some) }),
        }
        .try_build()
        .await
        .context("Failed to begin transaction")
    }

    #[trace_instrument(skip(self))]
    async fn ping(&self) -> anyhow::Result<()> {
        let conn = self.connection().await?;

        let res: i32 = conn
            .query_one("select 1", &[])
            .await
            .context("Failed to ping database")?
            .get(0);

        (res == 1)
            .then_some(())
            .ok_or_else(|| anyhow!("Expected a result of 1, got {res} instead"))
    }
}

/// A transaction together with the pooled connection it runs on.
///
/// The inner transaction is only taken out by `commit` and `rollback`, both of
/// which consume `self`. Dropping a `PostgresTransaction` rolls it back.
#[self_referencing]
pub struct PostgresTransaction {
    conn: PgPooledConnection,
    #[borrows(mut conn)]
    #[covariant]
    txn: Option<PgTransaction<'this>>,
}

impl PostgresTransaction {
    fn txn(&self) -> &PgTransaction<'_> {
        self.borrow_txn()
            .as_ref()
            .expect("transaction is only taken by commit or rollback")
    }
}

impl Transaction for PostgresTransaction {
    async fn commit(mut self) -> anyhow::Result<()> {
        trace!("commit transaction");

        self.with_txn_mut(|txn| txn.take())
            .ok_or_else(|| anyhow!("Transaction has already been finished"))?
            .commit()
            .await
            .context("Failed to commit transaction")
    }

    async fn rollback(mut self) -> anyhow::Result<()> {
        trace!("rollback transaction");

        self.with_txn_mut(|txn| txn.take())
            .ok_or_else(|| anyhow!("Transaction has already been finished"))?
            .rollback()
            .await
            .context("Failed to rollback transaction")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Migration {
    pub name: &'static str,
    pub up: &'static str,
    pub down: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MigrationStatus {
    pub migration: Migration,
    pub applied: bool,
}

macro_rules! migrations {
    ($($name:literal),* $(,)?) => {
        &[$(
            Migration {
                name: $name,
                up: ::core::include_str!(::core::concat!("../migrations/", $name, ".up.sql")),
                down: ::core::include_str!(::core::concat!("../migrations/", $name, ".down.sql")),
            },
        )*]
    };
}

/// All migrations in the order in which they are applied.
pub const MIGRATIONS: &[Migration] = migrations![
    "2024-10-17-120000_contacts",
];

async fn create_migrations_table(conn: &PgClient) -> anyhow::Result<()> {
    conn.execute(
        "create table if not exists _migrations (name text primary key)",
        &[],
    )
    .await
    .context("Failed to create migrations table")?;
    Ok(())
}

async fn list_migrations(conn: &PgClient) -> anyhow::Result<Vec<MigrationStatus>> {
    let applied = conn
        .query("select name from _migrations", &[])
        .await?
        .into_iter()
        .map(|row| row.get(0))
        .collect::<HashSet<String>>();

    Ok(MIGRATIONS
        .iter()
        .map(|&migration| MigrationStatus {
            migration,
            applied: applied.contains(migration.name),
        })
        .collect())
}

/// Define `<NAME>_CNT` and `<NAME>_COL_NAMES` for a list of columns.
macro_rules! columns {
    ($vis:vis $ident:ident: $fst:literal $(, $col:literal)* $(,)?) => {
        ::paste::paste! {
            #[allow(unused, reason = "not every statement needs the column count")]
            $vis const [< $ident:snake:upper _CNT >]: usize = [ $fst $(, $col)* ].len();
            $vis const [< $ident:snake:upper _COL_NAMES >]: &str =
                ::core::concat!('"', $fst, '"' $(, ", \"", $col, '"' )* );
        }
    };
}
use columns;

/// Render `$a, $b, ...` placeholders for the given parameter indices.
fn arg_indices(indices: impl IntoIterator<Item = usize>) -> String {
    let mut out = String::new();
    for (i, x) in indices.into_iter().enumerate() {
        if i != 0 {
            out.push_str(", ");
        }
        let _ = write!(&mut out, "${x}");
    }
    out
}
