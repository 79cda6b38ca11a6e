use std::{sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use folio_core_health_contracts::{HealthFeatureService, HealthStatus};
use folio_di::Build;
use folio_persistence_contracts::Database;
use folio_shared_contracts::time::TimeService;
use tokio::sync::RwLock;
use tracing::error;

#[derive(Debug, Clone, Build)]
pub struct HealthFeatureServiceImpl<Time, Db> {
    time: Time,
    db: Db,
    config: HealthFeatureConfig,
    #[state]
    state: Arc<State>,
}

#[derive(Debug, Clone)]
pub struct HealthFeatureConfig {
    /// How long a status is reused before the database is pinged again.
    pub cache_ttl: Duration,
}

#[derive(Debug, Default)]
struct State {
    cache: RwLock<Option<CachedStatus>>,
}

#[derive(Debug)]
struct CachedStatus {
    status: HealthStatus,
    timestamp: DateTime<Utc>,
}

impl CachedStatus {
    fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now < self.timestamp + ttl
    }
}

impl<Time, Db> HealthFeatureService for HealthFeatureServiceImpl<Time, Db>
where
    Time: TimeService,
    Db: Database,
{
    async fn get_status(&self) -> HealthStatus {
        let now = self.time.now();
        let ttl = self.config.cache_ttl;

        let cache_guard = self.state.cache.read().await;
        if let Some(cached) = cache_guard.as_ref().filter(|c| c.is_fresh(now, ttl)) {
            return cached.status;
        }
        drop(cache_guard);

        let mut cache_guard = self.state.cache.write().await;
        if let Some(cached) = cache_guard.as_ref().filter(|c| c.is_fresh(now, ttl)) {
            return cached.status;
        }

        let database = self
            .db
            .ping()
            .await
            .inspect_err(|err| error!("Failed to ping database: {err:#}"))
            .is_ok();

        let status = HealthStatus { database };

        cache_guard
            .insert(CachedStatus {
                status,
                timestamp: now,
            })
            .status
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;
    use folio_persistence_contracts::MockDatabase;
    use folio_shared_contracts::time::MockTimeService;

    use super::*;

    const TTL: Duration = Duration::from_secs(10);

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(1729166400 + secs, 0).unwrap()
    }

    fn sut(
        time: MockTimeService,
        db: MockDatabase,
    ) -> HealthFeatureServiceImpl<MockTimeService, MockDatabase> {
        HealthFeatureServiceImpl {
            time,
            db,
            config: HealthFeatureConfig { cache_ttl: TTL },
            state: Default::default(),
        }
    }

    fn clock(times: Vec<DateTime<Utc>>) -> MockTimeService {
        let mut time = MockTimeService::new();
        let cnt = times.len();
        let mut times = times.into_iter();
        time.expect_now()
            .times(cnt)
            .returning(move || times.next().unwrap());
        time
    }

    #[tokio::test]
    async fn healthy() {
        // Arrange
        let time = MockTimeService::new().with_now(at(0));
        let db = MockDatabase::new().with_ping(Ok(()));
        let sut = sut(time, db);

        // Act
        let result = sut.get_status().await;

        // Assert
        assert_eq!(result, HealthStatus { database: true });
        assert!(result.is_healthy());
    }

    #[tokio::test]
    async fn database_unreachable() {
        // Arrange
        let time = MockTimeService::new().with_now(at(0));
        let db = MockDatabase::new().with_ping(Err(anyhow!("connection refused")));
        let sut = sut(time, db);

        // Act
        let result = sut.get_status().await;

        // Assert
        assert_eq!(result, HealthStatus { database: false });
        assert!(!result.is_healthy());
    }

    #[tokio::test]
    async fn cached_within_ttl() {
        // Arrange
        let time = clock(vec![at(0), at(9)]);
        let db = MockDatabase::new().with_ping(Ok(()));
        let sut = sut(time, db);

        // Act
        let first = sut.get_status().await;
        let second = sut.get_status().await;

        // Assert
        assert_eq!(first, HealthStatus { database: true });
        assert_eq!(second, first);
    }

    #[tokio::test]
    async fn refreshed_after_ttl() {
        // Arrange
        let time = clock(vec![at(0), at(10)]);

        let mut db = MockDatabase::new();
        let mut results = vec![Ok(()), Err(anyhow!("connection refused"))].into_iter();
        db.expect_ping()
            .times(2)
            .returning(move || Box::pin(std::future::ready(results.next().unwrap())));

        let sut = sut(time, db);

        // Act
        let first = sut.get_status().await;
        let second = sut.get_status().await;

        // Assert
        assert_eq!(first, HealthStatus { database: true });
        assert_eq!(second, HealthStatus { database: false });
    }
}
