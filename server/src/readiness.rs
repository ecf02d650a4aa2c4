//! Readiness check: is storage reachable and is the environment configured?
//!
//! The check runs once at startup and, optionally, on a fixed interval in a
//! background task. It never changes state, so running it again is harmless.

use chrono::{DateTime, Utc};
use eventmaker_core::StoreHealth;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Outcome of one readiness check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadinessReport {
    /// Store answered a ping
    pub database: bool,
    /// `DATABASE_URL` and `AUTH_SECRET` were provided
    pub environment: bool,
    /// Both of the above
    pub ready: bool,
    /// Registered users, when the store could count them
    pub users: Option<i64>,
    /// When the check ran
    pub checked_at: DateTime<Utc>,
}

/// Runs readiness checks against a store.
pub struct ReadinessChecker {
    store: Arc<dyn StoreHealth>,
    environment: bool,
}

impl ReadinessChecker {
    /// Create a checker. `environment` is whether required configuration was
    /// provided.
    #[must_use]
    pub fn new(store: Arc<dyn StoreHealth>, environment: bool) -> Self {
        Self { store, environment }
    }

    /// Run the check and log the result.
    pub async fn check(&self) -> ReadinessReport {
        let database = match self.store.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Database is not reachable");
                false
            }
        };

        let users = if database {
            match self.store.count_users().await {
                Ok(count) => Some(count),
                Err(e) => {
                    tracing::warn!(error = %e, "Could not count users");
                    None
                }
            }
        } else {
            None
        };

        if !self.environment {
            tracing::warn!("DATABASE_URL or AUTH_SECRET is not set");
        }

        let ready = database && self.environment;
        metrics::gauge!("readiness.ready").set(if ready { 1.0 } else { 0.0 });

        if ready {
            tracing::info!(users = ?users, "System ready");
        } else {
            tracing::warn!(database, environment = self.environment, "System not ready");
        }
        if users == Some(0) {
            tracing::info!("No users registered yet; sign in once to create the first account");
        }

        ReadinessReport {
            database,
            environment: self.environment,
            ready,
            users,
            checked_at: Utc::now(),
        }
    }

    /// Re-run the check every `every` until the task is aborted.
    pub fn spawn_periodic(self: Arc<Self>, every: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            // The startup check already covered the first tick.
            interval.tick().await;
            loop {
                interval.tick().await;
                self.check().await;
            }
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;
    use eventmaker_testing::InMemoryEventRepository;

    #[tokio::test]
    async fn test_ready_with_store_and_environment() {
        let repo = Arc::new(InMemoryEventRepository::new());
        repo.seed_user("host@example.com", None);
        let checker = ReadinessChecker::new(repo, true);

        let report = checker.check().await;

        assert!(report.database);
        assert!(report.environment);
        assert!(report.ready);
        assert_eq!(report.users, Some(1));
    }

    #[tokio::test]
    async fn test_missing_environment_is_not_ready() {
        let checker = ReadinessChecker::new(Arc::new(InMemoryEventRepository::new()), false);

        let report = checker.check().await;

        assert!(report.database);
        assert!(!report.ready);
        assert_eq!(report.users, Some(0));
    }

    #[tokio::test]
    async fn test_unreachable_store_is_not_ready() {
        let repo = Arc::new(InMemoryEventRepository::new());
        repo.set_unavailable(true);
        let checker = ReadinessChecker::new(repo, true);

        let report = checker.check().await;

        assert!(!report.database);
        assert!(!report.ready);
        assert!(report.users.is_none());
    }

    #[tokio::test]
    async fn test_check_is_repeatable() {
        let repo = Arc::new(InMemoryEventRepository::new());
        let checker = ReadinessChecker::new(repo.clone(), true);

        let first = checker.check().await;
        let second = checker.check().await;

        assert_eq!(first.ready, second.ready);
        assert_eq!(first.users, second.users);
        assert_eq!(repo.user_count(), 0);
    }

    #[tokio::test]
    async fn test_periodic_task_can_be_aborted() {
        let checker = Arc::new(ReadinessChecker::new(
            Arc::new(InMemoryEventRepository::new()),
            true,
        ));

        let handle = checker.spawn_periodic(Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(30)).await;
        handle.abort();

        assert!(handle.await.unwrap_err().is_cancelled());
    }
}
