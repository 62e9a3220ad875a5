use super::backend::EventBackend;
use super::config::{ConnectionState, ConnectionTest, DataSourceConfig};
use super::sample::LocalStore;
use super::simulated::{SimulatedBackend, SimulationConfig};
use crate::error::SourceError;
use crate::event::TimelineEvent;
use crate::timeline::EventFilter;

/// Loads events for the selected data source.
///
/// Local events are always part of the result; remote events are appended
/// when the source is remote and its last connection test did not fail.
pub struct SourceConnector<B> {
    local: LocalStore,
    backend: B,
}

impl SourceConnector<SimulatedBackend> {
    /// Sample local events plus a [`SimulatedBackend`].
    pub fn simulated(config: &SimulationConfig) -> Self {
        Self::new(
            LocalStore::sample(config.local_delay()),
            SimulatedBackend::new(config.clone()),
        )
    }
}

impl<B: EventBackend> SourceConnector<B> {
    pub fn new(local: LocalStore, backend: B) -> Self {
        Self { local, backend }
    }

    pub fn local(&self) -> &LocalStore {
        &self.local
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub async fn test_connection(&self, config: &DataSourceConfig) -> ConnectionTest {
        if config.is_local() {
            return ConnectionTest::succeeded("Local source needs no connection test");
        }
        let result = self.backend.test_connection(config).await;
        tracing::info!(
            kind = %config.kind(),
            success = result.success,
            message = %result.message,
            "connection test finished"
        );
        result
    }

    /// Local events followed by remote ones, with `filter` applied to the
    /// merged list.
    ///
    /// # Errors
    /// Returns [`SourceError::FetchFailed`] when the remote fetch fails.
    pub async fn fetch_events(
        &self,
        config: &DataSourceConfig,
        connection: ConnectionState,
        filter: Option<&EventFilter>,
    ) -> Result<Vec<TimelineEvent>, SourceError> {
        let mut events = self.local.load(None).await;

        if config.is_local() {
            return Ok(apply(filter, events));
        }
        if connection == ConnectionState::Failed {
            tracing::warn!(
                kind = %config.kind(),
                "last connection test failed, serving local events only"
            );
            return Ok(apply(filter, events));
        }

        let kind = config.kind();
        let remote = self
            .backend
            .fetch_remote(config)
            .await
            .map_err(|e| match e {
                SourceError::FetchFailed { .. } => e,
                other => SourceError::FetchFailed {
                    kind,
                    reason: other.to_string(),
                },
            })?;
        tracing::info!(
            kind = %kind,
            local = events.len(),
            remote = remote.len(),
            "fetched events"
        );
        events.extend(remote);
        Ok(apply(filter, events))
    }
}

fn apply(filter: Option<&EventFilter>, events: Vec<TimelineEvent>) -> Vec<TimelineEvent> {
    match filter {
        Some(f) => f.apply(events),
        None => events,
    }
}
