//! Tests for the source connector, using a scripted backend.

#[cfg(test)]
mod tests {
    use super::super::connector::*;
    use crate::error::SourceError;
    use crate::event::{EventPriority, TimelineEvent};
    use crate::source::{
        ConnectionState, ConnectionTest, DataSourceConfig, DataSourceKind, DatabaseConnection,
        EventBackend, LocalStore, LOCAL_SOURCE,
    };
    use crate::timeline::EventFilter;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct ScriptedBackend {
        remote: Result<Vec<TimelineEvent>, SourceError>,
        tests: AtomicUsize,
        fetches: AtomicUsize,
    }

    impl ScriptedBackend {
        fn returning(remote: Result<Vec<TimelineEvent>, SourceError>) -> Self {
            Self {
                remote,
                tests: AtomicUsize::new(0),
                fetches: AtomicUsize::new(0),
            }
        }
    }

    impl EventBackend for ScriptedBackend {
        async fn test_connection(&self, _config: &DataSourceConfig) -> ConnectionTest {
            self.tests.fetch_add(1, Ordering::SeqCst);
            ConnectionTest::succeeded("ok")
        }

        async fn fetch_remote(
            &self,
            _config: &DataSourceConfig,
        ) -> Result<Vec<TimelineEvent>, SourceError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            self.remote.clone()
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event(id: &str, title: &str, start: NaiveDate) -> TimelineEvent {
        TimelineEvent::new(id, title, "", start, EventPriority::P5)
    }

    fn local_store() -> LocalStore {
        LocalStore::new(
            vec![
                event("L1", "Moon landing", date(1969, 7, 20)),
                event("L2", "Berlin Wall falls", date(1989, 11, 9)),
            ],
            Duration::ZERO,
        )
    }

    fn remote_event() -> TimelineEvent {
        event("R1", "Remote moon event", date(2020, 5, 1)).with_source("mysql://db:3306/hist/timeline_events")
    }

    fn mysql() -> DataSourceConfig {
        DataSourceConfig::MySql(DatabaseConnection::new("db", 3306, "hist"))
    }

    #[tokio::test]
    async fn local_source_skips_backend() {
        let connector = SourceConnector::new(local_store(), ScriptedBackend::returning(Ok(vec![remote_event()])));

        let test = connector.test_connection(&DataSourceConfig::Local).await;
        assert!(test.success);
        let events = connector
            .fetch_events(&DataSourceConfig::Local, ConnectionState::Untested, None)
            .await
            .unwrap();

        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| e.source.as_deref() == Some(LOCAL_SOURCE)));
        assert_eq!(connector.backend().tests.load(Ordering::SeqCst), 0);
        assert_eq!(connector.backend().fetches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn remote_events_follow_local_ones() {
        let connector = SourceConnector::new(local_store(), ScriptedBackend::returning(Ok(vec![remote_event()])));

        let events = connector
            .fetch_events(&mysql(), ConnectionState::Succeeded, None)
            .await
            .unwrap();

        let ids: Vec<_> = events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["L1", "L2", "R1"]);
    }

    #[tokio::test]
    async fn untested_source_is_still_fetched() {
        let connector = SourceConnector::new(local_store(), ScriptedBackend::returning(Ok(vec![remote_event()])));
        let events = connector
            .fetch_events(&mysql(), ConnectionState::Untested, None)
            .await
            .unwrap();
        assert_eq!(events.len(), 3);
    }

    #[tokio::test]
    async fn failed_test_suppresses_remote_fetch() {
        let connector = SourceConnector::new(local_store(), ScriptedBackend::returning(Ok(vec![remote_event()])));

        let events = connector
            .fetch_events(&mysql(), ConnectionState::Failed, None)
            .await
            .unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(connector.backend().fetches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn filter_applies_to_merged_list() {
        let connector = SourceConnector::new(local_store(), ScriptedBackend::returning(Ok(vec![remote_event()])));
        let filter = EventFilter::new().with_search("moon");

        let events = connector
            .fetch_events(&mysql(), ConnectionState::Succeeded, Some(&filter))
            .await
            .unwrap();

        let ids: Vec<_> = events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["L1", "R1"]);
    }

    #[tokio::test]
    async fn backend_errors_become_fetch_failures() {
        let missing = SourceError::MissingParameter {
            kind: DataSourceKind::Rest,
            parameter: "endpoint",
        };
        let connector = SourceConnector::new(local_store(), ScriptedBackend::returning(Err(missing.clone())));

        let err = connector
            .fetch_events(&DataSourceConfig::rest(""), ConnectionState::Untested, None)
            .await
            .unwrap_err();

        assert_eq!(
            err,
            SourceError::FetchFailed {
                kind: DataSourceKind::Rest,
                reason: missing.to_string(),
            }
        );
    }

    #[tokio::test]
    async fn remote_test_delegates_to_backend() {
        let connector = SourceConnector::new(local_store(), ScriptedBackend::returning(Ok(Vec::new())));
        assert!(connector.test_connection(&mysql()).await.success);
        assert_eq!(connector.backend().tests.load(Ordering::SeqCst), 1);
    }
}
