use std::future::Future;

use super::config::{ConnectionTest, DataSourceConfig};
use crate::error::SourceError;
use crate::event::TimelineEvent;

/// A provider of remote events.
///
/// Implementations are stateless between calls from the caller's point of
/// view; everything they need comes from the [`DataSourceConfig`].
pub trait EventBackend: Send + Sync {
    /// Test the source. Invalid or missing parameters yield a failed
    /// test, never an error.
    fn test_connection(
        &self,
        config: &DataSourceConfig,
    ) -> impl Future<Output = ConnectionTest> + Send;

    /// Fetch the events held by the source. Local sources yield nothing.
    fn fetch_remote(
        &self,
        config: &DataSourceConfig,
    ) -> impl Future<Output = Result<Vec<TimelineEvent>, SourceError>> + Send;
}
