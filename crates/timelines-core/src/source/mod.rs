//! Data sources: the local sample store, simulated remote backends, and
//! the connector that merges them.

mod backend;
mod config;
mod connector;
mod sample;
mod simulated;

pub use backend::EventBackend;
pub use config::{
    endpoint_url, ConnectionState, ConnectionTest, DataSourceConfig, DataSourceKind,
    DatabaseConnection, HostedBackend, RestEndpoint, DEFAULT_TABLE,
};
pub use connector::SourceConnector;
pub use sample::{sample_events, LocalStore, LOCAL_SOURCE};
pub use simulated::{SimulatedBackend, SimulationConfig};

#[cfg(test)]
mod connector_tests;
