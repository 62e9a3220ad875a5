//! Data source selection.
//!
//! Each source kind is its own variant and carries only the fields that
//! kind uses.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::SourceError;

/// Table read when a database source names none.
pub const DEFAULT_TABLE: &str = "timeline_events";

/// Discriminator of [`DataSourceConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSourceKind {
    Local,
    MySql,
    PostgreSql,
    MongoDb,
    Rest,
    Supabase,
}

impl DataSourceKind {
    pub const ALL: [DataSourceKind; 6] = [
        Self::Local,
        Self::MySql,
        Self::PostgreSql,
        Self::MongoDb,
        Self::Rest,
        Self::Supabase,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::MySql => "mysql",
            Self::PostgreSql => "postgresql",
            Self::MongoDb => "mongodb",
            Self::Rest => "rest",
            Self::Supabase => "supabase",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Local => "Local",
            Self::MySql => "MySQL",
            Self::PostgreSql => "PostgreSQL",
            Self::MongoDb => "MongoDB",
            Self::Rest => "REST API",
            Self::Supabase => "Supabase",
        }
    }

    /// Port suggested for the kind. Supabase sits on PostgreSQL.
    pub fn default_port(&self) -> Option<u16> {
        match self {
            Self::MySql => Some(3306),
            Self::PostgreSql | Self::Supabase => Some(5432),
            Self::MongoDb => Some(27017),
            Self::Local | Self::Rest => None,
        }
    }

    pub fn is_database(&self) -> bool {
        matches!(self, Self::MySql | Self::PostgreSql | Self::MongoDb)
    }
}

impl fmt::Display for DataSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Connection parameters of a MySQL / PostgreSQL / MongoDB source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConnection {
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub database: Option<String>,
    #[serde(default)]
    pub table_names: Vec<String>,
}

impl DatabaseConnection {
    pub fn new(host: impl Into<String>, port: u16, database: impl Into<String>) -> Self {
        Self {
            host: Some(host.into()),
            port: Some(port),
            database: Some(database.into()),
            ..Self::default()
        }
    }

    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table_names.push(table.into());
        self
    }

    /// Configured tables, or [`DEFAULT_TABLE`].
    pub fn tables(&self) -> Vec<String> {
        tables_or_default(&self.table_names)
    }
}

/// A REST endpoint serving events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestEndpoint {
    #[serde(default)]
    pub endpoint: Option<String>,
}

/// A hosted backend project (Supabase).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostedBackend {
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub table_names: Vec<String>,
}

impl HostedBackend {
    pub fn tables(&self) -> Vec<String> {
        tables_or_default(&self.table_names)
    }
}

/// Where events come from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DataSourceConfig {
    #[default]
    Local,
    MySql(DatabaseConnection),
    PostgreSql(DatabaseConnection),
    MongoDb(DatabaseConnection),
    Rest(RestEndpoint),
    Supabase(HostedBackend),
}

impl DataSourceConfig {
    /// Database source of `kind` with `connection`, or `None` when `kind`
    /// is not a database kind.
    pub fn database(kind: DataSourceKind, connection: DatabaseConnection) -> Option<Self> {
        match kind {
            DataSourceKind::MySql => Some(Self::MySql(connection)),
            DataSourceKind::PostgreSql => Some(Self::PostgreSql(connection)),
            DataSourceKind::MongoDb => Some(Self::MongoDb(connection)),
            _ => None,
        }
    }

    pub fn rest(endpoint: impl Into<String>) -> Self {
        Self::Rest(RestEndpoint {
            endpoint: Some(endpoint.into()),
        })
    }

    pub fn supabase(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::Supabase(HostedBackend {
            endpoint: Some(endpoint.into()),
            api_key: Some(api_key.into()),
            table_names: Vec::new(),
        })
    }

    pub fn kind(&self) -> DataSourceKind {
        match self {
            Self::Local => DataSourceKind::Local,
            Self::MySql(_) => DataSourceKind::MySql,
            Self::PostgreSql(_) => DataSourceKind::PostgreSql,
            Self::MongoDb(_) => DataSourceKind::MongoDb,
            Self::Rest(_) => DataSourceKind::Rest,
            Self::Supabase(_) => DataSourceKind::Supabase,
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, Self::Local)
    }

    pub fn database_connection(&self) -> Option<&DatabaseConnection> {
        match self {
            Self::MySql(c) | Self::PostgreSql(c) | Self::MongoDb(c) => Some(c),
            _ => None,
        }
    }

    /// Check that every parameter the kind needs is present and non-empty.
    ///
    /// # Errors
    /// Returns [`SourceError::MissingParameter`] naming the first gap, or
    /// [`SourceError::InvalidEndpoint`] when an endpoint cannot be parsed.
    pub fn validate(&self) -> Result<(), SourceError> {
        let kind = self.kind();
        match self {
            Self::Local => Ok(()),
            Self::MySql(c) | Self::PostgreSql(c) | Self::MongoDb(c) => {
                require(kind, "host", c.host.as_deref())?;
                if c.port.is_none() {
                    return Err(SourceError::MissingParameter { kind, parameter: "port" });
                }
                require(kind, "database", c.database.as_deref())?;
                Ok(())
            }
            Self::Rest(r) => {
                let endpoint = require(kind, "endpoint", r.endpoint.as_deref())?;
                endpoint_url(endpoint).map(|_| ())
            }
            Self::Supabase(h) => {
                let endpoint = require(kind, "endpoint", h.endpoint.as_deref())?;
                require(kind, "api_key", h.api_key.as_deref())?;
                endpoint_url(endpoint).map(|_| ())
            }
        }
    }

    /// Human-readable location of the source, without credentials.
    pub fn describe(&self) -> String {
        match self {
            Self::Local => "local sample events".to_string(),
            Self::MySql(c) | Self::PostgreSql(c) | Self::MongoDb(c) => {
                database_source_prefix(self.kind(), c)
            }
            Self::Rest(r) => format!("rest {}", r.endpoint.as_deref().unwrap_or("<no endpoint>")),
            Self::Supabase(h) => {
                format!("supabase {}", h.endpoint.as_deref().unwrap_or("<no endpoint>"))
            }
        }
    }
}

/// `"{kind}://{host}:{port}[/{database}]"`, defaulting host and port.
pub(crate) fn database_source_prefix(kind: DataSourceKind, c: &DatabaseConnection) -> String {
    let host = c.host.as_deref().filter(|h| !h.is_empty()).unwrap_or("localhost");
    let port = c.port.or(kind.default_port()).unwrap_or_default();
    match c.database.as_deref().filter(|d| !d.is_empty()) {
        Some(db) => format!("{kind}://{host}:{port}/{db}"),
        None => format!("{kind}://{host}:{port}"),
    }
}

/// Parse an endpoint, assuming `https://` when no scheme is given.
///
/// # Errors
/// Returns [`SourceError::InvalidEndpoint`] if the result is not a URL.
pub fn endpoint_url(endpoint: &str) -> Result<Url, SourceError> {
    let trimmed = endpoint.trim();
    let candidate = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };
    Url::parse(&candidate).map_err(|e| SourceError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        message: e.to_string(),
    })
}

fn require<'a>(
    kind: DataSourceKind,
    parameter: &'static str,
    value: Option<&'a str>,
) -> Result<&'a str, SourceError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(SourceError::MissingParameter { kind, parameter })
}

fn tables_or_default(tables: &[String]) -> Vec<String> {
    if tables.is_empty() {
        vec![DEFAULT_TABLE.to_string()]
    } else {
        tables.to_vec()
    }
}

/// Outcome of an advisory connection test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionTest {
    pub success: bool,
    pub message: String,
}

impl ConnectionTest {
    pub fn succeeded(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// What is known about the selected source's connectivity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    #[default]
    Untested,
    Succeeded,
    Failed,
}

impl From<&ConnectionTest> for ConnectionState {
    fn from(test: &ConnectionTest) -> Self {
        if test.success {
            Self::Succeeded
        } else {
            Self::Failed
        }
    }
}
