//! Simulated remote sources.
//!
//! No network traffic happens here. Connection tests sleep for a while and
//! succeed with a configured probability; fetches sleep and return copies
//! of the sample events re-labelled for the source, with randomized dates.

use std::sync::Mutex;
use std::time::Duration;

use chrono::{Datelike, Local, NaiveDate};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};

use super::backend::EventBackend;
use super::config::{
    database_source_prefix, endpoint_url, ConnectionTest, DataSourceConfig, DataSourceKind,
    DatabaseConnection, HostedBackend, RestEndpoint,
};
use super::sample::sample_events;
use crate::error::SourceError;
use crate::event::TimelineEvent;

/// Latency and reliability of the simulated sources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_local_delay")]
    pub local_delay_ms: u64,
    #[serde(default = "default_database_test_delay")]
    pub database_test_delay_ms: u64,
    #[serde(default = "default_hosted_test_delay")]
    pub hosted_test_delay_ms: u64,
    #[serde(default = "default_rest_test_delay")]
    pub rest_test_delay_ms: u64,
    #[serde(default = "default_database_fetch_delay")]
    pub database_fetch_delay_ms: u64,
    #[serde(default = "default_remote_fetch_delay")]
    pub hosted_fetch_delay_ms: u64,
    #[serde(default = "default_remote_fetch_delay")]
    pub rest_fetch_delay_ms: u64,
    #[serde(default = "default_database_success_rate")]
    pub database_success_rate: f64,
    #[serde(default = "default_hosted_success_rate")]
    pub hosted_success_rate: f64,
    #[serde(default = "default_rest_success_rate")]
    pub rest_success_rate: f64,
    /// Fixed RNG seed; entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_local_delay() -> u64 {
    500
}
fn default_database_test_delay() -> u64 {
    1000
}
fn default_hosted_test_delay() -> u64 {
    800
}
fn default_rest_test_delay() -> u64 {
    1200
}
fn default_database_fetch_delay() -> u64 {
    800
}
fn default_remote_fetch_delay() -> u64 {
    1000
}
fn default_database_success_rate() -> f64 {
    0.8
}
fn default_hosted_success_rate() -> f64 {
    0.9
}
fn default_rest_success_rate() -> f64 {
    0.85
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            local_delay_ms: default_local_delay(),
            database_test_delay_ms: default_database_test_delay(),
            hosted_test_delay_ms: default_hosted_test_delay(),
            rest_test_delay_ms: default_rest_test_delay(),
            database_fetch_delay_ms: default_database_fetch_delay(),
            hosted_fetch_delay_ms: default_remote_fetch_delay(),
            rest_fetch_delay_ms: default_remote_fetch_delay(),
            database_success_rate: default_database_success_rate(),
            hosted_success_rate: default_hosted_success_rate(),
            rest_success_rate: default_rest_success_rate(),
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// No delays; default success rates.
    pub fn instant() -> Self {
        Self {
            local_delay_ms: 0,
            database_test_delay_ms: 0,
            hosted_test_delay_ms: 0,
            rest_test_delay_ms: 0,
            database_fetch_delay_ms: 0,
            hosted_fetch_delay_ms: 0,
            rest_fetch_delay_ms: 0,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Force every connection test to succeed (`1.0`) or fail (`0.0`).
    pub fn with_success_rate(mut self, rate: f64) -> Self {
        let rate = rate.clamp(0.0, 1.0);
        self.database_success_rate = rate;
        self.hosted_success_rate = rate;
        self.rest_success_rate = rate;
        self
    }

    pub fn local_delay(&self) -> Duration {
        Duration::from_millis(self.local_delay_ms)
    }
}

/// [`EventBackend`] that fakes remote sources from the sample events.
pub struct SimulatedBackend {
    config: SimulationConfig,
    templates: Vec<TimelineEvent>,
    today: NaiveDate,
    rng: Mutex<Pcg64>,
}

impl SimulatedBackend {
    pub fn new(config: SimulationConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => Pcg64::seed_from_u64(seed),
            None => Pcg64::from_entropy(),
        };
        Self {
            config,
            templates: sample_events(),
            today: Local::now().date_naive(),
            rng: Mutex::new(rng),
        }
    }

    /// Anchor randomized dates to `today` instead of the wall clock.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut Pcg64) -> T) -> T {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut *rng)
    }

    fn roll(&self, success_rate: f64) -> bool {
        self.with_rng(|rng| rng.gen::<f64>() < success_rate)
    }

    fn pick_failure(&self, messages: Vec<String>) -> String {
        self.with_rng(|rng| messages.choose(rng).cloned())
            .unwrap_or_else(|| "Connection timed out".to_string())
    }

    /// Random date within the last `years_back` years of `today`, on days
    /// 1..=28 so every month is valid.
    fn random_recent_date(&self, years_back: i32) -> NaiveDate {
        let (offset, month, day) = self.with_rng(|rng| {
            (rng.gen_range(0..years_back), rng.gen_range(1..=12), rng.gen_range(1..=28))
        });
        NaiveDate::from_ymd_opt(self.today.year() - offset, month, day).unwrap_or(self.today)
    }

    fn nonce(&self) -> String {
        let bytes: [u8; 16] = self.with_rng(|rng| rng.gen());
        uuid::Builder::from_random_bytes(bytes)
            .into_uuid()
            .simple()
            .to_string()
    }

    /// Up to `count` templates starting at `start`, wrapping the start only.
    fn templates_from(&self, start: usize, count: usize) -> &[TimelineEvent] {
        let len = self.templates.len();
        if len == 0 {
            return &[];
        }
        let start = start % len;
        &self.templates[start..(start + count).min(len)]
    }

    async fn test_database(&self, kind: DataSourceKind, c: &DatabaseConnection) -> ConnectionTest {
        let name = kind.display_name();
        sleep_ms(self.config.database_test_delay_ms).await;
        if self.roll(self.config.database_success_rate) {
            let host = c.host.as_deref().unwrap_or_default();
            let port = c.port.unwrap_or_default();
            let database = c.database.as_deref().unwrap_or_default();
            ConnectionTest::succeeded(format!(
                "Connected to {name} database {host}:{port}/{database}"
            ))
        } else {
            let database = c.database.clone().unwrap_or_default();
            ConnectionTest::failed(self.pick_failure(vec![
                format!("Unable to reach {name} server"),
                format!("{name} authentication failed"),
                format!("Database '{database}' does not exist"),
                "Connection timed out".to_string(),
            ]))
        }
    }

    async fn test_hosted(&self, h: &HostedBackend) -> ConnectionTest {
        sleep_ms(self.config.hosted_test_delay_ms).await;
        if self.roll(self.config.hosted_success_rate) {
            let endpoint = h.endpoint.as_deref().unwrap_or_default();
            ConnectionTest::succeeded(format!("Connected to Supabase project {endpoint}"))
        } else {
            ConnectionTest::failed(self.pick_failure(vec![
                "Invalid Supabase API key".to_string(),
                "Supabase project does not exist or is unreachable".to_string(),
                "Connection timed out".to_string(),
            ]))
        }
    }

    async fn test_rest(&self, r: &RestEndpoint) -> ConnectionTest {
        sleep_ms(self.config.rest_test_delay_ms).await;
        if self.roll(self.config.rest_success_rate) {
            let endpoint = r.endpoint.as_deref().unwrap_or_default();
            ConnectionTest::succeeded(format!("Connected to REST API {endpoint}"))
        } else {
            ConnectionTest::failed(self.pick_failure(vec![
                "API server not responding".to_string(),
                "API path does not exist".to_string(),
                "Unauthorized API access".to_string(),
                "Connection timed out".to_string(),
            ]))
        }
    }

    fn database_events(&self, kind: DataSourceKind, c: &DatabaseConnection) -> Vec<TimelineEvent> {
        let prefix = database_source_prefix(kind, c);
        let label = kind.as_str().to_uppercase();
        let mut events = Vec::new();
        for (t, table) in c.tables().iter().enumerate() {
            let source = format!("{prefix}/{table}");
            for (i, template) in self.templates_from(t * 3, 3).iter().enumerate() {
                events.push(self.derive(
                    template,
                    format!("{kind}-{table}-{i}-{}", self.nonce()),
                    format!("{label} {table} - {}", template.title),
                    format!("Event from {kind} table {table}: {}", template.description),
                    10,
                    &source,
                ));
            }
        }
        events
    }

    fn hosted_events(&self, h: &HostedBackend) -> Result<Vec<TimelineEvent>, SourceError> {
        let kind = DataSourceKind::Supabase;
        let endpoint = h
            .endpoint
            .as_deref()
            .filter(|e| !e.trim().is_empty())
            .ok_or(SourceError::MissingParameter { kind, parameter: "endpoint" })?;
        if h.api_key.as_deref().map_or(true, |k| k.trim().is_empty()) {
            return Err(SourceError::MissingParameter { kind, parameter: "api_key" });
        }
        let url = endpoint_url(endpoint)?;
        let project = format!(
            "{}{}",
            url.host_str().unwrap_or_default(),
            url.path().trim_end_matches('/')
        );

        let mut events = Vec::new();
        for (t, table) in h.tables().iter().enumerate() {
            let source = format!("supabase://{project}/{table}");
            for (i, template) in self.templates_from(t * 3 + 2, 3).iter().enumerate() {
                events.push(self.derive(
                    template,
                    format!("supabase-{table}-{i}-{}", self.nonce()),
                    format!("Supabase {table} - {}", template.title),
                    format!("Event from Supabase table {table}: {}", template.description),
                    10,
                    &source,
                ));
            }
        }
        Ok(events)
    }

    fn rest_events(&self, r: &RestEndpoint) -> Result<Vec<TimelineEvent>, SourceError> {
        let endpoint = r
            .endpoint
            .as_deref()
            .filter(|e| !e.trim().is_empty())
            .ok_or(SourceError::MissingParameter {
                kind: DataSourceKind::Rest,
                parameter: "endpoint",
            })?;
        let url = endpoint_url(endpoint)?;
        let source = format!("rest://{}/events", url.as_str().trim_end_matches('/'));

        Ok(self
            .templates_from(5, 5)
            .iter()
            .enumerate()
            .map(|(i, template)| {
                self.derive(
                    template,
                    format!("rest-api-{i}-{}", self.nonce()),
                    format!("API - {}", template.title),
                    format!("Event from REST API: {}", template.description),
                    5,
                    &source,
                )
            })
            .collect())
    }

    /// Copy of `template` re-labelled for a remote source. The end date is
    /// dropped because the start date is re-rolled.
    fn derive(
        &self,
        template: &TimelineEvent,
        id: String,
        title: String,
        description: String,
        years_back: i32,
        source: &str,
    ) -> TimelineEvent {
        let mut event = template.clone();
        event.id = id;
        event.title = title;
        event.description = description;
        event.start_date = self.random_recent_date(years_back);
        event.end_date = None;
        event.source = Some(source.to_string());
        event
    }
}

impl EventBackend for SimulatedBackend {
    async fn test_connection(&self, config: &DataSourceConfig) -> ConnectionTest {
        if let Err(e) = config.validate() {
            return ConnectionTest::failed(e.to_string());
        }
        match config {
            DataSourceConfig::Local => {
                ConnectionTest::succeeded("Local source needs no connection test")
            }
            DataSourceConfig::MySql(c)
            | DataSourceConfig::PostgreSql(c)
            | DataSourceConfig::MongoDb(c) => self.test_database(config.kind(), c).await,
            DataSourceConfig::Supabase(h) => self.test_hosted(h).await,
            DataSourceConfig::Rest(r) => self.test_rest(r).await,
        }
    }

    async fn fetch_remote(
        &self,
        config: &DataSourceConfig,
    ) -> Result<Vec<TimelineEvent>, SourceError> {
        match config {
            DataSourceConfig::Local => Ok(Vec::new()),
            DataSourceConfig::MySql(c)
            | DataSourceConfig::PostgreSql(c)
            | DataSourceConfig::MongoDb(c) => {
                tracing::debug!(kind = %config.kind(), tables = ?c.tables(), "fetching from database");
                sleep_ms(self.config.database_fetch_delay_ms).await;
                Ok(self.database_events(config.kind(), c))
            }
            DataSourceConfig::Supabase(h) => {
                let events = self.hosted_events(h)?;
                sleep_ms(self.config.hosted_fetch_delay_ms).await;
                Ok(events)
            }
            DataSourceConfig::Rest(r) => {
                let events = self.rest_events(r)?;
                sleep_ms(self.config.rest_fetch_delay_ms).await;
                Ok(events)
            }
        }
    }
}

async fn sleep_ms(ms: u64) {
    if ms > 0 {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
}
