use clap::Subcommand;
use timelines_core::source::{DatabaseConnection, HostedBackend};
use timelines_core::{Config, DataSourceConfig, DataSourceKind, SourceConnector};

use super::runtime;

#[derive(Subcommand)]
pub enum SourceAction {
    /// Show the configured data source
    Show,
    /// Run a connection test against the configured source
    Test,
    /// Use the built-in sample events only
    SetLocal,
    /// Use a MySQL, PostgreSQL or MongoDB source
    SetDb {
        /// mysql, postgresql or mongodb
        #[arg(long, value_parser = parse_database_kind)]
        kind: DataSourceKind,
        #[arg(long)]
        host: String,
        /// Port (default: the kind's standard port)
        #[arg(long)]
        port: Option<u16>,
        #[arg(long)]
        database: String,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        password: Option<String>,
        /// Table to read (repeatable, default: timeline_events)
        #[arg(long = "table")]
        tables: Vec<String>,
    },
    /// Use a REST endpoint
    SetRest {
        #[arg(long)]
        endpoint: String,
    },
    /// Use a Supabase project
    SetSupabase {
        #[arg(long)]
        endpoint: String,
        #[arg(long)]
        api_key: String,
        /// Table to read (repeatable, default: timeline_events)
        #[arg(long = "table")]
        tables: Vec<String>,
    },
}

fn parse_database_kind(value: &str) -> Result<DataSourceKind, String> {
    DataSourceKind::ALL
        .into_iter()
        .filter(DataSourceKind::is_database)
        .find(|kind| kind.as_str().eq_ignore_ascii_case(value))
        .ok_or_else(|| format!("'{value}' is not one of mysql, postgresql, mongodb"))
}

pub fn run(action: SourceAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        SourceAction::Show => {
            let config = Config::load()?;
            println!("{} ({})", config.source.kind().display_name(), config.source.describe());
            match config.source_status.last_test() {
                Some(test) => {
                    let status = if test.success { "ok" } else { "failed" };
                    println!("last test: {status} ({})", test.message);
                }
                None => println!("last test: none"),
            }
        }
        SourceAction::Test => {
            let mut config = Config::load()?;
            let connector = SourceConnector::simulated(&config.simulation);
            let test = runtime()?.block_on(connector.test_connection(&config.source));
            config.record_connection_test(&test);
            config.save()?;
            if !test.success {
                return Err(format!("connection test failed: {}", test.message).into());
            }
            println!("ok: {}", test.message);
        }
        SourceAction::SetLocal => save_source(DataSourceConfig::Local)?,
        SourceAction::SetDb {
            kind,
            host,
            port,
            database,
            username,
            password,
            tables,
        } => {
            let port = port.or(kind.default_port()).unwrap_or_default();
            let connection = DatabaseConnection {
                username,
                password,
                table_names: tables,
                ..DatabaseConnection::new(host, port, database)
            };
            let source = DataSourceConfig::database(kind, connection)
                .ok_or_else(|| format!("{kind} is not a database source"))?;
            save_source(source)?;
        }
        SourceAction::SetRest { endpoint } => save_source(DataSourceConfig::rest(endpoint))?,
        SourceAction::SetSupabase {
            endpoint,
            api_key,
            tables,
        } => save_source(DataSourceConfig::Supabase(HostedBackend {
            endpoint: Some(endpoint),
            api_key: Some(api_key),
            table_names: tables,
        }))?,
    }
    Ok(())
}

fn save_source(source: DataSourceConfig) -> Result<(), Box<dyn std::error::Error>> {
    source.validate()?;
    let mut config = Config::load()?;
    config.set_source(source);
    config.save()?;
    println!("source set to {}", config.source.describe());
    Ok(())
}
