pub mod config;
pub mod events;
pub mod source;
pub mod view;

use chrono::{Local, NaiveDate};

/// `date` or today.
pub fn center_or_today(date: Option<NaiveDate>) -> NaiveDate {
    date.unwrap_or_else(|| Local::now().date_naive())
}

/// Runtime for the async source operations.
pub fn runtime() -> std::io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
}
