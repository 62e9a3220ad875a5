use chrono::NaiveDate;
use clap::Args;
use timelines_core::{
    Config, EventFilter, EventPriority, Scale, SourceConnector, TimelineController,
    TimelineEvent, TimelineState,
};

use super::{center_or_today, runtime};

#[derive(Args)]
pub struct EventsArgs {
    /// Center date, YYYY-MM-DD (default: today)
    #[arg(long)]
    center: Option<NaiveDate>,
    /// Zoom scale (default: view.default_scale from config)
    #[arg(long)]
    scale: Option<Scale>,
    /// List every loaded event, not only the visible ones
    #[arg(long)]
    all: bool,
    /// Case-insensitive text in title, description, location or tags
    #[arg(long)]
    search: Option<String>,
    /// Keep events with this tag (repeatable)
    #[arg(long = "tag")]
    tags: Vec<String>,
    /// Keep events with this priority, e.g. P0 (repeatable)
    #[arg(long = "priority")]
    priorities: Vec<EventPriority>,
    /// Keep events whose source starts with this prefix (repeatable)
    #[arg(long = "source")]
    sources: Vec<String>,
    /// Run a connection test before fetching and store its outcome
    #[arg(long)]
    test: bool,
    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

impl EventsArgs {
    fn filter(&self) -> Option<EventFilter> {
        let filter = EventFilter {
            search: self.search.clone(),
            tags: self.tags.clone(),
            priorities: self.priorities.clone(),
            sources: self.sources.clone(),
            ..EventFilter::default()
        };
        (!filter.is_empty()).then_some(filter)
    }
}

pub fn run(args: EventsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load_or_default();
    let scale = args.scale.unwrap_or(config.view.default_scale);
    let show_all = args.all || config.view.show_all_events;

    tracing::debug!(source = %config.source.describe(), %scale, "loading events");
    let connector = SourceConnector::simulated(&config.simulation);
    let mut controller =
        TimelineController::new(TimelineState::new(center_or_today(args.center), scale));
    controller.set_data_source(config.source.clone());
    if let Some(test) = config.source_status.last_test() {
        controller.record_connection_test(test);
    }
    controller.set_query(args.filter());

    let (tested, loaded) = runtime()?.block_on(async {
        let tested = if args.test {
            Some(controller.test_connection(&connector).await)
        } else {
            None
        };
        (tested, controller.reload(&connector).await)
    });

    if let Some(test) = tested {
        let status = if test.success { "ok" } else { "failed" };
        eprintln!("connection test {status}: {}", test.message);
        config.record_connection_test(&test);
        config.save()?;
    }
    loaded?;

    let events: Vec<&TimelineEvent> = if show_all {
        controller.events().iter().collect()
    } else {
        controller.visible_events()
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&events)?);
        return Ok(());
    }

    let range = controller.state().visible_range();
    if !show_all {
        println!("# {} .. {} ({scale})", range.start(), range.end());
    }
    for event in &events {
        println!(
            "{}  {}  {}  [{}]",
            event.start_date,
            event.priority,
            event.title,
            event.source.as_deref().unwrap_or_default()
        );
    }
    if events.is_empty() {
        println!("(no events)");
    }
    Ok(())
}
