use chrono::{Days, Local, Months, NaiveDate};
use serde::Serialize;

use super::input::{Direction, NavCommand, NavStep};
use crate::error::SourceError;
use crate::event::TimelineEvent;
use crate::scale::Scale;
use crate::source::{
    ConnectionState, ConnectionTest, DataSourceConfig, EventBackend, SourceConnector,
};
use crate::timeline::{
    filter_visible, generate_ticks, CenterMarker, EventFilter, Ruler, TickMarker, VisibleRange,
};

/// What the timeline currently shows. The visible range always matches
/// the center date and scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineState {
    center_date: NaiveDate,
    current_date: NaiveDate,
    scale: Scale,
    visible_range: VisibleRange,
    selected_event: Option<String>,
    hovered_event: Option<String>,
    data_source: DataSourceConfig,
    connection: ConnectionState,
    last_test: Option<ConnectionTest>,
}

impl TimelineState {
    /// Centered on `today` at `scale`, with the local source selected.
    pub fn new(today: NaiveDate, scale: Scale) -> Self {
        Self {
            center_date: today,
            current_date: today,
            scale,
            visible_range: VisibleRange::compute(today, scale),
            selected_event: None,
            hovered_event: None,
            data_source: DataSourceConfig::Local,
            connection: ConnectionState::Untested,
            last_test: None,
        }
    }

    pub fn center_date(&self) -> NaiveDate {
        self.center_date
    }

    /// The date last navigated to. Starts at today and follows every
    /// explicit navigation; zooming leaves it alone.
    pub fn current_date(&self) -> NaiveDate {
        self.current_date
    }

    pub fn scale(&self) -> Scale {
        self.scale
    }

    pub fn visible_range(&self) -> &VisibleRange {
        &self.visible_range
    }

    pub fn selected_event(&self) -> Option<&str> {
        self.selected_event.as_deref()
    }

    pub fn hovered_event(&self) -> Option<&str> {
        self.hovered_event.as_deref()
    }

    pub fn data_source(&self) -> &DataSourceConfig {
        &self.data_source
    }

    pub fn connection(&self) -> ConnectionState {
        self.connection
    }

    pub fn last_test(&self) -> Option<&ConnectionTest> {
        self.last_test.as_ref()
    }

    fn recompute(&mut self) {
        self.visible_range = VisibleRange::compute(self.center_date, self.scale);
        tracing::debug!(
            center = %self.center_date,
            scale = %self.scale,
            start = %self.visible_range.start(),
            end = %self.visible_range.end(),
            "visible range recomputed"
        );
    }
}

impl Default for TimelineState {
    fn default() -> Self {
        Self::new(Local::now().date_naive(), Scale::default())
    }
}

/// Single owner of the timeline state and the loaded events. All changes
/// go through its action methods.
#[derive(Debug, Clone, Default)]
pub struct TimelineController {
    state: TimelineState,
    events: Vec<TimelineEvent>,
    query: Option<EventFilter>,
    loading: bool,
}

impl TimelineController {
    pub fn new(state: TimelineState) -> Self {
        Self {
            state,
            events: Vec::new(),
            query: None,
            loading: false,
        }
    }

    // Queries

    pub fn state(&self) -> &TimelineState {
        &self.state
    }

    /// Every loaded event, visible or not.
    pub fn events(&self) -> &[TimelineEvent] {
        &self.events
    }

    pub fn visible_events(&self) -> Vec<&TimelineEvent> {
        filter_visible(&self.events, &self.state.visible_range)
    }

    pub fn ticks(&self) -> Vec<TickMarker> {
        generate_ticks(&self.state.visible_range, self.state.scale)
    }

    pub fn ruler(&self) -> Ruler {
        Ruler::for_range(self.state.visible_range, self.state.center_date, self.state.scale)
    }

    pub fn center_marker(&self) -> CenterMarker {
        CenterMarker::new(self.state.center_date, self.state.scale)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The selected event, if it is among the loaded ones.
    pub fn selected(&self) -> Option<&TimelineEvent> {
        let id = self.state.selected_event.as_deref()?;
        self.events.iter().find(|e| e.id == id)
    }

    pub fn hovered(&self) -> Option<&TimelineEvent> {
        let id = self.state.hovered_event.as_deref()?;
        self.events.iter().find(|e| e.id == id)
    }

    pub fn query(&self) -> Option<&EventFilter> {
        self.query.as_ref()
    }

    // Actions

    pub fn navigate_to_date(&mut self, date: NaiveDate) {
        self.state.center_date = date;
        self.state.current_date = date;
        self.state.recompute();
    }

    /// Move the center date by a fixed number of days; saturates at the
    /// ends of the calendar.
    pub fn step(&mut self, direction: Direction, step: NavStep) {
        let days = Days::new(step.days());
        let center = self.state.center_date;
        let moved = match direction {
            Direction::Forward => center.checked_add_days(days).unwrap_or(NaiveDate::MAX),
            Direction::Back => center.checked_sub_days(days).unwrap_or(NaiveDate::MIN),
        };
        self.navigate_to_date(moved);
    }

    /// Previous / next page at the current scale: one day, month, year or
    /// decade, and a century for every coarser scale. Month steps clamp to
    /// the end of shorter months.
    pub fn step_scale(&mut self, direction: Direction) {
        let center = self.state.center_date;
        let months = match self.state.scale {
            Scale::Day => {
                let day = Days::new(1);
                let moved = match direction {
                    Direction::Forward => center.checked_add_days(day).unwrap_or(NaiveDate::MAX),
                    Direction::Back => center.checked_sub_days(day).unwrap_or(NaiveDate::MIN),
                };
                self.navigate_to_date(moved);
                return;
            }
            Scale::Month => 1,
            Scale::Year => 12,
            Scale::Decade => 120,
            Scale::Century | Scale::Millennium | Scale::Era | Scale::Prehistoric => 1200,
        };
        let months = Months::new(months);
        let moved = match direction {
            Direction::Forward => center.checked_add_months(months).unwrap_or(NaiveDate::MAX),
            Direction::Back => center.checked_sub_months(months).unwrap_or(NaiveDate::MIN),
        };
        self.navigate_to_date(moved);
    }

    pub fn zoom_in(&mut self) {
        self.set_scale(self.state.scale.zoom_in());
    }

    pub fn zoom_out(&mut self) {
        self.set_scale(self.state.scale.zoom_out());
    }

    pub fn set_scale(&mut self, scale: Scale) {
        self.state.scale = scale;
        self.state.recompute();
    }

    pub fn apply(&mut self, command: NavCommand) {
        match command {
            NavCommand::Step { direction, step } => self.step(direction, step),
            NavCommand::ZoomIn => self.zoom_in(),
            NavCommand::ZoomOut => self.zoom_out(),
        }
    }

    pub fn select_event(&mut self, id: Option<String>) {
        self.state.selected_event = id;
    }

    /// Click on an event: selects it and centers on its start date, or
    /// clears the selection when it is already selected. Ids that are not
    /// loaded are selected without moving.
    pub fn toggle_select(&mut self, id: &str) {
        if self.state.selected_event.as_deref() == Some(id) {
            self.state.selected_event = None;
            return;
        }
        self.state.selected_event = Some(id.to_string());
        if let Some(start) = self.events.iter().find(|e| e.id == id).map(|e| e.start_date) {
            self.navigate_to_date(start);
        }
    }

    pub fn hover_event(&mut self, id: Option<String>) {
        self.state.hovered_event = id;
    }

    /// Switch sources. The connection state starts over.
    pub fn set_data_source(&mut self, source: DataSourceConfig) {
        if self.state.data_source != source {
            self.state.connection = ConnectionState::Untested;
            self.state.last_test = None;
        }
        self.state.data_source = source;
    }

    pub fn record_connection_test(&mut self, test: ConnectionTest) {
        self.state.connection = ConnectionState::from(&test);
        self.state.last_test = Some(test);
    }

    /// Filter handed to the connector on the next reload.
    pub fn set_query(&mut self, query: Option<EventFilter>) {
        self.query = query.filter(|q| !q.is_empty());
    }

    /// Test the selected source and record the outcome.
    pub async fn test_connection<B: EventBackend>(
        &mut self,
        connector: &SourceConnector<B>,
    ) -> ConnectionTest {
        let test = connector.test_connection(&self.state.data_source).await;
        self.record_connection_test(test.clone());
        test
    }

    /// Replace the loaded events with a fresh fetch. On failure the
    /// previous events are kept.
    ///
    /// # Errors
    /// Returns the connector's [`SourceError`].
    pub async fn reload<B: EventBackend>(
        &mut self,
        connector: &SourceConnector<B>,
    ) -> Result<usize, SourceError> {
        self.loading = true;
        let result = connector
            .fetch_events(
                &self.state.data_source,
                self.state.connection,
                self.query.as_ref(),
            )
            .await;
        self.loading = false;

        match result {
            Ok(events) => {
                self.events = events;
                Ok(self.events.len())
            }
            Err(e) => {
                tracing::warn!(error = %e, kept = self.events.len(), "reload failed");
                Err(e)
            }
        }
    }
}
