//! Curated sample events served by the local source and used as templates
//! by the simulated remote sources.

use std::time::Duration;

use chrono::NaiveDate;

use crate::event::{EventPriority, TimelineEvent};
use crate::timeline::EventFilter;

/// Source tag given to local events that carry none.
pub const LOCAL_SOURCE: &str = "local";

struct Sample {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    start: (i32, u32, u32),
    end: Option<(i32, u32, u32)>,
    priority: EventPriority,
    location: &'static str,
    tags: &'static [&'static str],
    group: Option<&'static str>,
    related: &'static [&'static str],
    url: Option<&'static str>,
}

const SAMPLES: &[Sample] = &[
    Sample {
        id: "WLD-1903-001",
        title: "First powered flight",
        description: "The Wright brothers complete the first controlled, powered flight in North Carolina.",
        start: (1903, 12, 17),
        end: None,
        priority: EventPriority::P2,
        location: "Kitty Hawk, North Carolina, USA",
        tags: &["technology", "aviation"],
        group: None,
        related: &[],
        url: Some("https://airandspace.si.edu/exhibitions/wright-brothers/online/fly/1903/"),
    },
    Sample {
        id: "WLD-1914-001",
        title: "World War I begins",
        description: "Austria-Hungary declares war on Serbia, starting the First World War.",
        start: (1914, 7, 28),
        end: None,
        priority: EventPriority::P0,
        location: "Europe",
        tags: &["war", "international relations"],
        group: None,
        related: &[],
        url: Some("https://www.britannica.com/event/World-War-I"),
    },
    Sample {
        id: "WLD-1918-001",
        title: "World War I ends",
        description: "Germany signs the Armistice of Compiègne; the Treaty of Versailles follows in 1919.",
        start: (1918, 11, 11),
        end: None,
        priority: EventPriority::P0,
        location: "France",
        tags: &["war", "international relations"],
        group: None,
        related: &["WLD-1914-001"],
        url: None,
    },
    Sample {
        id: "US-1929-001",
        title: "Wall Street Crash (Black Tuesday)",
        description: "The US stock market collapses, setting off the Great Depression.",
        start: (1929, 10, 29),
        end: None,
        priority: EventPriority::P0,
        location: "Wall Street, New York, USA",
        tags: &["economy", "financial crisis"],
        group: None,
        related: &[],
        url: None,
    },
    Sample {
        id: "WLD-1939-001",
        title: "World War II begins",
        description: "Germany invades Poland, marking the start of the Second World War.",
        start: (1939, 9, 1),
        end: None,
        priority: EventPriority::P0,
        location: "Poland",
        tags: &["war", "international relations"],
        group: None,
        related: &[],
        url: None,
    },
    Sample {
        id: "US-1941-001",
        title: "Attack on Pearl Harbor",
        description: "Japan attacks Pearl Harbor, bringing the United States into the Second World War.",
        start: (1941, 12, 7),
        end: None,
        priority: EventPriority::P0,
        location: "Pearl Harbor, Hawaii",
        tags: &["war", "international relations"],
        group: Some("World War II"),
        related: &[],
        url: Some("https://en.wikipedia.org/wiki/Attack_on_Pearl_Harbor"),
    },
    Sample {
        id: "US-1945-001",
        title: "Atomic bombing of Hiroshima",
        description: "The United States drops the first atomic bomb on Hiroshima, causing massive casualties.",
        start: (1945, 8, 6),
        end: None,
        priority: EventPriority::P0,
        location: "Hiroshima, Japan",
        tags: &["war", "weapons", "technology"],
        group: Some("World War II"),
        related: &[],
        url: None,
    },
    Sample {
        id: "WLD-1945-002",
        title: "World War II ends",
        description: "Germany surrenders in May 1945; Japan surrenders on September 2, ending the Pacific War.",
        start: (1945, 9, 2),
        end: None,
        priority: EventPriority::P0,
        location: "Worldwide",
        tags: &["war", "international relations"],
        group: None,
        related: &["WLD-1939-001"],
        url: None,
    },
    Sample {
        id: "CN-1949-001",
        title: "Founding of the People's Republic of China",
        description: "The founding of the People's Republic of China is proclaimed at Tiananmen Square.",
        start: (1949, 10, 1),
        end: None,
        priority: EventPriority::P0,
        location: "Tiananmen Square, Beijing",
        tags: &["politics", "nation founding"],
        group: None,
        related: &[],
        url: Some("https://en.wikipedia.org/wiki/Proclamation_of_the_People%27s_Republic_of_China"),
    },
    Sample {
        id: "WLD-1957-001",
        title: "Sputnik 1 launched",
        description: "The Soviet Union launches Sputnik 1, the first artificial satellite, opening the space age.",
        start: (1957, 10, 4),
        end: None,
        priority: EventPriority::P1,
        location: "Soviet Union",
        tags: &["technology", "space exploration"],
        group: None,
        related: &[],
        url: None,
    },
    Sample {
        id: "US-1963-001",
        title: "Assassination of John F. Kennedy",
        description: "US President John F. Kennedy is assassinated in Dallas, Texas.",
        start: (1963, 11, 22),
        end: None,
        priority: EventPriority::P0,
        location: "Dallas, USA",
        tags: &["politics", "assassination"],
        group: None,
        related: &[],
        url: None,
    },
    Sample {
        id: "US-1969-001",
        title: "First crewed Moon landing",
        description: "Apollo 11 astronaut Neil Armstrong becomes the first person to walk on the Moon.",
        start: (1969, 7, 20),
        end: None,
        priority: EventPriority::P0,
        location: "The Moon",
        tags: &["technology", "space exploration"],
        group: None,
        related: &["WLD-1957-001"],
        url: Some("https://en.wikipedia.org/wiki/Apollo_11"),
    },
    Sample {
        id: "WLD-1969-002",
        title: "Birth of the internet",
        description: "ARPA brings up ARPANET, the forerunner of the internet.",
        start: (1969, 10, 29),
        end: None,
        priority: EventPriority::P1,
        location: "USA",
        tags: &["technology", "communications"],
        group: None,
        related: &[],
        url: None,
    },
    Sample {
        id: "CN-1978-001",
        title: "Reform and opening up",
        description: "The Third Plenum of the 11th Central Committee shifts China's focus to economic construction.",
        start: (1978, 12, 18),
        end: Some((1978, 12, 22)),
        priority: EventPriority::P0,
        location: "Beijing",
        tags: &["politics", "economy"],
        group: None,
        related: &[],
        url: Some("https://en.wikipedia.org/wiki/Reform_and_opening_up"),
    },
    Sample {
        id: "CN-1980-001",
        title: "Shenzhen Special Economic Zone established",
        description: "China approves the Shenzhen Special Economic Zone as a window of reform.",
        start: (1980, 8, 26),
        end: None,
        priority: EventPriority::P2,
        location: "Shenzhen",
        tags: &["economy", "policy"],
        group: None,
        related: &["CN-1978-001"],
        url: None,
    },
    Sample {
        id: "EU-1989-001",
        title: "Fall of the Berlin Wall",
        description: "A defining moment of the end of the Cold War; East and West Germans cross freely.",
        start: (1989, 11, 9),
        end: None,
        priority: EventPriority::P1,
        location: "Berlin, Germany",
        tags: &["politics", "international relations"],
        group: None,
        related: &[],
        url: None,
    },
    Sample {
        id: "EU-1993-001",
        title: "European Union founded",
        description: "The Maastricht Treaty enters into force, formally establishing the European Union.",
        start: (1993, 11, 1),
        end: None,
        priority: EventPriority::P1,
        location: "Europe",
        tags: &["politics", "international organizations"],
        group: None,
        related: &[],
        url: None,
    },
    Sample {
        id: "CN-1997-001",
        title: "Handover of Hong Kong",
        description: "China resumes sovereignty over Hong Kong, ending British colonial rule.",
        start: (1997, 7, 1),
        end: None,
        priority: EventPriority::P0,
        location: "Hong Kong",
        tags: &["politics", "sovereignty"],
        group: None,
        related: &[],
        url: None,
    },
    Sample {
        id: "US-2001-002",
        title: "September 11 attacks",
        description: "Hijacked planes strike the World Trade Center towers, killing nearly 3,000 people.",
        start: (2001, 9, 11),
        end: Some((2001, 9, 11)),
        priority: EventPriority::P0,
        location: "New York, USA",
        tags: &["terrorism", "international relations"],
        group: None,
        related: &[],
        url: None,
    },
    Sample {
        id: "CN-2001-001",
        title: "China joins the WTO",
        description: "China formally joins the World Trade Organization, deepening its integration into the global economy.",
        start: (2001, 12, 11),
        end: Some((2001, 12, 11)),
        priority: EventPriority::P1,
        location: "Doha, Qatar",
        tags: &["economy", "international relations"],
        group: None,
        related: &[],
        url: Some("https://en.wikipedia.org/wiki/China_and_the_World_Trade_Organization"),
    },
    Sample {
        id: "CN-2008-001",
        title: "Beijing Olympic Games",
        description: "The 29th Summer Olympics are held in Beijing, the first Games hosted in China.",
        start: (2008, 8, 8),
        end: Some((2008, 8, 24)),
        priority: EventPriority::P1,
        location: "Beijing",
        tags: &["sports", "international events"],
        group: None,
        related: &[],
        url: Some("https://en.wikipedia.org/wiki/2008_Summer_Olympics"),
    },
    Sample {
        id: "JP-2011-001",
        title: "Tōhoku earthquake and tsunami",
        description: "A magnitude 9.0 earthquake off northeastern Japan triggers a tsunami and the Fukushima nuclear accident.",
        start: (2011, 3, 11),
        end: Some((2011, 3, 11)),
        priority: EventPriority::P1,
        location: "Tōhoku, Japan",
        tags: &["natural disaster", "nuclear accident"],
        group: None,
        related: &[],
        url: None,
    },
    Sample {
        id: "WLD-2016-001",
        title: "Brexit referendum",
        description: "The United Kingdom votes in a referendum to leave the European Union.",
        start: (2016, 6, 23),
        end: Some((2016, 6, 23)),
        priority: EventPriority::P1,
        location: "United Kingdom",
        tags: &["politics", "international relations"],
        group: None,
        related: &["EU-1993-001"],
        url: None,
    },
    Sample {
        id: "WLD-2019-001",
        title: "COVID-19 outbreak",
        description: "The novel coronavirus spreads worldwide with far-reaching effects on every country.",
        start: (2019, 12, 1),
        end: Some((2019, 12, 1)),
        priority: EventPriority::P0,
        location: "Worldwide",
        tags: &["health", "public health"],
        group: None,
        related: &[],
        url: None,
    },
    Sample {
        id: "WLD-2022-001",
        title: "Russia invades Ukraine",
        description: "Full-scale war breaks out between Russia and Ukraine, drawing global attention.",
        start: (2022, 2, 24),
        end: Some((2022, 2, 24)),
        priority: EventPriority::P0,
        location: "Ukraine",
        tags: &["war", "international relations"],
        group: None,
        related: &[],
        url: None,
    },
    Sample {
        id: "CN-2022-002",
        title: "Shenzhou 14 mission",
        description: "China launches the crewed Shenzhou 14 spacecraft to help build its space station.",
        start: (2022, 6, 5),
        end: Some((2022, 6, 5)),
        priority: EventPriority::P1,
        location: "Jiuquan Satellite Launch Center, China",
        tags: &["technology", "space exploration"],
        group: None,
        related: &[],
        url: None,
    },
];

fn ymd((y, m, d): (i32, u32, u32)) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

/// The curated sample list, in chronological order.
pub fn sample_events() -> Vec<TimelineEvent> {
    SAMPLES
        .iter()
        .filter_map(|s| {
            let mut event = TimelineEvent::new(s.id, s.title, s.description, ymd(s.start)?, s.priority)
                .with_location(s.location)
                .with_tags(s.tags.iter().copied());
            event.end_date = s.end.and_then(ymd);
            event.group = s.group.map(str::to_string);
            event.related_events = s.related.iter().map(|r| r.to_string()).collect();
            event.url = s.url.map(str::to_string);
            Some(event)
        })
        .collect()
}

/// In-memory event store standing in for a local list.
#[derive(Debug, Clone)]
pub struct LocalStore {
    events: Vec<TimelineEvent>,
    delay: Duration,
}

impl LocalStore {
    pub fn new(events: Vec<TimelineEvent>, delay: Duration) -> Self {
        Self { events, delay }
    }

    /// The sample list with the given artificial latency.
    pub fn sample(delay: Duration) -> Self {
        Self::new(sample_events(), delay)
    }

    pub fn events(&self) -> &[TimelineEvent] {
        &self.events
    }

    /// Events matching `filter`, tagged with [`LOCAL_SOURCE`] when they
    /// carry no source.
    pub async fn load(&self, filter: Option<&EventFilter>) -> Vec<TimelineEvent> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.events
            .iter()
            .filter(|e| filter.map_or(true, |f| f.matches(e)))
            .cloned()
            .map(|mut e| {
                if e.source.is_none() {
                    e.source = Some(LOCAL_SOURCE.to_string());
                }
                e
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn sample_set_is_complete_and_unique() {
        let events = sample_events();
        assert_eq!(events.len(), SAMPLES.len());
        let ids: HashSet<_> = events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids.len(), events.len());
    }

    #[test]
    fn sample_set_is_chronological_with_valid_spans() {
        let events = sample_events();
        assert!(events.windows(2).all(|w| w[0].start_date <= w[1].start_date));
        for event in &events {
            if let Some(end) = event.end_date {
                assert!(end >= event.start_date, "{} ends before it starts", event.id);
            }
        }
    }

    #[test]
    fn related_events_point_into_the_set() {
        let events = sample_events();
        let ids: HashSet<_> = events.iter().map(|e| e.id.clone()).collect();
        for event in &events {
            for related in &event.related_events {
                assert!(ids.contains(related), "{} -> {}", event.id, related);
            }
        }
    }

    #[tokio::test]
    async fn local_store_tags_source_and_filters() {
        let store = LocalStore::sample(Duration::ZERO);
        let all = store.load(None).await;
        assert_eq!(all.len(), store.events().len());
        assert!(all.iter().all(|e| e.source.as_deref() == Some(LOCAL_SOURCE)));

        let filter = EventFilter::new().with_tag("space exploration");
        let space = store.load(Some(&filter)).await;
        assert_eq!(space.len(), 3);
    }
}
