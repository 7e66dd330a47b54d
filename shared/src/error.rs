use thiserror::Error;

/// Scene graph violations caught when a tour is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TourError {
    #[error("scene `{0}` is defined more than once")]
    DuplicateScene(String),
    #[error("start scene `{0}` is not defined")]
    MissingStartScene(String),
    #[error("hotspot `{hotspot}` in scene `{scene}` targets unknown scene `{target}`")]
    DanglingHotspot {
        scene: String,
        hotspot: String,
        target: String,
    },
}

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("malformed {name} dataset: {source}")]
    Malformed {
        name: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid tour: {0}")]
    Tour(#[from] TourError),
    #[error("calendar month {year}-{month:02} does not exist")]
    InvalidMonth { year: i32, month: u32 },
    #[error("calendar event on day {day} is outside {month}")]
    InvalidEventDay { day: u32, month: String },
    #[error("calendar has more than one event on day {0}")]
    DuplicateEventDay(u32),
    #[error("monastery id {0} is used more than once")]
    DuplicateMonasteryId(u32),
}

impl DatasetError {
    pub(crate) fn malformed(name: &'static str) -> impl FnOnce(serde_json::Error) -> Self {
        move |source| Self::Malformed { name, source }
    }
}
