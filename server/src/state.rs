use std::sync::Arc;

use monastery360_shared::monastery::sample_monasteries;
use monastery360_shared::{DatasetError, EventCalendar, SceneGraph};

/// Record counts of the datasets bundled into the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetCounts {
    pub monasteries: usize,
    pub scenes: usize,
    pub events: usize,
}

impl DatasetCounts {
    pub fn load() -> Result<Self, DatasetError> {
        Ok(Self {
            monasteries: sample_monasteries()?.len(),
            scenes: SceneGraph::sample()?.len(),
            events: EventCalendar::sample()?.len(),
        })
    }
}

/// Read-only after startup; cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub datasets: Arc<Result<DatasetCounts, DatasetError>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_datasets(DatasetCounts::load())
    }

    pub fn with_datasets(datasets: Result<DatasetCounts, DatasetError>) -> Self {
        Self {
            datasets: Arc::new(datasets),
        }
    }
}
