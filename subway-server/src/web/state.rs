//! Application state for the web layer.

use std::sync::Arc;

use crate::repository::{InMemoryLines, InMemoryStations};
use crate::service::{LineService, StationService};

/// Shared application state.
///
/// Both services share the same repositories, so a line change is visible
/// to station deletion checks and vice versa.
#[derive(Clone)]
pub struct AppState {
    /// Line and section operations
    pub lines: Arc<LineService<InMemoryLines, InMemoryStations>>,

    /// Station registry operations
    pub stations: Arc<StationService<InMemoryStations, InMemoryLines>>,
}

impl AppState {
    /// Create a new app state over the given repositories.
    pub fn new(lines: Arc<InMemoryLines>, stations: Arc<InMemoryStations>) -> Self {
        Self {
            lines: Arc::new(LineService::new(lines.clone(), stations.clone())),
            stations: Arc::new(StationService::new(stations, lines)),
        }
    }

    /// Create an app state over fresh, empty repositories.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryLines::new()),
            Arc::new(InMemoryStations::new()),
        )
    }
}
