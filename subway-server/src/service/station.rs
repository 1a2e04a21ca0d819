//! Station registry orchestration.

use std::sync::Arc;

use tracing::info;

use crate::domain::{Station, StationId, StationName};
use crate::repository::{LineRepository, StationRepository};

use super::error::ServiceError;

/// Creates, lists and deletes stations.
///
/// Needs the line registry to refuse deleting a station a line still runs
/// through.
pub struct StationService<S, L> {
    stations: Arc<S>,
    lines: Arc<L>,
}

impl<S: StationRepository, L: LineRepository> StationService<S, L> {
    pub fn new(stations: Arc<S>, lines: Arc<L>) -> Self {
        Self { stations, lines }
    }

    pub fn create(&self, name: StationName) -> Station {
        let station = self.stations.insert(name);
        info!(station = %station, "created station");
        station
    }

    pub fn stations(&self) -> Vec<Station> {
        self.stations.all()
    }

    pub fn station(&self, id: StationId) -> Result<Station, ServiceError> {
        self.stations.get(id)
    }

    /// Delete a station no line runs through.
    ///
    /// The reference check and the removal share the line registry's write
    /// lock, so no section can pick the station up in between.
    pub fn delete(&self, id: StationId) -> Result<(), ServiceError> {
        let station = self.stations.get(id)?;
        self.lines
            .while_unreferenced(&station, || self.stations.remove(id))
            .map_err(|line| ServiceError::StationInUse(id, line))?
            .ok_or(ServiceError::NoSuchStation(id))?;
        info!(station = %station, "deleted station");
        Ok(())
    }
}
