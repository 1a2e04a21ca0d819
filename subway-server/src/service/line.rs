//! Line and section orchestration.

use std::sync::Arc;

use tracing::info;

use crate::domain::{
    Distance, Line, LineColor, LineId, LineName, Section, Station, StationId,
};
use crate::repository::{LineRepository, StationRepository};

use super::error::ServiceError;

/// A section to add, by station id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionRequest {
    pub up_station: StationId,
    pub down_station: StationId,
    pub distance: Distance,
}

impl SectionRequest {
    pub fn new(up_station: StationId, down_station: StationId, distance: Distance) -> Self {
        Self {
            up_station,
            down_station,
            distance,
        }
    }
}

/// A line to create, with its first section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLine {
    pub name: LineName,
    pub color: LineColor,
    pub section: SectionRequest,
}

/// Resolves lines and stations, then hands the change to [`Line`].
///
/// Holds no rules of its own beyond turning missing ids into
/// `NoSuchLine` / `NoSuchStation`. Stations are resolved inside the line
/// registry's write lock, so a concurrent station delete either sees the
/// committed line or finds the station already gone.
pub struct LineService<L, S> {
    lines: Arc<L>,
    stations: Arc<S>,
}

impl<L: LineRepository, S: StationRepository> LineService<L, S> {
    pub fn new(lines: Arc<L>, stations: Arc<S>) -> Self {
        Self { lines, stations }
    }

    /// Create a line with a single section.
    pub fn create_line(&self, new: NewLine) -> Result<Line, ServiceError> {
        let line = self.lines.insert(|id| {
            let (up, down) = self.resolve(&new.section)?;
            let first = Section::new(up, down, new.section.distance)?;
            Ok(Line::new(id, new.name, new.color, first))
        })?;
        info!(line = %line.id(), name = line.name().as_str(), "created line");
        Ok(line)
    }

    pub fn lines(&self) -> Vec<Line> {
        self.lines.all()
    }

    pub fn line(&self, id: LineId) -> Result<Line, ServiceError> {
        self.lines.get(id)
    }

    /// Stations of a line from one terminus to the other.
    pub fn ordered_stations(&self, id: LineId) -> Result<Vec<Station>, ServiceError> {
        Ok(self.lines.get(id)?.ordered_stations()?)
    }

    pub fn update_line(
        &self,
        id: LineId,
        name: LineName,
        color: LineColor,
    ) -> Result<Line, ServiceError> {
        let line = self.lines.modify(id, |line| {
            line.update(name, color);
            Ok(line.clone())
        })?;
        info!(line = %id, name = line.name().as_str(), "updated line");
        Ok(line)
    }

    pub fn delete_line(&self, id: LineId) -> Result<(), ServiceError> {
        self.lines.remove(id).ok_or(ServiceError::NoSuchLine(id))?;
        info!(line = %id, "deleted line");
        Ok(())
    }

    /// Add a section to a line, extending or splitting as the line decides.
    pub fn add_section(&self, id: LineId, request: SectionRequest) -> Result<Line, ServiceError> {
        let line = self.lines.modify(id, |line| {
            let (up, down) = self.resolve(&request)?;
            line.add_section(up, down, request.distance)?;
            Ok(line.clone())
        })?;
        info!(
            line = %id,
            up = %request.up_station,
            down = %request.down_station,
            distance = %request.distance,
            "added section"
        );
        Ok(line)
    }

    /// Remove `station` from a line.
    pub fn remove_section(&self, id: LineId, station: StationId) -> Result<Line, ServiceError> {
        let (line, station) = self.lines.modify(id, |line| {
            let station = self.stations.get(station)?;
            line.remove_section(&station)?;
            Ok((line.clone(), station))
        })?;
        info!(line = %id, station = %station, "removed section");
        Ok(line)
    }

    fn resolve(&self, request: &SectionRequest) -> Result<(Station, Station), ServiceError> {
        let up = self.stations.get(request.up_station)?;
        let down = self.stations.get(request.down_station)?;
        Ok((up, down))
    }
}
