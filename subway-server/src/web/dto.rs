//! Data transfer objects for web requests and responses.
//!
//! Field names are camelCase on the wire. Requests carry raw primitives and
//! are turned into domain values through the validating constructors.

use serde::{Deserialize, Serialize};

use crate::domain::{Distance, Line, LineColor, LineName, Station, StationId, StationName};
use crate::service::{NewLine, SectionRequest, ServiceError};

/// Request to create a station.
#[derive(Debug, Serialize, Deserialize)]
pub struct StationCreateRequest {
    pub name: String,
}

/// A station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationResponse {
    pub id: u64,
    pub name: String,
}

/// Request to create a line together with its first section.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineCreateRequest {
    pub name: String,
    pub color: String,
    pub up_station_id: u64,
    pub down_station_id: u64,
    pub distance: i64,
}

/// Request to rename or recolor a line.
#[derive(Debug, Serialize, Deserialize)]
pub struct LineUpdateRequest {
    pub name: String,
    pub color: String,
}

/// Request to add a section to a line.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionCreateRequest {
    pub up_station_id: u64,
    pub down_station_id: u64,
    pub distance: i64,
}

/// Query for removing a station from a line.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionRemoveQuery {
    pub station_id: u64,
}

/// A line with its stations in running order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineResponse {
    pub id: u64,
    pub name: String,
    pub color: String,
    pub stations: Vec<StationResponse>,
}

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

// Conversion implementations

impl StationCreateRequest {
    pub fn into_name(self) -> Result<StationName, ServiceError> {
        Ok(StationName::parse(&self.name)?)
    }
}

impl LineCreateRequest {
    pub fn into_domain(self) -> Result<NewLine, ServiceError> {
        Ok(NewLine {
            name: LineName::parse(&self.name)?,
            color: LineColor::parse(&self.color)?,
            section: SectionRequest::new(
                StationId(self.up_station_id),
                StationId(self.down_station_id),
                Distance::new(self.distance)?,
            ),
        })
    }
}

impl LineUpdateRequest {
    pub fn into_domain(self) -> Result<(LineName, LineColor), ServiceError> {
        Ok((LineName::parse(&self.name)?, LineColor::parse(&self.color)?))
    }
}

impl SectionCreateRequest {
    pub fn into_domain(self) -> Result<SectionRequest, ServiceError> {
        Ok(SectionRequest::new(
            StationId(self.up_station_id),
            StationId(self.down_station_id),
            Distance::new(self.distance)?,
        ))
    }
}

impl StationResponse {
    pub fn from_station(station: &Station) -> Self {
        Self {
            id: station.id().0,
            name: station.name().to_string(),
        }
    }
}

impl LineResponse {
    /// Fails only if the line's sections no longer form a path.
    pub fn from_line(line: &Line) -> Result<Self, ServiceError> {
        let stations = line
            .ordered_stations()?
            .iter()
            .map(StationResponse::from_station)
            .collect();

        Ok(Self {
            id: line.id().0,
            name: line.name().as_str().to_string(),
            color: line.color().as_str().to_string(),
            stations,
        })
    }
}
