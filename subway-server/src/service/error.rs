//! Service error types.

use crate::domain::{InvalidDistance, InvalidName, LineError, LineId, SectionError, StationId};

/// Errors surfaced by the line and station services.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    /// Line id is unknown
    #[error("no such line: {0}")]
    NoSuchLine(LineId),

    /// Station id is unknown
    #[error("no such station: {0}")]
    NoSuchStation(StationId),

    /// Station is still referenced by a line
    #[error("station {0} is still on line {1}")]
    StationInUse(StationId, LineId),

    #[error(transparent)]
    Distance(#[from] InvalidDistance),

    #[error(transparent)]
    Name(#[from] InvalidName),

    #[error(transparent)]
    Line(#[from] LineError),
}

impl From<SectionError> for ServiceError {
    fn from(e: SectionError) -> Self {
        ServiceError::Line(e.into())
    }
}

impl ServiceError {
    /// Lookup failures: the referenced line or station does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ServiceError::NoSuchLine(_) | ServiceError::NoSuchStation(_)
        )
    }

    /// A stored line is in an illegal state. Never caused by the request.
    pub fn is_internal(&self) -> bool {
        matches!(self, ServiceError::Line(e) if e.is_internal())
    }
}
