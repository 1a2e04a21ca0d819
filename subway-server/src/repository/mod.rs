//! Station and line storage.
//!
//! The services only see the [`StationRepository`] and [`LineRepository`]
//! traits; durable storage can be swapped in behind them. The in-memory
//! implementations here back the server and the tests.

mod memory;

pub use memory::{InMemoryLines, InMemoryStations};

use crate::domain::{Line, LineId, Station, StationId, StationName};
use crate::service::ServiceError;

/// Station registry.
pub trait StationRepository: Send + Sync {
    /// Store a new station, assigning it the next id.
    fn insert(&self, name: StationName) -> Station;

    fn find(&self, id: StationId) -> Option<Station>;

    /// All stations, ordered by id.
    fn all(&self) -> Vec<Station>;

    /// Remove a station, returning it if it existed.
    fn remove(&self, id: StationId) -> Option<Station>;

    /// Look up a station, failing with `NoSuchStation`.
    fn get(&self, id: StationId) -> Result<Station, ServiceError> {
        self.find(id).ok_or(ServiceError::NoSuchStation(id))
    }
}

/// Line registry.
///
/// Every method taking a closure runs it under the registry's write lock.
/// Station lookups made inside those closures are therefore ordered against
/// [`while_unreferenced`](Self::while_unreferenced), so a station cannot be
/// deleted between being resolved and being committed to a line.
pub trait LineRepository: Send + Sync {
    /// Store a line built from the next id. Nothing is stored if `build` fails.
    fn insert(
        &self,
        build: impl FnOnce(LineId) -> Result<Line, ServiceError>,
    ) -> Result<Line, ServiceError>;

    fn find(&self, id: LineId) -> Option<Line>;

    /// All lines, ordered by id.
    fn all(&self) -> Vec<Line>;

    /// Run `f` against the stored line with exclusive access.
    ///
    /// `f` must leave the line untouched when it fails, which every `Line`
    /// method guarantees.
    fn modify<T>(
        &self,
        id: LineId,
        f: impl FnOnce(&mut Line) -> Result<T, ServiceError>,
    ) -> Result<T, ServiceError>;

    /// Run `f` only if no line references `station`, holding the write lock
    /// throughout. Otherwise returns the first referencing line.
    fn while_unreferenced<T>(&self, station: &Station, f: impl FnOnce() -> T) -> Result<T, LineId>;

    /// Remove a line, returning it if it existed.
    fn remove(&self, id: LineId) -> Option<Line>;

    /// Look up a line, failing with `NoSuchLine`.
    fn get(&self, id: LineId) -> Result<Line, ServiceError> {
        self.find(id).ok_or(ServiceError::NoSuchLine(id))
    }
}
