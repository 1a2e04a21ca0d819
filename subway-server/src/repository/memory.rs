//! In-memory repositories.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::{Line, LineId, Station, StationId, StationName};
use crate::service::ServiceError;

use super::{LineRepository, StationRepository};

/// A map behind a lock, handing out ids from 1.
///
/// Poisoned locks are recovered from: a panicking writer cannot have left a
/// half-applied line behind, because lines are only ever replaced whole.
#[derive(Debug)]
struct Table<K, V> {
    rows: RwLock<BTreeMap<K, V>>,
    last_id: AtomicU64,
}

impl<K: Ord, V> Default for Table<K, V> {
    fn default() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            last_id: AtomicU64::new(0),
        }
    }
}

impl<K: Ord, V> Table<K, V> {
    fn next_id(&self) -> u64 {
        self.last_id.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<K, V>> {
        self.rows.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<K, V>> {
        self.rows.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Thread-safe station registry.
#[derive(Debug, Default)]
pub struct InMemoryStations {
    table: Table<StationId, Station>,
}

impl InMemoryStations {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StationRepository for InMemoryStations {
    fn insert(&self, name: StationName) -> Station {
        let station = Station::new(StationId(self.table.next_id()), name);
        self.table.write().insert(station.id(), station.clone());
        station
    }

    fn find(&self, id: StationId) -> Option<Station> {
        self.table.read().get(&id).cloned()
    }

    fn all(&self) -> Vec<Station> {
        self.table.read().values().cloned().collect()
    }

    fn remove(&self, id: StationId) -> Option<Station> {
        self.table.write().remove(&id)
    }
}

/// Thread-safe line registry.
#[derive(Debug, Default)]
pub struct InMemoryLines {
    table: Table<LineId, Line>,
}

impl InMemoryLines {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LineRepository for InMemoryLines {
    fn insert(
        &self,
        build: impl FnOnce(LineId) -> Result<Line, ServiceError>,
    ) -> Result<Line, ServiceError> {
        let mut rows = self.table.write();
        let line = build(LineId(self.table.next_id()))?;
        rows.insert(line.id(), line.clone());
        Ok(line)
    }

    fn find(&self, id: LineId) -> Option<Line> {
        self.table.read().get(&id).cloned()
    }

    fn all(&self) -> Vec<Line> {
        self.table.read().values().cloned().collect()
    }

    fn modify<T>(
        &self,
        id: LineId,
        f: impl FnOnce(&mut Line) -> Result<T, ServiceError>,
    ) -> Result<T, ServiceError> {
        let mut rows = self.table.write();
        let line = rows.get_mut(&id).ok_or(ServiceError::NoSuchLine(id))?;
        f(line)
    }

    fn while_unreferenced<T>(&self, station: &Station, f: impl FnOnce() -> T) -> Result<T, LineId> {
        let rows = self.table.write();
        if let Some(line) = rows.values().find(|line| line.contains(station)) {
            return Err(line.id());
        }
        Ok(f())
    }

    fn remove(&self, id: LineId) -> Option<Line> {
        self.table.write().remove(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Distance, LineColor, LineName, Section, SectionError};

    fn name(s: &str) -> StationName {
        StationName::parse(s).unwrap()
    }

    fn line_between(stations: &InMemoryStations, lines: &InMemoryLines) -> Line {
        let up = stations.insert(name("강남역"));
        let down = stations.insert(name("역삼역"));
        lines
            .insert(|id| {
                Ok(Line::new(
                    id,
                    LineName::parse("신분당선").unwrap(),
                    LineColor::parse("bg-red-600").unwrap(),
                    Section::new(up, down, Distance::new(10).unwrap()).unwrap(),
                ))
            })
            .unwrap()
    }

    #[test]
    fn station_ids_start_at_one_and_increase() {
        let stations = InMemoryStations::new();
        assert!(stations.all().is_empty());

        let a = stations.insert(name("강남역"));
        let b = stations.insert(name("역삼역"));

        assert_eq!(a.id(), StationId(1));
        assert_eq!(b.id(), StationId(2));
        assert_eq!(stations.all(), vec![a, b]);
    }

    #[test]
    fn station_lookup() {
        let stations = InMemoryStations::new();
        let a = stations.insert(name("강남역"));

        assert_eq!(stations.get(a.id()).unwrap().name().as_str(), "강남역");
        assert_eq!(
            stations.get(StationId(0)),
            Err(ServiceError::NoSuchStation(StationId(0)))
        );
    }

    #[test]
    fn station_removal() {
        let stations = InMemoryStations::new();
        let a = stations.insert(name("강남역"));

        assert_eq!(stations.remove(a.id()), Some(a.clone()));
        assert_eq!(stations.remove(a.id()), None);
        assert!(stations.find(a.id()).is_none());
    }

    #[test]
    fn line_insert_assigns_id() {
        let stations = InMemoryStations::new();
        let lines = InMemoryLines::new();

        let line = line_between(&stations, &lines);

        assert_eq!(line.id(), LineId(1));
        assert_eq!(lines.get(LineId(1)).unwrap(), line);
        assert_eq!(lines.all().len(), 1);
    }

    #[test]
    fn modify_commits_on_success() {
        let stations = InMemoryStations::new();
        let lines = InMemoryLines::new();
        let line = line_between(&stations, &lines);
        let next = stations.insert(name("선릉역"));
        let last = line.last_station().unwrap();

        lines
            .modify(line.id(), |l| {
                Ok(l.add_section(last, next, Distance::new(5).unwrap())?)
            })
            .unwrap();

        assert_eq!(lines.get(line.id()).unwrap().sections().len(), 2);
    }

    #[test]
    fn modify_rejection_leaves_line_untouched() {
        let stations = InMemoryStations::new();
        let lines = InMemoryLines::new();
        let line = line_between(&stations, &lines);
        let first = line.first_station().unwrap();

        let err = lines
            .modify(line.id(), |l| Ok(l.remove_section(&first)?))
            .unwrap_err();

        assert_eq!(err, ServiceError::from(SectionError::LastSection));
        assert_eq!(lines.get(line.id()).unwrap(), line);
    }

    #[test]
    fn modify_unknown_line() {
        let lines = InMemoryLines::new();
        let err = lines.modify(LineId(9), |_| Ok(())).unwrap_err();
        assert_eq!(err, ServiceError::NoSuchLine(LineId(9)));
    }

    #[test]
    fn failed_insert_stores_nothing() {
        let lines = InMemoryLines::new();
        let err = lines
            .insert(|_| Err(ServiceError::NoSuchStation(StationId(7))))
            .unwrap_err();

        assert_eq!(err, ServiceError::NoSuchStation(StationId(7)));
        assert!(lines.all().is_empty());
    }

    #[test]
    fn while_unreferenced_runs_only_for_free_stations() {
        let stations = InMemoryStations::new();
        let lines = InMemoryLines::new();
        let line = line_between(&stations, &lines);
        let on_line = line.first_station().unwrap();
        let free = stations.insert(name("선릉역"));

        assert_eq!(lines.while_unreferenced(&on_line, || "ran"), Err(line.id()));
        assert_eq!(lines.while_unreferenced(&free, || "ran"), Ok("ran"));
    }

    #[test]
    fn line_removal() {
        let stations = InMemoryStations::new();
        let lines = InMemoryLines::new();
        let line = line_between(&stations, &lines);

        assert_eq!(lines.remove(line.id()), Some(line.clone()));
        assert!(lines.all().is_empty());
        assert_eq!(
            lines.get(line.id()),
            Err(ServiceError::NoSuchLine(line.id()))
        );
    }
}
