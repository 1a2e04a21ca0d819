//! Linearization of a line's section set.
//!
//! A line stores its sections as an unordered edge list. The station order is
//! only materialised on demand: build an up -> down index, find the one
//! station that is never a down station, and follow outgoing edges from it.
//!
//! The walk trusts nothing. Branches, cycles and stray sections are reported
//! as [`GraphError`] instead of looping or returning a truncated order.

use std::collections::{HashMap, HashSet};

use super::error::GraphError;
use super::section::Section;
use super::station::{Station, StationId};

/// Adjacency index over a borrowed section set.
#[derive(Debug)]
pub struct LineGraph<'a> {
    sections: &'a [Section],
    /// Outgoing section for each up station.
    next: HashMap<StationId, &'a Section>,
    /// Every station that some section enters.
    downs: HashSet<StationId>,
}

impl<'a> LineGraph<'a> {
    /// Index `sections`, rejecting any station with two outgoing or two
    /// incoming sections.
    pub fn build(sections: &'a [Section]) -> Result<Self, GraphError> {
        if sections.is_empty() {
            return Err(GraphError::Empty);
        }

        let mut next = HashMap::with_capacity(sections.len());
        let mut downs = HashSet::with_capacity(sections.len());

        for section in sections {
            let up = section.up_station().id();
            let down = section.down_station().id();

            if next.insert(up, section).is_some() {
                return Err(GraphError::Branch(up));
            }
            if !downs.insert(down) {
                return Err(GraphError::Branch(down));
            }
        }

        Ok(Self {
            sections,
            next,
            downs,
        })
    }

    /// The station no section enters.
    ///
    /// If there are several (disconnected pieces) the first one found is
    /// returned and [`ordered_stations`](Self::ordered_stations) reports the
    /// rest as unreachable.
    pub fn source(&self) -> Result<&'a Station, GraphError> {
        self.sections
            .iter()
            .map(Section::up_station)
            .find(|station| !self.downs.contains(&station.id()))
            .ok_or(GraphError::Cycle)
    }

    /// Outgoing section from `station`, if any.
    pub fn next_section(&self, station: StationId) -> Option<&'a Section> {
        self.next.get(&station).copied()
    }

    /// Stations from source to sink.
    ///
    /// On success the result has exactly `sections.len() + 1` distinct
    /// stations.
    pub fn ordered_stations(&self) -> Result<Vec<Station>, GraphError> {
        let total = self.sections.len();
        let mut current = self.source()?;

        let mut ordered = Vec::with_capacity(total + 1);
        let mut visited = HashSet::with_capacity(total + 1);
        visited.insert(current.id());
        ordered.push(current.clone());

        while let Some(section) = self.next_section(current.id()) {
            let down = section.down_station();
            if !visited.insert(down.id()) {
                return Err(GraphError::Cycle);
            }
            ordered.push(down.clone());
            current = down;
        }

        let walked = ordered.len() - 1;
        if walked != total {
            return Err(GraphError::Disconnected { walked, total });
        }

        Ok(ordered)
    }
}

/// Order the stations of `sections` from source to sink.
pub fn ordered_stations(sections: &[Section]) -> Result<Vec<Station>, GraphError> {
    LineGraph::build(sections)?.ordered_stations()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Distance, StationName};

    fn station(id: u64) -> Station {
        Station::new(StationId(id), StationName::parse(&format!("S{id}")).unwrap())
    }

    fn section(up: u64, down: u64) -> Section {
        Section::new(station(up), station(down), Distance::new(10).unwrap()).unwrap()
    }

    fn ids(stations: &[Station]) -> Vec<u64> {
        stations.iter().map(|s| s.id().0).collect()
    }

    #[test]
    fn single_section() {
        let sections = vec![section(1, 2)];
        assert_eq!(ids(&ordered_stations(&sections).unwrap()), vec![1, 2]);
    }

    #[test]
    fn order_does_not_depend_on_storage_order() {
        let sections = vec![section(3, 4), section(1, 2), section(2, 3)];
        assert_eq!(ids(&ordered_stations(&sections).unwrap()), vec![1, 2, 3, 4]);
    }

    #[test]
    fn source_is_the_station_never_entered() {
        let sections = vec![section(7, 5), section(9, 7)];
        let graph = LineGraph::build(&sections).unwrap();
        assert_eq!(graph.source().unwrap().id(), StationId(9));
        assert_eq!(
            graph.next_section(StationId(7)).map(|s| s.down_station().id()),
            Some(StationId(5))
        );
        assert!(graph.next_section(StationId(5)).is_none());
    }

    #[test]
    fn empty_is_an_error() {
        assert_eq!(ordered_stations(&[]), Err(GraphError::Empty));
    }

    #[test]
    fn fork_is_a_branch() {
        let sections = vec![section(1, 2), section(1, 3)];
        assert_eq!(
            ordered_stations(&sections),
            Err(GraphError::Branch(StationId(1)))
        );
    }

    #[test]
    fn merge_is_a_branch() {
        let sections = vec![section(1, 3), section(2, 3)];
        assert_eq!(
            ordered_stations(&sections),
            Err(GraphError::Branch(StationId(3)))
        );
    }

    #[test]
    fn closed_loop_is_a_cycle() {
        let sections = vec![section(1, 2), section(2, 3), section(3, 1)];
        assert_eq!(ordered_stations(&sections), Err(GraphError::Cycle));
    }

    #[test]
    fn detached_loop_is_disconnected() {
        // 1 -> 2 plus a separate 3 -> 4 -> 3 loop
        let sections = vec![section(1, 2), section(3, 4), section(4, 3)];
        assert_eq!(
            ordered_stations(&sections),
            Err(GraphError::Disconnected {
                walked: 1,
                total: 3
            })
        );
    }

    #[test]
    fn two_paths_are_disconnected() {
        let sections = vec![section(1, 2), section(3, 4)];
        assert!(matches!(
            ordered_stations(&sections),
            Err(GraphError::Disconnected { walked: 1, total: 2 })
        ));
    }
}
