//! Subway lines and the section insertion/removal policy.

use std::fmt;

use tracing::debug;

use super::error::{GraphError, LineError, SectionError};
use super::graph;
use super::section::{Distance, Section};
use super::station::{InvalidName, Station, StationId};

/// Identifier assigned to a line by the line registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId(pub u64);

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A line's display name, e.g. "신분당선".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineName(String);

impl LineName {
    pub fn parse(s: &str) -> Result<Self, InvalidName> {
        InvalidName::check("line name", s).map(LineName)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A line's display color, e.g. "bg-red-600". Free-form but non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineColor(String);

impl LineColor {
    pub fn parse(s: &str) -> Result<Self, InvalidName> {
        InvalidName::check("line color", s).map(LineColor)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A subway line: a name, a color and a set of sections forming one path.
///
/// The section set is kept unordered; [`ordered_stations`](Self::ordered_stations)
/// derives the running order. Every mutating method builds the new section
/// set off to the side and swaps it in only once it is valid, so a rejected
/// call leaves the line exactly as it was.
///
/// # Examples
///
/// ```
/// use subway_server::domain::*;
///
/// let station = |id, name| Station::new(StationId(id), StationName::parse(name).unwrap());
/// let (gangnam, yeoksam, seolleung) = (station(1, "강남역"), station(2, "역삼역"), station(3, "선릉역"));
///
/// let mut line = Line::new(
///     LineId(1),
///     LineName::parse("신분당선").unwrap(),
///     LineColor::parse("bg-red-600").unwrap(),
///     Section::new(gangnam.clone(), yeoksam.clone(), Distance::new(10).unwrap()).unwrap(),
/// );
/// line.add_section(yeoksam.clone(), seolleung.clone(), Distance::new(10).unwrap()).unwrap();
///
/// assert_eq!(line.ordered_stations().unwrap(), vec![gangnam, yeoksam, seolleung]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    id: LineId,
    name: LineName,
    color: LineColor,
    sections: Vec<Section>,
}

impl Line {
    /// Create a line from its first section.
    pub fn new(id: LineId, name: LineName, color: LineColor, first: Section) -> Self {
        Self {
            id,
            name,
            color,
            sections: vec![first],
        }
    }

    pub fn id(&self) -> LineId {
        self.id
    }

    pub fn name(&self) -> &LineName {
        &self.name
    }

    pub fn color(&self) -> &LineColor {
        &self.color
    }

    /// Sections in storage order, which carries no meaning.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Replace the name and color.
    pub fn update(&mut self, name: LineName, color: LineColor) {
        self.name = name;
        self.color = color;
    }

    /// Whether any section of this line touches `station`.
    pub fn contains(&self, station: &Station) -> bool {
        self.sections.iter().any(|s| s.touches(station))
    }

    /// Stations from the upstream end to the downstream end.
    pub fn ordered_stations(&self) -> Result<Vec<Station>, LineError> {
        Ok(graph::ordered_stations(&self.sections)?)
    }

    /// Upstream-most station.
    pub fn first_station(&self) -> Result<Station, LineError> {
        self.ordered_stations()?
            .into_iter()
            .next()
            .ok_or_else(|| GraphError::Empty.into())
    }

    /// Downstream-most station.
    pub fn last_station(&self) -> Result<Station, LineError> {
        self.ordered_stations()?
            .pop()
            .ok_or_else(|| GraphError::Empty.into())
    }

    /// Insert a section `up -> down`.
    ///
    /// Rules, first match wins:
    /// 1. both stations already on the line: rejected
    /// 2. neither station on the line: rejected
    /// 3. `up` is the last station or `down` is the first: appended as is
    /// 4. otherwise the section at the shared station is split in two, which
    ///    needs `distance` strictly shorter than the section being split
    pub fn add_section(
        &mut self,
        up: Station,
        down: Station,
        distance: Distance,
    ) -> Result<(), LineError> {
        let new = Section::new(up, down, distance)?;
        let (up_id, down_id) = (new.up_station().id(), new.down_station().id());

        let order = self.ordered_stations()?;
        let has_up = order.contains(new.up_station());
        let has_down = order.contains(new.down_station());

        if has_up && has_down {
            return Err(SectionError::AlreadyConnected(up_id, down_id).into());
        }
        if !has_up && !has_down {
            return Err(SectionError::NotConnected(up_id, down_id).into());
        }

        let extends_tail = order.last() == Some(new.up_station());
        let extends_head = order.first() == Some(new.down_station());

        let candidate = if extends_tail || extends_head {
            debug!(line = %self.id, section = %new, "extending line at endpoint");
            let mut sections = self.sections.clone();
            sections.push(new);
            sections
        } else if has_up {
            self.split_downstream_of(new)?
        } else {
            self.split_upstream_of(new)?
        };

        self.commit(candidate, up_id, down_id)
    }

    /// Remove `station`, joining its neighbours if it sits mid-line.
    pub fn remove_section(&mut self, station: &Station) -> Result<(), LineError> {
        if self.sections.len() <= 1 {
            return Err(SectionError::LastSection.into());
        }
        if !self.contains(station) {
            return Err(SectionError::StationNotOnLine(station.id()).into());
        }

        let incoming = self.sections.iter().position(|s| s.down_station() == station);
        let outgoing = self.sections.iter().position(|s| s.up_station() == station);

        let mut sections = self.sections.clone();
        match (incoming, outgoing) {
            (Some(prev), Some(next)) => {
                let (before, after) = (&sections[prev], &sections[next]);
                let distance = before
                    .distance()
                    .checked_add(after.distance())
                    .ok_or(SectionError::DistanceOverflow)?;
                let merged = Section::new(
                    before.up_station().clone(),
                    after.down_station().clone(),
                    distance,
                )?;
                debug!(line = %self.id, station = %station, merged = %merged, "merging sections");
                // Remove the higher index first so the lower one stays valid.
                sections.remove(prev.max(next));
                sections.remove(prev.min(next));
                sections.push(merged);
            }
            (Some(only), None) | (None, Some(only)) => {
                debug!(line = %self.id, station = %station, "dropping endpoint section");
                sections.remove(only);
            }
            (None, None) => return Err(SectionError::StationNotOnLine(station.id()).into()),
        }

        graph::ordered_stations(&sections)?;
        self.sections = sections;
        Ok(())
    }

    /// Split the section leaving `new`'s up station:
    /// `(up -> x, D)` becomes `(up -> down, d)` and `(down -> x, D - d)`.
    fn split_downstream_of(&self, new: Section) -> Result<Vec<Section>, LineError> {
        let cannot = || SectionError::CannotInsert(new.up_station().id(), new.down_station().id());

        let idx = self
            .sections
            .iter()
            .position(|s| s.up_station() == new.up_station())
            .ok_or_else(cannot)?;
        let existing = &self.sections[idx];
        let rest = Self::remainder(existing, &new)?;

        let tail = Section::new(
            new.down_station().clone(),
            existing.down_station().clone(),
            rest,
        )?;
        debug!(line = %self.id, split = %existing, head = %new, tail = %tail, "splitting section");

        let mut sections = self.sections.clone();
        sections[idx] = new;
        sections.push(tail);
        Ok(sections)
    }

    /// Split the section entering `new`'s down station:
    /// `(x -> down, D)` becomes `(x -> up, D - d)` and `(up -> down, d)`.
    fn split_upstream_of(&self, new: Section) -> Result<Vec<Section>, LineError> {
        let cannot = || SectionError::CannotInsert(new.up_station().id(), new.down_station().id());

        let idx = self
            .sections
            .iter()
            .position(|s| s.down_station() == new.down_station())
            .ok_or_else(cannot)?;
        let existing = &self.sections[idx];
        let rest = Self::remainder(existing, &new)?;

        let head = Section::new(
            existing.up_station().clone(),
            new.up_station().clone(),
            rest,
        )?;
        debug!(line = %self.id, split = %existing, head = %head, tail = %new, "splitting section");

        let mut sections = self.sections.clone();
        sections[idx] = head;
        sections.push(new);
        Ok(sections)
    }

    fn remainder(existing: &Section, new: &Section) -> Result<Distance, SectionError> {
        existing
            .distance()
            .remainder(new.distance())
            .ok_or(SectionError::DistanceTooLarge {
                requested: new.distance(),
                available: existing.distance(),
            })
    }

    /// Swap in `candidate` if it still forms a single path.
    fn commit(
        &mut self,
        candidate: Vec<Section>,
        up: StationId,
        down: StationId,
    ) -> Result<(), LineError> {
        if graph::ordered_stations(&candidate).is_err() {
            return Err(SectionError::CannotInsert(up, down).into());
        }
        self.sections = candidate;
        Ok(())
    }
}

#[cfg(test)]
#[path = "line_tests.rs"]
mod tests;
