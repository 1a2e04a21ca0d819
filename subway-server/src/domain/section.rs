//! Sections: directed, weighted edges between two stations.

use std::fmt;

use super::error::SectionError;
use super::station::Station;

/// Error returned when a distance is not positive.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid distance {0}: must be greater than zero")]
pub struct InvalidDistance(pub i64);

/// A positive section length.
///
/// # Examples
///
/// ```
/// use subway_server::domain::Distance;
///
/// let d = Distance::new(10).unwrap();
/// assert_eq!(d.get(), 10);
///
/// assert!(Distance::new(0).is_err());
/// assert!(Distance::new(-3).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Distance(u32);

impl Distance {
    /// Validate a raw distance. Zero, negative and out-of-range values are rejected.
    pub fn new(raw: i64) -> Result<Self, InvalidDistance> {
        match u32::try_from(raw) {
            Ok(v) if v > 0 => Ok(Distance(v)),
            _ => Err(InvalidDistance(raw)),
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Length left over after carving `part` off this distance.
    ///
    /// `None` unless `part` is strictly shorter.
    pub fn remainder(self, part: Distance) -> Option<Distance> {
        match self.0.checked_sub(part.0) {
            Some(v) if v > 0 => Some(Distance(v)),
            _ => None,
        }
    }

    /// Sum of two distances, `None` on overflow.
    pub fn checked_add(self, other: Distance) -> Option<Distance> {
        self.0.checked_add(other.0).map(Distance)
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A directed edge `up -> down` on one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    up: Station,
    down: Station,
    distance: Distance,
}

impl Section {
    /// Create a section. The two stations must differ.
    pub fn new(up: Station, down: Station, distance: Distance) -> Result<Self, SectionError> {
        if up == down {
            return Err(SectionError::SameStation(up.id()));
        }
        Ok(Self { up, down, distance })
    }

    pub fn up_station(&self) -> &Station {
        &self.up
    }

    pub fn down_station(&self) -> &Station {
        &self.down
    }

    pub fn distance(&self) -> Distance {
        self.distance
    }

    /// Whether either end of this section is `station`.
    pub fn touches(&self, station: &Station) -> bool {
        &self.up == station || &self.down == station
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} ({})", self.up, self.down, self.distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{StationId, StationName};

    fn station(id: u64, name: &str) -> Station {
        Station::new(StationId(id), StationName::parse(name).unwrap())
    }

    fn d(v: i64) -> Distance {
        Distance::new(v).unwrap()
    }

    #[test]
    fn distance_rejects_non_positive() {
        assert_eq!(Distance::new(0), Err(InvalidDistance(0)));
        assert_eq!(Distance::new(-1), Err(InvalidDistance(-1)));
        assert!(Distance::new(i64::from(u32::MAX) + 1).is_err());
        assert!(Distance::new(1).is_ok());
    }

    #[test]
    fn remainder_requires_strictly_shorter_part() {
        assert_eq!(d(10).remainder(d(3)), Some(d(7)));
        assert_eq!(d(10).remainder(d(10)), None);
        assert_eq!(d(10).remainder(d(11)), None);
    }

    #[test]
    fn checked_add_detects_overflow() {
        assert_eq!(d(10).checked_add(d(5)), Some(d(15)));
        let max = Distance::new(i64::from(u32::MAX)).unwrap();
        assert_eq!(max.checked_add(d(1)), None);
    }

    #[test]
    fn section_rejects_loop() {
        let a = station(1, "강남역");
        let err = Section::new(a.clone(), a, d(10)).unwrap_err();
        assert_eq!(err, SectionError::SameStation(StationId(1)));
    }

    #[test]
    fn touches_either_end() {
        let a = station(1, "강남역");
        let b = station(2, "역삼역");
        let c = station(3, "선릉역");
        let s = Section::new(a.clone(), b.clone(), d(10)).unwrap();

        assert!(s.touches(&a));
        assert!(s.touches(&b));
        assert!(!s.touches(&c));
        assert_eq!(s.to_string(), "강남역#1 -> 역삼역#2 (10)");
    }
}
