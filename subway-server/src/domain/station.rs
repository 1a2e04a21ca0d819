//! Station identity types.

use std::fmt;

/// Error returned when a display name is blank.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {field}: {reason}")]
pub struct InvalidName {
    pub(crate) field: &'static str,
    pub(crate) reason: &'static str,
}

impl InvalidName {
    /// Trim `raw` and reject it if nothing is left.
    pub(crate) fn check(field: &'static str, raw: &str) -> Result<String, Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(InvalidName {
                field,
                reason: "must not be blank",
            });
        }
        Ok(trimmed.to_string())
    }
}

/// Identifier assigned to a station by the station registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationId(pub u64);

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A station's display label.
///
/// Always non-empty with surrounding whitespace removed.
///
/// # Examples
///
/// ```
/// use subway_server::domain::StationName;
///
/// let name = StationName::parse("  강남역 ").unwrap();
/// assert_eq!(name.as_str(), "강남역");
///
/// assert!(StationName::parse("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct StationName(String);

impl StationName {
    /// Parse a station name, trimming whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidName> {
        InvalidName::check("station name", s).map(StationName)
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationName({})", self.0)
    }
}

impl fmt::Display for StationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named stop.
///
/// Stations compare by id only: two values with the same id are the same
/// station even if one was read before a rename elsewhere.
#[derive(Debug, Clone)]
pub struct Station {
    id: StationId,
    name: StationName,
}

impl Station {
    /// Create a station with an already-assigned id.
    pub fn new(id: StationId, name: StationName) -> Self {
        Self { id, name }
    }

    pub fn id(&self) -> StationId {
        self.id
    }

    pub fn name(&self) -> &StationName {
        &self.name
    }
}

impl PartialEq for Station {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Station {}

impl std::hash::Hash for Station {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.name, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(id: u64, name: &str) -> Station {
        Station::new(StationId(id), StationName::parse(name).unwrap())
    }

    #[test]
    fn parse_trims_whitespace() {
        let name = StationName::parse("\t역삼역\n").unwrap();
        assert_eq!(name.as_str(), "역삼역");
    }

    #[test]
    fn reject_blank_names() {
        assert!(StationName::parse("").is_err());
        assert!(StationName::parse("   ").is_err());

        let err = StationName::parse("").unwrap_err();
        assert_eq!(err.to_string(), "invalid station name: must not be blank");
    }

    #[test]
    fn equality_is_by_id() {
        let a = station(1, "강남역");
        let b = station(1, "Gangnam");
        let c = station(2, "강남역");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn hash_consistent_with_eq() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(station(1, "강남역"));
        assert!(set.contains(&station(1, "anything")));
        assert!(!set.contains(&station(2, "강남역")));
    }

    #[test]
    fn display() {
        assert_eq!(station(3, "선릉역").to_string(), "선릉역#3");
        assert_eq!(format!("{:?}", StationName::parse("삼성역").unwrap()), "StationName(삼성역)");
    }
}
