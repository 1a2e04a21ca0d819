//! Domain error types.
//!
//! `SectionError` covers requests that would break a line's topology; these
//! are caller mistakes and are never retried. `GraphError` means a line's
//! section set is already illegal, which only a bug can cause.

use super::{Distance, StationId};

/// A section insertion or removal that the line refuses.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SectionError {
    /// Both stations are already on the line
    #[error("stations {0} and {1} are already connected on this line")]
    AlreadyConnected(StationId, StationId),

    /// Neither station is on the line
    #[error("neither station {0} nor {1} is connected to this line")]
    NotConnected(StationId, StationId),

    /// Split would leave a non-positive remainder
    #[error("section distance {requested} must be shorter than the section it splits ({available})")]
    DistanceTooLarge {
        requested: Distance,
        available: Distance,
    },

    /// Request matched no insertion rule
    #[error("cannot insert section {0} -> {1}")]
    CannotInsert(StationId, StationId),

    /// Removing would leave the line with no sections
    #[error("line must have at least one section")]
    LastSection,

    /// Named station is not part of the line
    #[error("station {0} is not on this line")]
    StationNotOnLine(StationId),

    /// Up and down station are the same
    #[error("section cannot start and end at station {0}")]
    SameStation(StationId),

    /// Merged distance does not fit
    #[error("merged section distance is too large")]
    DistanceOverflow,
}

/// A line's section set does not form a single simple path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("line has no sections")]
    Empty,

    /// Two sections leave, or two sections enter, the same station
    #[error("line branches at station {0}")]
    Branch(StationId),

    #[error("line contains a cycle")]
    Cycle,

    /// Walk from the source did not reach every section
    #[error("line is disconnected: walked {walked} of {total} sections")]
    Disconnected { walked: usize, total: usize },
}

/// Any failure from a `Line` operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LineError {
    #[error(transparent)]
    Section(#[from] SectionError),

    #[error("internal consistency error: {0}")]
    Graph(#[from] GraphError),
}

impl LineError {
    /// Whether the line itself is broken, as opposed to the request.
    pub fn is_internal(&self) -> bool {
        matches!(self, LineError::Graph(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = SectionError::AlreadyConnected(StationId(1), StationId(2));
        assert_eq!(
            err.to_string(),
            "stations 1 and 2 are already connected on this line"
        );

        let err = SectionError::DistanceTooLarge {
            requested: Distance::new(10).unwrap(),
            available: Distance::new(7).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "section distance 10 must be shorter than the section it splits (7)"
        );

        let err = SectionError::LastSection;
        assert_eq!(err.to_string(), "line must have at least one section");

        let err = GraphError::Disconnected {
            walked: 1,
            total: 3,
        };
        assert_eq!(
            err.to_string(),
            "line is disconnected: walked 1 of 3 sections"
        );

        let err = LineError::from(GraphError::Cycle);
        assert_eq!(
            err.to_string(),
            "internal consistency error: line contains a cycle"
        );
        assert!(err.is_internal());
    }
}
