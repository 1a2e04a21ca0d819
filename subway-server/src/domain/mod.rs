//! Domain types for subway lines.
//!
//! Stations, sections and lines enforce their invariants at construction
//! time and on every mutation, so code holding a `Line` can trust that its
//! sections form a single path from one terminus to the other.

mod error;
mod graph;
mod line;
mod section;
mod station;

pub use error::{GraphError, LineError, SectionError};
pub use graph::{LineGraph, ordered_stations};
pub use line::{Line, LineColor, LineId, LineName};
pub use section::{Distance, InvalidDistance, Section};
pub use station::{InvalidName, Station, StationId, StationName};
