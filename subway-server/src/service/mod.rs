//! Application services.
//!
//! Thin orchestration over the repositories: look things up by id, then let
//! the domain types decide.

mod error;
mod line;
mod station;

pub use error::ServiceError;
pub use line::{LineService, NewLine, SectionRequest};
pub use station::StationService;
