//! Compatibility form orchestration: field state, location, payloads,
//! the outbound scoring call and rendering of whatever comes back.

pub mod alerts;
pub mod domain;
pub mod gateway;
pub mod location;
pub mod payload;
pub mod result;
pub mod session;

#[cfg(test)]
mod tests;

pub use alerts::{Alert, AlertSink, ConsoleAlerts, RecordedAlerts};
pub use domain::{Coordinates, FormField, FormState, LocationSource, LocationState, Mode};
pub use gateway::{HttpScoringGateway, PreparedSubmission, ScoringError, ScoringGateway};
pub use location::{
    acquire_location, LocationError, LocationProvider, NoPositionSource, ReportedPosition,
    FALLBACK_LOCATION,
};
pub use payload::{birth_moment, BirthPayload, MatchPayload, NamePayload};
pub use result::{MatchReport, MatchResult, ResultView, GENERIC_FAILURE, NO_DATA_NOTICE};
pub use session::{MatchSession, Readiness, SubmitError};
