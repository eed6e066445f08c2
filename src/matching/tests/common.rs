use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use serde_json::{json, Value};

use crate::config::{ApiConfig, ConfigState};
use crate::matching::alerts::RecordedAlerts;
use crate::matching::domain::{Coordinates, FormField, LocationSource, LocationState};
use crate::matching::gateway::{PreparedSubmission, ScoringError, ScoringGateway};
use crate::matching::session::MatchSession;

pub(super) const BASE_URL: &str = "http://scores.test/api";

pub(super) fn device_location() -> LocationState {
    LocationState::Resolved {
        coordinates: Coordinates { lat: 19.1, lon: 72.9 },
        source: LocationSource::Device,
    }
}

pub(super) fn ready_config() -> ConfigState {
    ConfigState::Ready(ApiConfig::new(BASE_URL))
}

pub(super) fn session_with(
    config: ConfigState,
    location: LocationState,
) -> (MatchSession, RecordedAlerts) {
    let alerts = RecordedAlerts::default();
    let mut session = MatchSession::new(Arc::new(alerts.clone()));
    session.apply_config(config);
    session.apply_location(location);
    (session, alerts)
}

pub(super) fn ready_session() -> (MatchSession, RecordedAlerts) {
    session_with(ready_config(), device_location())
}

pub(super) fn fill_birth_details(session: &mut MatchSession) {
    session.set_field(FormField::Name1, "Arjun");
    session.set_field(FormField::Dob1, "1994-03-12");
    session.set_field(FormField::Time1, "06:45");
    session.set_field(FormField::Name2, "Meera");
    session.set_field(FormField::Dob2, "1996-11-02");
    session.set_field(FormField::Time2, "21:10");
}

pub(super) fn score_body() -> Value {
    json!({
        "name1": "Arjun",
        "name2": "Meera",
        "compatibility_percent": 78,
        "description": "Strong emotional bond."
    })
}

#[derive(Debug, Clone)]
pub(super) enum StubReply {
    Body(Value),
    Down,
}

/// Gateway double that records every submission and replays scripted replies.
#[derive(Debug, Clone, Default)]
pub(super) struct StubGateway {
    replies: Arc<Mutex<VecDeque<StubReply>>>,
    seen: Arc<Mutex<Vec<PreparedSubmission>>>,
}

impl StubGateway {
    pub(super) fn replying(replies: impl IntoIterator<Item = StubReply>) -> Self {
        let gateway = Self::default();
        gateway
            .replies
            .lock()
            .expect("reply mutex poisoned")
            .extend(replies);
        gateway
    }

    pub(super) fn submissions(&self) -> Vec<PreparedSubmission> {
        self.seen.lock().expect("submission mutex poisoned").clone()
    }
}

impl ScoringGateway for StubGateway {
    async fn score(&self, submission: &PreparedSubmission) -> Result<Value, ScoringError> {
        self.seen
            .lock()
            .expect("submission mutex poisoned")
            .push(submission.clone());
        let reply = self
            .replies
            .lock()
            .expect("reply mutex poisoned")
            .pop_front()
            .unwrap_or(StubReply::Down);
        match reply {
            StubReply::Body(body) => Ok(body),
            StubReply::Down => Err(ScoringError::Status {
                status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
            }),
        }
    }
}
