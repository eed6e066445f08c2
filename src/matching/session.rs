use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, info, warn};

use super::alerts::{Alert, AlertSink};
use super::domain::{FormField, FormState, LocationState, Mode};
use super::gateway::{PreparedSubmission, ScoringError, ScoringGateway};
use super::location::{
    acquire_location, fallback_state, LocationProvider, FALLBACK_LOCATION,
};
use super::payload::MatchPayload;
use super::result::{MatchResult, ResultView};
use crate::config::{remote::load_api_config, ConfigSource, ConfigState};

/// Whether each startup task has finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Readiness {
    pub config_ready: bool,
    pub location_resolved: bool,
}

impl Readiness {
    pub fn is_ready(self) -> bool {
        self.config_ready && self.location_resolved
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("a submission is already in flight")]
    InFlight,
    #[error("configuration has not been loaded")]
    ConfigNotReady,
}

/// One form session: configuration, location, field values and the latest result.
#[derive(Debug)]
pub struct MatchSession {
    config: ConfigState,
    location: LocationState,
    mode: Mode,
    form: FormState,
    result: Option<MatchResult>,
    in_flight: bool,
    alerts: Arc<dyn AlertSink>,
}

impl MatchSession {
    pub fn new(alerts: Arc<dyn AlertSink>) -> Self {
        Self {
            config: ConfigState::Loading,
            location: LocationState::Pending,
            mode: Mode::default(),
            form: FormState::default(),
            result: None,
            in_flight: false,
            alerts,
        }
    }

    /// Loads configuration and acquires the location concurrently.
    pub async fn start<P>(
        client: &reqwest::Client,
        source: &ConfigSource,
        provider: &P,
        alerts: Arc<dyn AlertSink>,
    ) -> Self
    where
        P: LocationProvider,
    {
        let (config, location) = tokio::join!(
            load_api_config(client, source),
            acquire_location(provider)
        );

        let mut session = Self::new(alerts);
        session.apply_config(config);
        session.apply_location(location);
        session
    }

    /// Records the configuration outcome. Only the first outcome is kept.
    pub fn apply_config(&mut self, state: ConfigState) {
        if !matches!(self.config, ConfigState::Loading) {
            debug!("configuration already settled; ignoring late outcome");
            return;
        }
        self.config = state;
    }

    /// Records the location outcome. Only the first resolution is kept.
    pub fn apply_location(&mut self, state: LocationState) {
        if self.location.is_resolved() {
            debug!("location already resolved; ignoring late outcome");
            return;
        }
        self.location = state;
    }

    pub fn readiness(&self) -> Readiness {
        Readiness {
            config_ready: self.config.is_ready(),
            location_resolved: self.location.is_resolved(),
        }
    }

    /// True when the submit control should be enabled.
    pub fn can_submit(&self) -> bool {
        self.readiness().is_ready() && !self.in_flight
    }

    pub fn config(&self) -> &ConfigState {
        &self.config
    }

    pub fn location(&self) -> LocationState {
        self.location
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Switches mode. Previously typed values are kept, including ones the new
    /// mode does not display.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        self.form.set(field, value);
    }

    /// Fields the active mode displays that are still empty.
    pub fn blank_fields(&self) -> Vec<FormField> {
        self.mode
            .fields()
            .iter()
            .copied()
            .filter(|field| self.form.get(*field).map_or(true, str::is_empty))
            .collect()
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight
    }

    pub fn result(&self) -> Option<&MatchResult> {
        self.result.as_ref()
    }

    pub fn view(&self) -> Option<ResultView> {
        ResultView::render(self.result.as_ref())
    }

    /// Runs the synchronous submit checks and builds the request.
    ///
    /// On success the session is marked in flight until [`Self::complete`].
    pub fn begin_submission(&mut self) -> Result<PreparedSubmission, SubmitError> {
        if self.in_flight {
            return Err(SubmitError::InFlight);
        }

        let api = match self.config.api() {
            Some(api) => api.clone(),
            None => {
                self.alerts.alert(Alert::ConfigNotLoaded);
                return Err(SubmitError::ConfigNotReady);
            }
        };

        let coordinates = match self.location.coordinates() {
            Some(coordinates) => coordinates,
            None => {
                self.alerts.alert(Alert::LocationFallback);
                warn!("location unresolved at submit; forcing fallback");
                self.location = fallback_state();
                FALLBACK_LOCATION
            }
        };

        self.result = None;
        self.in_flight = true;

        let blank = self.blank_fields();
        if !blank.is_empty() {
            debug!(mode = %self.mode, ?blank, "submitting with empty fields");
        }

        let payload = MatchPayload::build(self.mode, &self.form, coordinates);
        let url = api.endpoint_url(self.mode.endpoint());
        info!(mode = %self.mode, %url, "submitting compatibility check");

        Ok(PreparedSubmission {
            mode: self.mode,
            url,
            payload,
        })
    }

    /// Stores the outcome of the request and re-enables submission.
    pub fn complete(&mut self, outcome: Result<Value, ScoringError>) -> &MatchResult {
        let result = match outcome {
            Ok(body) => MatchResult::from_response(body),
            Err(err) => {
                error!(error = %err, detail = ?err, "API error");
                MatchResult::generic_failure()
            }
        };

        self.in_flight = false;
        self.result.insert(result)
    }

    /// Full submit cycle: checks, one request, stored result.
    pub async fn submit<G>(&mut self, gateway: &G) -> Result<&MatchResult, SubmitError>
    where
        G: ScoringGateway,
    {
        let prepared = self.begin_submission()?;
        let outcome = gateway.score(&prepared).await;
        Ok(self.complete(outcome))
    }
}
