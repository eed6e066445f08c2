use std::fmt::Debug;
use std::sync::{Arc, Mutex};

/// Blocking notices raised while validating a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alert {
    ConfigNotLoaded,
    LocationFallback,
}

impl Alert {
    pub fn message(self) -> &'static str {
        match self {
            Alert::ConfigNotLoaded => "Config not loaded yet!",
            Alert::LocationFallback => "Location not available, using Ayodhya.",
        }
    }
}

/// Where user-facing alerts are delivered.
pub trait AlertSink: Debug + Send + Sync {
    fn alert(&self, alert: Alert);
}

/// Writes alerts to stderr so stdout stays reserved for the result.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleAlerts;

impl AlertSink for ConsoleAlerts {
    fn alert(&self, alert: Alert) {
        eprintln!("! {}", alert.message());
    }
}

/// Keeps every alert in memory, for embedding front ends and tests.
#[derive(Debug, Clone, Default)]
pub struct RecordedAlerts {
    events: Arc<Mutex<Vec<Alert>>>,
}

impl RecordedAlerts {
    pub fn events(&self) -> Vec<Alert> {
        self.events.lock().expect("alert mutex poisoned").clone()
    }
}

impl AlertSink for RecordedAlerts {
    fn alert(&self, alert: Alert) {
        let mut guard = self.events.lock().expect("alert mutex poisoned");
        guard.push(alert);
    }
}
