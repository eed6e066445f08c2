use serde::Serialize;

use super::domain::{Coordinates, FormField, FormState, Mode};

/// Request body for `name-match`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name2: Option<String>,
}

/// Request body for `rashi-match` and `lagna-match`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BirthPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name1: Option<String>,
    pub dob1: String,
    pub lat1: f64,
    pub lon1: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name2: Option<String>,
    pub dob2: String,
    pub lat2: f64,
    pub lon2: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MatchPayload {
    Name(NamePayload),
    Birth(BirthPayload),
}

impl MatchPayload {
    /// Builds the body for `mode`. Location is ignored in name mode.
    pub fn build(mode: Mode, form: &FormState, location: Coordinates) -> Self {
        match mode {
            Mode::Name => MatchPayload::Name(NamePayload {
                name1: form.owned(FormField::Name1),
                name2: form.owned(FormField::Name2),
            }),
            Mode::Rashi | Mode::Lagna => MatchPayload::Birth(BirthPayload {
                name1: form.owned(FormField::Name1),
                dob1: birth_moment(form.get(FormField::Dob1), form.get(FormField::Time1)),
                lat1: location.lat,
                lon1: location.lon,
                name2: form.owned(FormField::Name2),
                dob2: birth_moment(form.get(FormField::Dob2), form.get(FormField::Time2)),
                lat2: location.lat,
                lon2: location.lon,
            }),
        }
    }
}

/// `"<date> <time>"`, or an empty string when either half is missing.
pub fn birth_moment(date: Option<&str>, time: Option<&str>) -> String {
    match (date, time) {
        (Some(date), Some(time)) if !date.is_empty() && !time.is_empty() => {
            format!("{date} {time}")
        }
        _ => String::new(),
    }
}
