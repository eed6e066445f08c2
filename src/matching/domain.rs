use std::collections::BTreeMap;
use std::fmt;

/// Compatibility check variant selected by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    #[default]
    Name,
    Rashi,
    Lagna,
}

impl Mode {
    /// Path segment appended to the configured base URL.
    pub fn endpoint(self) -> &'static str {
        match self {
            Mode::Name => "name-match",
            Mode::Rashi => "rashi-match",
            Mode::Lagna => "lagna-match",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::Name => "Name Compatibility",
            Mode::Rashi => "Rashi Compatibility",
            Mode::Lagna => "Lagna Compatibility",
        }
    }

    /// Input fields shown while this mode is active, in display order.
    pub fn fields(self) -> &'static [FormField] {
        match self {
            Mode::Name => &[FormField::Name1, FormField::Name2],
            Mode::Rashi | Mode::Lagna => &[
                FormField::Name1,
                FormField::Dob1,
                FormField::Time1,
                FormField::Name2,
                FormField::Dob2,
                FormField::Time2,
            ],
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Name1,
    Name2,
    Dob1,
    Time1,
    Dob2,
    Time2,
}

/// Values typed into the form. Switching modes never clears them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    values: BTreeMap<FormField, String>,
}

impl FormState {
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    pub fn owned(&self, field: FormField) -> Option<String> {
        self.get(field).map(str::to_string)
    }
}

/// Latitude/longitude pair rounded to one fractional digit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn rounded(lat: f64, lon: f64) -> Self {
        Self {
            lat: round_to_tenth(lat),
            lon: round_to_tenth(lon),
        }
    }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}, {:.1}", self.lat, self.lon)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationSource {
    Device,
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum LocationState {
    #[default]
    Pending,
    Resolved {
        coordinates: Coordinates,
        source: LocationSource,
    },
}

impl LocationState {
    pub fn coordinates(&self) -> Option<Coordinates> {
        match self {
            LocationState::Pending => None,
            LocationState::Resolved { coordinates, .. } => Some(*coordinates),
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, LocationState::Resolved { .. })
    }
}
