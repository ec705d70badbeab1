//! Prediction form fields and their validation rules.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, trace};
use utoipa::ToSchema;

/// One of the seven seismic parameters collected by the prediction form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FormField {
    Latitude,
    Longitude,
    Depth,
    Nst,
    Gap,
    Clo,
    Rms,
}

impl FormField {
    /// All fields in display order.
    pub const ALL: [FormField; 7] = [
        FormField::Latitude,
        FormField::Longitude,
        FormField::Depth,
        FormField::Nst,
        FormField::Gap,
        FormField::Clo,
        FormField::Rms,
    ];

    /// Wire / HTML input name.
    pub fn name(self) -> &'static str {
        match self {
            FormField::Latitude => "latitude",
            FormField::Longitude => "longitude",
            FormField::Depth => "depth",
            FormField::Nst => "nst",
            FormField::Gap => "gap",
            FormField::Clo => "clo",
            FormField::Rms => "rms",
        }
    }

    /// Human readable label.
    pub fn label(self) -> &'static str {
        match self {
            FormField::Latitude => "Latitude",
            FormField::Longitude => "Longitude",
            FormField::Depth => "Depth (km)",
            FormField::Nst => "NST",
            FormField::Gap => "Gap",
            FormField::Clo => "CLO",
            FormField::Rms => "RMS",
        }
    }

    /// Input step hint for number inputs.
    pub fn step(self) -> &'static str {
        match self {
            FormField::Latitude | FormField::Longitude => "0.000001",
            FormField::Depth | FormField::Gap | FormField::Clo => "0.1",
            FormField::Nst => "1",
            FormField::Rms => "0.01",
        }
    }

    /// Closed range the value must fall in, if the field has one.
    pub fn range(self) -> Option<(f64, f64)> {
        match self {
            FormField::Latitude => Some((-90.0, 90.0)),
            FormField::Longitude => Some((-180.0, 180.0)),
            _ => None,
        }
    }

    /// Check a single raw value against this field's rules.
    pub fn check(self, raw: &str) -> Result<f64, FieldError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(FieldError::MissingValue { field: self });
        }

        let value = match trimmed.parse::<f64>() {
            Ok(v) if v.is_finite() => v,
            _ => return Err(FieldError::NotANumber { field: self }),
        };

        if let Some((min, max)) = self.range() {
            if !(min..=max).contains(&value) {
                return Err(FieldError::OutOfRange { field: self, min, max });
            }
        }

        if self == FormField::Depth && value <= 0.0 {
            return Err(FieldError::NonPositive { field: self });
        }

        Ok(value)
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FormField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormField::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| format!("Unknown form field: {}", s))
    }
}

/// Why a single field was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    #[error("{field} is required")]
    MissingValue { field: FormField },

    #[error("{field} must be a valid number")]
    NotANumber { field: FormField },

    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: FormField, min: f64, max: f64 },

    #[error("{field} must be greater than 0")]
    NonPositive { field: FormField },
}

impl FieldError {
    pub fn field(&self) -> FormField {
        match self {
            FieldError::MissingValue { field }
            | FieldError::NotANumber { field }
            | FieldError::OutOfRange { field, .. }
            | FieldError::NonPositive { field } => *field,
        }
    }
}

/// Field errors keyed by field. At most one error per field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors(BTreeMap<FormField, FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, error: FieldError) {
        self.0.insert(error.field(), error);
    }

    pub fn remove(&mut self, field: FormField) -> Option<FieldError> {
        self.0.remove(&field)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn get(&self, field: FormField) -> Option<&FieldError> {
        self.0.get(&field)
    }

    pub fn contains(&self, field: FormField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.values()
    }

    /// Field wire name to message, for JSON payloads.
    pub fn to_messages(&self) -> BTreeMap<String, String> {
        self.0
            .iter()
            .map(|(field, error)| (field.name().to_string(), error.to_string()))
            .collect()
    }
}

/// Raw, user-entered values of the prediction form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FormData {
    #[serde(default)]
    pub latitude: String,
    #[serde(default)]
    pub longitude: String,
    #[serde(default)]
    pub depth: String,
    #[serde(default)]
    pub nst: String,
    #[serde(default)]
    pub gap: String,
    #[serde(default)]
    pub clo: String,
    #[serde(default)]
    pub rms: String,
}

impl FormData {
    /// Sample values used by the "load example" button.
    pub fn example() -> Self {
        Self {
            latitude: "35.6895".to_string(),
            longitude: "139.6917".to_string(),
            depth: "10.0".to_string(),
            nst: "35".to_string(),
            gap: "45.5".to_string(),
            clo: "1.2".to_string(),
            rms: "0.85".to_string(),
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Latitude => &self.latitude,
            FormField::Longitude => &self.longitude,
            FormField::Depth => &self.depth,
            FormField::Nst => &self.nst,
            FormField::Gap => &self.gap,
            FormField::Clo => &self.clo,
            FormField::Rms => &self.rms,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::Latitude => &mut self.latitude,
            FormField::Longitude => &mut self.longitude,
            FormField::Depth => &mut self.depth,
            FormField::Nst => &mut self.nst,
            FormField::Gap => &mut self.gap,
            FormField::Clo => &mut self.clo,
            FormField::Rms => &mut self.rms,
        };
        *slot = value.into();
    }

    /// Validate every field. Collects all errors instead of stopping at the first.
    pub fn validate(&self) -> Result<SeismicParameters, ValidationErrors> {
        trace!("Validating prediction form");
        let mut errors = ValidationErrors::new();
        let mut values = [0.0_f64; 7];

        for (slot, field) in values.iter_mut().zip(FormField::ALL) {
            match field.check(self.get(field)) {
                Ok(value) => *slot = value,
                Err(error) => {
                    debug!("Field {} rejected: {}", field.name(), error);
                    errors.insert(error);
                }
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        let [latitude, longitude, depth, nst, gap, clo, rms] = values;
        Ok(SeismicParameters {
            latitude,
            longitude,
            depth,
            nst,
            gap,
            clo,
            rms,
        })
    }
}

/// Parsed, validated form values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SeismicParameters {
    pub latitude: f64,
    pub longitude: f64,
    pub depth: f64,
    pub nst: f64,
    pub gap: f64,
    pub clo: f64,
    pub rms: f64,
}
