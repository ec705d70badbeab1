//! State machine behind the prediction form.
//!
//! The controller owns the raw field values, the current validation errors,
//! the loading flag and the last successful prediction. Submitting is split in
//! two halves so that callers can run the actual prediction on whatever async
//! runtime they have: [`FormController::begin_submission`] validates and flips
//! into the loading state, [`FormController::complete_submission`] stores the
//! outcome and leaves it.
//!
//! Editing a field only clears that field's own error. Errors on other fields
//! stay until the next full validation pass.

use thiserror::Error;
use tracing::{debug, info, trace, warn};

use crate::events::RecentEvent;
use crate::form::{FormData, FormField, ValidationErrors};
use crate::prediction::Prediction;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// Validation failed, the errors are available from [`FormController::errors`].
    #[error("{0} field(s) failed validation")]
    Invalid(usize),

    #[error("a prediction is already in progress")]
    AlreadyLoading,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormController {
    form: FormData,
    errors: ValidationErrors,
    loading: bool,
    prediction: Option<Prediction>,
    alert: Option<String>,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Controller pre-filled with already collected values, no errors yet.
    pub fn with_form(form: FormData) -> Self {
        Self {
            form,
            ..Self::default()
        }
    }

    pub fn form(&self) -> &FormData {
        &self.form
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn prediction(&self) -> Option<&Prediction> {
        self.prediction.as_ref()
    }

    /// Message to show after a failed prediction.
    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    /// Store a keystroke. The value is kept as typed, even if invalid.
    pub fn update_field(&mut self, field: FormField, raw: impl Into<String>) {
        self.form.set(field, raw);
        if self.errors.remove(field).is_some() {
            trace!("Cleared error for field {}", field.name());
        }
    }

    /// Run every field check and replace the error map with the result.
    pub fn validate(&mut self) -> bool {
        match self.form.validate() {
            Ok(_) => {
                self.errors.clear();
                true
            }
            Err(errors) => {
                debug!("Form has {} invalid field(s)", errors.len());
                self.errors = errors;
                false
            }
        }
    }

    /// Validate and enter the loading state.
    ///
    /// Returns the form snapshot to hand to a predictor.
    pub fn begin_submission(&mut self) -> Result<FormData, SubmitError> {
        if self.loading {
            warn!("Submission ignored, prediction already in progress");
            return Err(SubmitError::AlreadyLoading);
        }

        if !self.validate() {
            return Err(SubmitError::Invalid(self.errors.len()));
        }

        info!("Submitting prediction form");
        self.loading = true;
        self.alert = None;
        Ok(self.form.clone())
    }

    /// Leave the loading state with the predictor's outcome.
    ///
    /// A failure keeps the previous prediction and raises an alert.
    pub fn complete_submission(&mut self, outcome: Result<Prediction, String>) {
        self.loading = false;
        match outcome {
            Ok(prediction) => {
                info!(
                    "Prediction stored: magnitude {:.2}",
                    prediction.result.magnitude
                );
                self.prediction = Some(prediction);
            }
            Err(reason) => {
                warn!("Prediction failed: {}", reason);
                self.alert = Some(format!("Prediction failed: {}", reason));
            }
        }
    }

    /// Fill the form with the sample values.
    pub fn load_example(&mut self) {
        self.form = FormData::example();
        self.errors.clear();
    }

    /// Fill the form from a recent event.
    pub fn load_event(&mut self, event: &RecentEvent) {
        debug!("Loading event {} into the form", event.id);
        self.form = event.to_form_data();
        self.errors.clear();
    }

    /// Empty every field and forget the errors. The last prediction stays.
    pub fn reset(&mut self) {
        self.form = FormData::default();
        self.errors.clear();
    }
}
