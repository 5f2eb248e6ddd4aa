use serde_json::Value;

use super::fields::{Draft, ExperienceField, GraduateField};
use crate::entities::graduate::NewGraduate;
use crate::errors::ClientError;
use crate::repositories::admin_api::AdminApi;
use crate::validation::is_valid_for_creation;

/// State behind the "register graduate" form. Edits are not validated
/// until `submit`, which borrows the form mutably for the whole call so a
/// second submission cannot start while one is in flight.
#[derive(Debug, Default)]
pub struct RegisterForm {
    draft: NewGraduate,
}

impl RegisterForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &NewGraduate {
        &self.draft
    }

    pub fn set_field(&mut self, field: GraduateField, value: &str) -> Result<(), ClientError> {
        self.draft.set_field(field, value)
    }

    pub fn add_experience(&mut self) {
        self.draft.add_experience();
    }

    pub fn remove_experience(&mut self, index: usize) {
        self.draft.remove_experience(index);
    }

    pub fn set_experience_field(&mut self, index: usize, field: ExperienceField, value: &str) {
        self.draft.set_experience_field(index, field, value);
    }

    pub fn is_valid(&self) -> bool {
        is_valid_for_creation(&self.draft)
    }

    pub fn reset(&mut self) {
        self.draft = NewGraduate::default();
    }

    /// Validates, then posts the draft. The draft is cleared only on success.
    pub async fn submit<A>(&mut self, api: &A) -> Result<Value, ClientError>
    where
        A: AdminApi + ?Sized,
    {
        if !self.is_valid() {
            return Err(ClientError::IncompleteFields);
        }

        match api.register_graduate(&self.draft).await {
            Ok(created) => {
                self.reset();
                Ok(created)
            }
            Err(e) => {
                tracing::warn!("Graduate registration failed: {}", e);
                Err(e)
            }
        }
    }
}
