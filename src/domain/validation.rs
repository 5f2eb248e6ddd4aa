use validator::Validate;

use crate::entities::graduate::{NewGraduate, UpdateGraduateRequest};

/// Creation check: required scalars, `ponderado` in (0, 20], and company,
/// role and start date on every experience entry.
pub fn is_valid_for_creation(draft: &NewGraduate) -> bool {
    match draft.validate() {
        Ok(()) => true,
        Err(errors) => {
            tracing::debug!("Creation draft rejected: {}", errors);
            false
        }
    }
}

/// Update check: only the id and a non-empty change description are
/// required. Range and experience fields are left to the backend.
pub fn is_valid_for_update(request: &UpdateGraduateRequest) -> bool {
    request.has_required_fields()
}
