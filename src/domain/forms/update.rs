use serde_json::Value;

use super::fields::{Draft, ExperienceField, GraduateField};
use crate::entities::graduate::{unwrap_double_encoded, ChangeRecord, Graduate, GraduateUpdate};
use crate::entities::user::SessionUser;
use crate::errors::ClientError;
use crate::repositories::admin_api::{AdminApi, ApiReply};

/// Reviewer id used when the session does not identify the user.
pub const FALLBACK_REVIEWER_ID: i64 = 1;

/// Turns a `getGraduate` reply into a graduate.
///
/// Error-shaped bodies (`{"error": "..."}`) are never read as data, even
/// when the error string itself holds JSON; the message inside is surfaced.
pub fn decode_graduate_reply(reply: ApiReply) -> Result<Graduate, ClientError> {
    let body = unwrap_double_encoded(reply.body);

    if let Some(Value::String(raw)) = body.get("error") {
        let inner = unwrap_double_encoded(Value::String(raw.clone()));
        let message = inner
            .get("message")
            .or_else(|| inner.get("error"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| raw.clone());

        return Err(ClientError::Request {
            status: reply.status,
            message,
        });
    }

    let graduate: Graduate = serde_json::from_value(body)?;
    if graduate.id == 0 {
        return Err(ClientError::InvalidPayload("graduate without id".to_string()));
    }
    Ok(graduate)
}

/// What an accepted update left in the form.
#[derive(Debug, PartialEq)]
pub enum UpdateOutcome {
    /// Saved and re-fetched.
    Refreshed(Graduate),
    /// Saved, but the re-fetch failed. The form shows the submitted values.
    RefreshFailed(ClientError),
}

impl UpdateOutcome {
    pub fn graduate(&self) -> Option<&Graduate> {
        match self {
            UpdateOutcome::Refreshed(graduate) => Some(graduate),
            UpdateOutcome::RefreshFailed(_) => None,
        }
    }
}

/// State behind the "update graduate" dialog: the record as fetched, the
/// working copy and the change description.
#[derive(Debug)]
pub struct UpdateForm {
    id: i64,
    pristine: Option<Graduate>,
    draft: Option<Graduate>,
    descripcion: String,
}

impl UpdateForm {
    pub fn new(id: i64) -> Self {
        UpdateForm {
            id,
            pristine: None,
            draft: None,
            descripcion: String::new(),
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn pristine(&self) -> Option<&Graduate> {
        self.pristine.as_ref()
    }

    pub fn draft(&self) -> Option<&Graduate> {
        self.draft.as_ref()
    }

    pub fn description(&self) -> &str {
        &self.descripcion
    }

    pub fn is_dirty(&self) -> bool {
        self.draft != self.pristine
    }

    /// Fetches the record and replaces both copies. The description is cleared.
    pub async fn load<A>(&mut self, api: &A) -> Result<&Graduate, ClientError>
    where
        A: AdminApi + ?Sized,
    {
        let reply = api.get_graduate(self.id).await?;
        let graduate = decode_graduate_reply(reply).inspect_err(|e| {
            tracing::warn!(id = self.id, "Could not load graduate: {}", e);
        })?;

        self.pristine = Some(graduate.clone());
        self.descripcion.clear();
        let loaded = self.draft.insert(graduate);
        Ok(&*loaded)
    }

    fn draft_mut(&mut self) -> Result<&mut Graduate, ClientError> {
        self.draft.as_mut().ok_or(ClientError::NothingLoaded)
    }

    pub fn set_field(&mut self, field: GraduateField, value: &str) -> Result<(), ClientError> {
        self.draft_mut()?.set_field(field, value)
    }

    pub fn set_description(&mut self, descripcion: impl Into<String>) {
        self.descripcion = descripcion.into();
    }

    pub fn add_experience(&mut self) -> Result<(), ClientError> {
        self.draft_mut()?.add_experience();
        Ok(())
    }

    pub fn remove_experience(&mut self, index: usize) {
        if let Some(draft) = self.draft.as_mut() {
            draft.remove_experience(index);
        }
    }

    pub fn set_experience_field(&mut self, index: usize, field: ExperienceField, value: &str) {
        if let Some(draft) = self.draft.as_mut() {
            draft.set_experience_field(index, field, value);
        }
    }

    /// Builds the update body. The reviewer is the session user when the
    /// backend reported an id for them.
    pub fn submission(&self, reviewer: Option<&SessionUser>) -> Result<GraduateUpdate, ClientError> {
        let draft = self.draft.as_ref().ok_or(ClientError::NothingLoaded)?;
        if draft.id == 0 {
            return Err(ClientError::NothingLoaded);
        }

        let descripcion = self.descripcion.trim();
        if descripcion.is_empty() {
            return Err(ClientError::MissingDescription);
        }

        let id_usuario = reviewer
            .and_then(|user| user.id)
            .unwrap_or(FALLBACK_REVIEWER_ID);

        Ok(GraduateUpdate {
            graduate: draft.clone(),
            historial_actualizaciones: ChangeRecord::new(id_usuario, descripcion),
        })
    }

    /// Sends the update, then re-fetches the record so the form shows what
    /// the backend stored. A rejected update keeps the local edits.
    ///
    /// Once the backend accepts the update the call succeeds even if the
    /// re-fetch fails: the submitted values become the pristine copy and the
    /// description is cleared, so the same change is not logged twice.
    pub async fn submit<A>(&mut self, api: &A, reviewer: Option<&SessionUser>) -> Result<UpdateOutcome, ClientError>
    where
        A: AdminApi + ?Sized,
    {
        let update = self.submission(reviewer)?;

        if let Err(e) = api.update_graduate(&update).await {
            tracing::warn!(id = self.id, "Graduate update failed: {}", e);
            return Err(e);
        }

        self.pristine = Some(update.graduate);
        self.descripcion.clear();

        match self.load(api).await {
            Ok(graduate) => Ok(UpdateOutcome::Refreshed(graduate.clone())),
            Err(e) => Ok(UpdateOutcome::RefreshFailed(e)),
        }
    }
}
