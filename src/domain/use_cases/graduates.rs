use serde_json::Value;

use crate::entities::graduate::{unwrap_double_encoded, NewGraduate, UpdateGraduateRequest};
use crate::entities::session::Session;
use crate::errors::ProxyError;
use crate::repositories::backend::BackendApi;
use crate::validation::is_valid_for_update;

pub const MISSING_ID: &str = "ID de egresado no especificado";
pub const INCOMPLETE_UPDATE: &str = "Datos incompletos para la actualización";

pub struct GraduateHandler<B>
where
    B: BackendApi,
{
    pub backend: B,
}

impl<B> GraduateHandler<B>
where
    B: BackendApi,
{
    pub fn new(backend: B) -> Self {
        GraduateHandler { backend }
    }

    pub async fn list(&self, session: &Session) -> Result<Value, ProxyError> {
        self.backend.list_graduates(session).await
    }

    /// Fetches one graduate. A string-wrapped document is unwrapped before
    /// it is relayed.
    pub async fn get(&self, session: &Session, id: Option<&str>) -> Result<Value, ProxyError> {
        let id = id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ProxyError::MissingFields(MISSING_ID.to_string()))?;

        let payload = self.backend.get_graduate(session, id).await?;
        Ok(unwrap_double_encoded(payload))
    }

    pub async fn create(&self, session: &Session, draft: NewGraduate) -> Result<Value, ProxyError> {
        let created = self.backend.create_graduate(session, &draft).await?;
        tracing::info!("Graduate registered");
        Ok(created)
    }

    pub async fn update(&self, session: &Session, request: UpdateGraduateRequest) -> Result<Value, ProxyError> {
        if !is_valid_for_update(&request) {
            return Err(ProxyError::MissingFields(INCOMPLETE_UPDATE.to_string()));
        }

        let updated = self.backend.update_graduate(session, &request).await?;
        tracing::info!(id = ?request.id, "Graduate updated");
        Ok(updated)
    }
}
