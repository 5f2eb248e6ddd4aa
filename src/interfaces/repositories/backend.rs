use async_trait::async_trait;
use serde_json::Value;

use crate::{
    entities::{
        graduate::{NewGraduate, UpdateGraduateRequest},
        session::Session,
        user::{BackendLogin, BackendLoginResponse, BackendNewUser},
    },
    errors::ProxyError,
};

/// The external service that owns users and graduate records.
///
/// Each call is a single round trip. Non-2xx answers come back as
/// `ProxyError::BackendRejected` carrying the backend status.
#[async_trait]
pub trait BackendApi: Send + Sync {
    async fn login(&self, credentials: &BackendLogin) -> Result<BackendLoginResponse, ProxyError>;
    async fn register_user(&self, session: &Session, user: &BackendNewUser) -> Result<(), ProxyError>;
    async fn list_graduates(&self, session: &Session) -> Result<Value, ProxyError>;
    async fn get_graduate(&self, session: &Session, id: &str) -> Result<Value, ProxyError>;
    async fn create_graduate(&self, session: &Session, draft: &NewGraduate) -> Result<Value, ProxyError>;
    async fn update_graduate(&self, session: &Session, request: &UpdateGraduateRequest) -> Result<Value, ProxyError>;
}
