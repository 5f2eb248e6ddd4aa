use async_trait::async_trait;
use serde_json::Value;

use crate::{
    entities::graduate::{Graduate, GraduateUpdate, NewGraduate},
    errors::ClientError,
};

/// Status and JSON body of a proxy response, whatever the status.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiReply {
    pub status: u16,
    pub body: Value,
}

impl ApiReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The graduate endpoints of the admin proxy, as seen from the UI.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminApi: Send + Sync {
    async fn list_graduates(&self) -> Result<Vec<Graduate>, ClientError>;

    /// Raw reply: the edit form has to inspect error-shaped bodies itself.
    async fn get_graduate(&self, id: i64) -> Result<ApiReply, ClientError>;

    async fn register_graduate(&self, draft: &NewGraduate) -> Result<Value, ClientError>;

    async fn update_graduate(&self, update: &GraduateUpdate) -> Result<Value, ClientError>;
}
