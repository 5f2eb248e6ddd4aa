use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;
use url::Url;

use crate::{
    entities::{
        graduate::{NewGraduate, UpdateGraduateRequest},
        session::Session,
        user::{BackendLogin, BackendLoginResponse, BackendNewUser},
    },
    errors::ProxyError,
    repositories::backend::BackendApi,
    settings::AppConfig,
};

const LOGIN_FAILED: &str = "Error en inicio de sesión";
const REGISTER_USER_FAILED: &str = "Error en registro";
const LIST_FAILED: &str = "Error al obtener egresados";
const GET_FAILED: &str = "Error al obtener egresado";
const UPDATE_FAILED: &str = "Error al actualizar egresado";

/// reqwest client for the graduates backend.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

impl HttpBackend {
    pub fn new(config: &AppConfig) -> Result<Self, ProxyError> {
        let mut base_url = config
            .backend_base_url()
            .map_err(|e| ProxyError::Internal(format!("Invalid backend URL: {}", e)))?;

        // Endpoints are joined relative to the base, so a prefix such as
        // `/api` must end in a slash to survive the join.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .timeout(config.backend_timeout())
            .build()?;

        Ok(HttpBackend { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ProxyError> {
        self.base_url
            .join(path)
            .map_err(|e| ProxyError::Internal(format!("Invalid backend path {}: {}", path, e)))
    }

    fn authorized(&self, builder: RequestBuilder, session: &Session) -> RequestBuilder {
        builder.bearer_auth(&session.token)
    }
}

/// Non-2xx: relay the raw body text, or the default message when it is empty.
async fn relay_json(response: Response, fallback: &str) -> Result<Value, ProxyError> {
    let status = response.status();

    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        tracing::warn!(status = status.as_u16(), "Backend rejected request");
        let message = if text.is_empty() { fallback.to_string() } else { text };
        return Err(ProxyError::rejected(status.as_u16(), message));
    }

    Ok(response.json::<Value>().await?)
}

/// Non-2xx: relay the `message` field of a JSON error body.
async fn rejected_with_message(response: Response, fallback: &str) -> ProxyError {
    let status = response.status().as_u16();
    let message = response
        .json::<Value>()
        .await
        .ok()
        .and_then(|body| body.get("message").and_then(Value::as_str).map(str::to_string))
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| fallback.to_string());

    tracing::warn!(status, "Backend rejected request: {}", message);
    ProxyError::rejected(status, message)
}

#[async_trait]
impl BackendApi for HttpBackend {
    async fn login(&self, credentials: &BackendLogin) -> Result<BackendLoginResponse, ProxyError> {
        let response = self
            .client
            .post(self.endpoint("usuario/login")?)
            .json(credentials)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(rejected_with_message(response, LOGIN_FAILED).await);
        }

        Ok(response.json::<BackendLoginResponse>().await?)
    }

    async fn register_user(&self, session: &Session, user: &BackendNewUser) -> Result<(), ProxyError> {
        let request = self.client.post(self.endpoint("usuario/registrar")?).json(user);
        let response = self.authorized(request, session).send().await?;

        if !response.status().is_success() {
            return Err(rejected_with_message(response, REGISTER_USER_FAILED).await);
        }

        Ok(())
    }

    async fn list_graduates(&self, session: &Session) -> Result<Value, ProxyError> {
        let request = self.client.get(self.endpoint("egresado/obtener/todos")?);
        let response = self.authorized(request, session).send().await?;
        relay_json(response, LIST_FAILED).await
    }

    async fn get_graduate(&self, session: &Session, id: &str) -> Result<Value, ProxyError> {
        let path = format!("egresado/obtener/{}", urlencoding::encode(id));
        tracing::debug!("Fetching graduate from {}", path);

        let request = self.client.get(self.endpoint(&path)?);
        let response = self.authorized(request, session).send().await?;
        relay_json(response, GET_FAILED).await
    }

    async fn create_graduate(&self, session: &Session, draft: &NewGraduate) -> Result<Value, ProxyError> {
        let request = self.client.post(self.endpoint("egresado/crear")?).json(draft);
        let response = self.authorized(request, session).send().await?;
        // The backend text is relayed verbatim here, even when empty.
        relay_json(response, "").await
    }

    async fn update_graduate(&self, session: &Session, request: &UpdateGraduateRequest) -> Result<Value, ProxyError> {
        let builder = self.client.put(self.endpoint("egresado/actualizar")?).json(request);
        let response = self.authorized(builder, session).send().await?;
        relay_json(response, UPDATE_FAILED).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::AppEnvironment;

    fn backend_at(url: &str) -> HttpBackend {
        let config = AppConfig {
            env: AppEnvironment::Testing,
            name: "test".into(),
            host: "127.0.0.1".into(),
            port: 0,
            worker_count: 1,
            backend_url: url.into(),
            backend_timeout_secs: 1,
            session_max_age_hours: 24,
            cors_allowed_origins: vec![],
        };
        HttpBackend::new(&config).unwrap()
    }

    #[test]
    fn endpoints_keep_the_base_path_prefix() {
        for base in ["http://backend.local/api", "http://backend.local/api/"] {
            let backend = backend_at(base);
            assert_eq!(
                backend.endpoint("egresado/crear").unwrap().as_str(),
                "http://backend.local/api/egresado/crear"
            );
        }
    }

    #[test]
    fn host_only_base_maps_to_root_paths() {
        let backend = backend_at("http://localhost:8080");
        assert_eq!(
            backend.endpoint("usuario/login").unwrap().as_str(),
            "http://localhost:8080/usuario/login"
        );
    }
}
