use actix_web::cookie::Cookie;
use async_trait::async_trait;
use reqwest::{header, Client, RequestBuilder, Response};
use serde_json::Value;
use url::Url;

use crate::{
    entities::{
        graduate::{Graduate, GraduateUpdate, NewGraduate},
        user::{LoginResponse, LoginUser, NewUser, NewUserResponse, SessionUser},
    },
    errors::ClientError,
    repositories::admin_api::{AdminApi, ApiReply},
    session::cookies::{decode_user_info, AUTH_COOKIE, USER_INFO_COOKIE},
};

/// HTTP client for the admin proxy, playing the browser's part: it keeps
/// the session cookies set at login and sends the token back on every call.
pub struct AdminClient {
    http: Client,
    base_url: Url,
    token: Option<String>,
    user: Option<SessionUser>,
}

impl AdminClient {
    pub fn new(base_url: Url) -> Self {
        AdminClient {
            http: Client::new(),
            base_url,
            token: None,
            user: None,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }

    pub fn session_user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    fn url(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidPayload(format!("bad URL {}: {}", path, e)))
    }

    fn with_session(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.header(header::COOKIE, format!("{}={}", AUTH_COOKIE, token)),
            None => builder,
        }
    }

    pub async fn login(&mut self, credentials: &LoginUser) -> Result<LoginResponse, ClientError> {
        let response = self
            .http
            .post(self.url("/api/auth/login")?)
            .json(credentials)
            .send()
            .await?;

        let (token, user) = read_session_cookies(&response);
        let body = expect_success(response).await?;

        self.token = token;
        self.user = user;
        Ok(serde_json::from_value(body)?)
    }

    /// Clears the local session even when the call fails.
    pub async fn logout(&mut self) -> Result<(), ClientError> {
        let request = self.with_session(self.http.post(self.url("/api/auth/logout")?));
        self.token = None;
        self.user = None;

        expect_success(request.send().await?).await?;
        Ok(())
    }

    pub async fn register_user(&self, user: &NewUser) -> Result<NewUserResponse, ClientError> {
        let request = self.with_session(self.http.post(self.url("/api/registerUsers")?).json(user));
        let body = expect_success(request.send().await?).await?;
        Ok(serde_json::from_value(body)?)
    }
}

fn read_session_cookies(response: &Response) -> (Option<String>, Option<SessionUser>) {
    let mut token = None;
    let mut user = None;

    for raw in response.headers().get_all(header::SET_COOKIE) {
        let Some(cookie) = raw.to_str().ok().and_then(|s| Cookie::parse(s.to_string()).ok()) else {
            continue;
        };
        match cookie.name() {
            AUTH_COOKIE if !cookie.value().is_empty() => token = Some(cookie.value().to_string()),
            USER_INFO_COOKIE => user = decode_user_info(cookie.value()),
            _ => {}
        }
    }

    (token, user)
}

/// Reads the JSON body of a 2xx reply; anything else becomes
/// `ClientError::Request` with the proxy's `error` message.
async fn expect_success(response: Response) -> Result<Value, ClientError> {
    let status = response.status();
    let body = response.json::<Value>().await.unwrap_or(Value::Null);

    if status.is_success() {
        return Ok(body);
    }

    let message = body
        .get("error")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("Error desconocido").to_string());

    Err(ClientError::Request {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl AdminApi for AdminClient {
    async fn list_graduates(&self) -> Result<Vec<Graduate>, ClientError> {
        let request = self.with_session(self.http.get(self.url("/api/graduates/getAllGraduates")?));
        let body = expect_success(request.send().await?).await?;
        Ok(serde_json::from_value(body)?)
    }

    async fn get_graduate(&self, id: i64) -> Result<ApiReply, ClientError> {
        let mut url = self.url("/api/graduates/getGraduate")?;
        url.query_pairs_mut().append_pair("id", &id.to_string());

        let response = self.with_session(self.http.get(url)).send().await?;
        let status = response.status().as_u16();
        let body = response.json::<Value>().await?;

        Ok(ApiReply { status, body })
    }

    async fn register_graduate(&self, draft: &NewGraduate) -> Result<Value, ClientError> {
        let request = self.with_session(self.http.post(self.url("/api/graduates/registerGraduates")?).json(draft));
        expect_success(request.send().await?).await
    }

    async fn update_graduate(&self, update: &GraduateUpdate) -> Result<Value, ClientError> {
        let request = self.with_session(self.http.post(self.url("/api/graduates/updateGraduates")?).json(update));
        expect_success(request.send().await?).await
    }
}
