use actix_web::{middleware::NormalizePath, web, App, HttpServer};
use egresados_admin::{
    middlewares::session::SessionMiddleware,
    routes::configure_routes,
    settings::{AppConfig, AppEnvironment},
    AppState,
};
use reqwest::{header, Client, Response};
use serde_json::Value;
use std::{net::TcpListener, time::Duration};

use super::stub_backend::{spawn_stub_backend, StubState};

pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub backend: web::Data<StubState>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let backend = web::Data::new(StubState::default());
        let backend_url = spawn_stub_backend(backend.clone()).await;
        Self::spawn_with_backend(backend_url, backend).await
    }

    /// Proxy pointed at a port nobody listens on.
    pub async fn spawn_unreachable() -> Self {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let backend = web::Data::new(StubState::default());
        Self::spawn_with_backend(format!("http://127.0.0.1:{}", port), backend).await
    }

    async fn spawn_with_backend(backend_url: String, backend: web::Data<StubState>) -> Self {
        let config = test_config(backend_url);
        let state = web::Data::new(AppState::new(&config).expect("Failed to build app state"));

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let server = HttpServer::new(move || {
            App::new()
                .app_data(state.clone())
                .wrap(SessionMiddleware)
                .wrap(NormalizePath::trim())
                .configure(configure_routes)
        })
        .listen(listener)
        .expect("Failed to bind server")
        .workers(config.worker_count)
        .run();

        actix_rt::spawn(server);

        let client = Client::new();
        while client.get(format!("{}/health", address)).send().await.is_err() {
            actix_rt::time::sleep(Duration::from_millis(10)).await;
        }

        Self { address, client, backend }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn post_json(&self, path: &str, body: &Value, token: Option<&str>) -> Response {
        let mut request = self.client.post(self.url(path)).json(body);
        if let Some(token) = token {
            request = request.header(header::COOKIE, format!("authToken={}", token));
        }
        request.send().await.expect("Failed to send request")
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> Response {
        let mut request = self.client.get(self.url(path));
        if let Some(token) = token {
            request = request.header(header::COOKIE, format!("authToken={}", token));
        }
        request.send().await.expect("Failed to send request")
    }
}

fn test_config(backend_url: String) -> AppConfig {
    AppConfig {
        env: AppEnvironment::Testing,
        name: "Egresados Admin Test".to_string(),
        host: "127.0.0.1".to_string(),
        port: 0,
        worker_count: 1,
        backend_url,
        backend_timeout_secs: 5,
        session_max_age_hours: 24,
        cors_allowed_origins: vec!["*".to_string()],
    }
}

pub fn set_cookies(response: &Response) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(str::to_string)
        .collect()
}
