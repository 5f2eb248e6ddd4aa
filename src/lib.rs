mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;
pub mod telemetry;

pub use domain::{entities, forms, use_cases, validation};
pub use interfaces::{handlers, middlewares, repositories, routes};
pub use infrastructure::{backend, client, session};

use backend::http::HttpBackend;
use errors::ProxyError;
use session::cookies::SessionCookies;
use use_cases::{auth::AuthHandler, graduates::GraduateHandler};

pub struct AppState {
    pub auth_handler: AppAuthHandler,
    pub graduate_handler: AppGraduateHandler,
    pub cookies: SessionCookies,
}

pub type AppAuthHandler = AuthHandler<HttpBackend>;
pub type AppGraduateHandler = GraduateHandler<HttpBackend>;

impl AppState {
    pub fn new(config: &settings::AppConfig) -> Result<Self, ProxyError> {
        let backend = HttpBackend::new(config)?;

        Ok(AppState {
            auth_handler: AuthHandler::new(backend.clone()),
            graduate_handler: GraduateHandler::new(backend),
            cookies: SessionCookies::from_config(config),
        })
    }
}
