use actix_web::HttpResponse;

use crate::errors::ProxyError;

/// Logs a proxy failure at the level it deserves and turns it into the
/// `{"error": ...}` response.
pub fn proxy_error_response(err: ProxyError) -> HttpResponse {
    match &err {
        ProxyError::Internal(detail) => tracing::error!("Proxy failure: {}", detail),
        ProxyError::BackendRejected { status, .. } => {
            tracing::warn!(status = *status, "Relaying backend rejection")
        }
        ProxyError::MissingAuth | ProxyError::MissingFields(_) => {
            tracing::debug!("Request refused: {}", err)
        }
    }
    err.to_http_response()
}
