use actix_web::{
    body::BoxBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use futures_util::future::{ok, Ready, LocalBoxFuture};
use std::{rc::Rc, task::{Context, Poll}};

use crate::{entities::session::Session, errors::ProxyError, session::cookies::AUTH_COOKIE};

/// Reads the `authToken` cookie into a `Session` request extension.
/// Requests to protected routes without one get a 401 and never reach
/// the handler, so no backend call is made.
pub struct SessionMiddleware;

impl<S> Transform<S, ServiceRequest> for SessionMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(SessionMiddlewareService {
            service: Rc::new(service),
        })
    }
}

pub struct SessionMiddlewareService<S> {
    service: Rc<S>,
}

impl<S> Service<ServiceRequest> for SessionMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            if is_public_route(req.path(), req.method().as_str()) {
                return service.call(req).await;
            }

            let session = req
                .cookie(AUTH_COOKIE)
                .and_then(|cookie| Session::from_cookie_value(cookie.value()));

            match session {
                Some(session) => {
                    req.extensions_mut().insert(session);
                    service.call(req).await
                }
                None => {
                    tracing::warn!(path = req.path(), "Missing auth token");
                    let response = ProxyError::MissingAuth.to_http_response();
                    Ok(req.into_response(response))
                }
            }
        })
    }
}

fn is_public_route(path: &str, method: &str) -> bool {
    if method == "OPTIONS" {
        return true;
    }

    matches!(
        (path, method),
        ("/", "GET") |
        ("/health", "GET") |
        ("/api/auth/login", "POST") |
        ("/api/auth/logout", "POST")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_login_logout_and_probes_are_public() {
        assert!(is_public_route("/api/auth/login", "POST"));
        assert!(is_public_route("/api/auth/logout", "POST"));
        assert!(is_public_route("/health", "GET"));
        assert!(is_public_route("/api/graduates/getAllGraduates", "OPTIONS"));

        assert!(!is_public_route("/api/graduates/getAllGraduates", "GET"));
        assert!(!is_public_route("/api/registerUsers", "POST"));
        assert!(!is_public_route("/api/auth/login", "GET"));
    }
}
