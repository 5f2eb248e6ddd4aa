use actix_web::{FromRequest, HttpRequest, HttpMessage};
use futures_util::future::{ready, Ready};
use crate::{entities::session::Session, errors::ProxyError};

/// Extractor for the session placed in the request by `SessionMiddleware`.
/// Returns 401 when the request carries no `authToken` cookie.
/// Usage: Add `session: AuthSession` as a parameter to your handler function.
#[derive(Debug)]
pub struct AuthSession(pub Session);

impl FromRequest for AuthSession {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<Session>() {
            Some(session) => ready(Ok(AuthSession(session.clone()))),
            None => ready(Err(ProxyError::MissingAuth.into())),
        }
    }
}
