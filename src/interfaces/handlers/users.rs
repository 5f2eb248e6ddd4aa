use actix_web::{post, web, HttpResponse, Responder};

use crate::entities::user::NewUser;
use crate::handlers::json_error::proxy_error_response;
use crate::use_cases::extractors::AuthSession;
use crate::AppState;

#[post("/registerUsers")]
pub async fn register_user(
    state: web::Data<AppState>,
    session: AuthSession,
    user: web::Json<NewUser>,
) -> impl Responder {
    match state.auth_handler.register_user(&session.0, user.into_inner()).await {
        Ok(response) => HttpResponse::Created().json(response),
        Err(e) => proxy_error_response(e),
    }
}
