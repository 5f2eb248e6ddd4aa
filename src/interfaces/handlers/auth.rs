use actix_web::{post, web, HttpResponse, Responder};

use crate::entities::user::LoginUser;
use crate::errors::ProxyError;
use crate::handlers::json_error::proxy_error_response;
use crate::AppState;

#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    credentials: web::Json<LoginUser>
) -> impl Responder {
    let outcome = match state.auth_handler.login(credentials.into_inner()).await {
        Ok(outcome) => outcome,
        Err(e) => return proxy_error_response(e),
    };

    match state.cookies.login(&outcome.token, &outcome.user) {
        Ok([token, user_info]) => HttpResponse::Ok()
            .cookie(token)
            .cookie(user_info)
            .json(outcome.response),
        Err(e) => proxy_error_response(ProxyError::Internal(format!("Could not encode user info: {}", e))),
    }
}

#[post("/logout")]
pub async fn logout(state: web::Data<AppState>) -> impl Responder {
    let [token, user_info] = state.cookies.logout();

    HttpResponse::Ok()
        .cookie(token)
        .cookie(user_info)
        .json(serde_json::json!({ "success": true }))
}
