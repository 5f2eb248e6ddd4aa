use actix_web::{get, post, web, HttpResponse, Responder};
use serde::Deserialize;

use crate::entities::graduate::{NewGraduate, UpdateGraduateRequest};
use crate::handlers::json_error::proxy_error_response;
use crate::use_cases::extractors::AuthSession;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct GraduateQuery {
    pub id: Option<String>,
}

#[get("/getAllGraduates")]
pub async fn get_all_graduates(
    state: web::Data<AppState>,
    session: AuthSession,
) -> impl Responder {
    match state.graduate_handler.list(&session.0).await {
        Ok(graduates) => HttpResponse::Ok().json(graduates),
        Err(e) => proxy_error_response(e),
    }
}

#[get("/getGraduate")]
pub async fn get_graduate(
    state: web::Data<AppState>,
    session: AuthSession,
    query: web::Query<GraduateQuery>,
) -> impl Responder {
    match state.graduate_handler.get(&session.0, query.id.as_deref()).await {
        Ok(graduate) => HttpResponse::Ok().json(graduate),
        Err(e) => proxy_error_response(e),
    }
}

#[post("/registerGraduates")]
pub async fn register_graduate(
    state: web::Data<AppState>,
    session: AuthSession,
    draft: web::Json<NewGraduate>,
) -> impl Responder {
    match state.graduate_handler.create(&session.0, draft.into_inner()).await {
        Ok(created) => HttpResponse::Created().json(created),
        Err(e) => proxy_error_response(e),
    }
}

#[post("/updateGraduates")]
pub async fn update_graduate(
    state: web::Data<AppState>,
    session: AuthSession,
    request: web::Json<UpdateGraduateRequest>,
) -> impl Responder {
    match state.graduate_handler.update(&session.0, request.into_inner()).await {
        Ok(updated) => HttpResponse::Ok().json(updated),
        Err(e) => proxy_error_response(e),
    }
}
