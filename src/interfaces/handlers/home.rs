use actix_web::{get, HttpResponse, Responder};
use crate::constants::APP_VERSION;

#[get("/")]
pub async fn home() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Egresados admin API",
        "status": "Ok",
        "version": APP_VERSION,
    }))
}
