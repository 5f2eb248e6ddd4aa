use actix_web::web;

use crate::handlers::graduates;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/graduates")
            .service(graduates::get_all_graduates)
            .service(graduates::get_graduate)
            .service(graduates::register_graduate)
            .service(graduates::update_graduate)
    );
}
