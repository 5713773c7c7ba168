use actix_web::{
    http::StatusCode,
    web::{self, ServiceConfig},
    HttpResponseBuilder, Responder,
};

use crate::store::Database;

async fn get_list(db: web::Data<Database>) -> impl Responder {
    HttpResponseBuilder::new(StatusCode::OK).json(db.list())
}

pub fn configure_routes(config: &mut ServiceConfig) {
    config.route("/list", web::get().to(get_list));
}
