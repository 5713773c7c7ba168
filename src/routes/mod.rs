use actix_web::{web, Scope};

pub mod item;
pub mod list;

pub const API_PREFIX: &str = "/api";

/// Every list API route, mounted under `/api`.
pub fn api_scope() -> Scope {
    web::scope(API_PREFIX)
        .configure(list::configure_routes)
        .configure(item::configure_routes)
}
