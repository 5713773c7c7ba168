use actix_web::{
    http::StatusCode,
    web::{self, ServiceConfig},
    HttpResponseBuilder, Responder,
};
use log::{error, info};
use serde::Deserialize;

use crate::error::StoreError;
use crate::models::item::GroceryItem;
use crate::store::Database;

// Store calls write to disk, so they run on the blocking pool.
async fn run_blocking<F, T>(db: web::Data<Database>, f: F) -> Result<T, String>
where
    F: FnOnce(&Database) -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    match web::block(move || f(&db)).await {
        Ok(result) => result.map_err(|e| e.to_string()),
        Err(e) => Err(e.to_string()),
    }
}

#[derive(Deserialize)]
struct AddItemRequestData {
    item_name: String,
}
async fn add_item(
    body: web::Form<AddItemRequestData>,
    db: web::Data<Database>,
) -> impl Responder {
    let item_name = body.into_inner().item_name;
    let name = item_name.clone();
    match run_blocking(db, move |db| db.add_item(name)).await {
        Ok(item) => {
            info!("added item {:?} ({})", item.name, item.id);
            HttpResponseBuilder::new(StatusCode::OK).json(GroceryItem::from(&item))
        }
        Err(e) => {
            error!("failed to add item {:?}: {}", item_name, e);
            HttpResponseBuilder::new(StatusCode::INTERNAL_SERVER_ERROR).json(e)
        }
    }
}

#[derive(Deserialize)]
struct RemoveItemRequestData {
    item_id: String,
}
async fn remove_item(
    body: web::Form<RemoveItemRequestData>,
    db: web::Data<Database>,
) -> impl Responder {
    let item_id = body.into_inner().item_id;
    let id = item_id.clone();
    match run_blocking(db, move |db| db.remove_item(&id)).await {
        Ok(Some(item)) => {
            info!("removed item {:?} ({})", item.name, item.id);
            HttpResponseBuilder::new(StatusCode::OK).finish()
        }
        Ok(None) => HttpResponseBuilder::new(StatusCode::NOT_FOUND).json("not found"),
        Err(e) => {
            error!("failed to remove item {:?}: {}", item_id, e);
            HttpResponseBuilder::new(StatusCode::INTERNAL_SERVER_ERROR).json(e)
        }
    }
}

#[derive(Deserialize)]
struct CheckItemRequestData {
    item_id: String,
    checked: String,
}
async fn check_item(
    body: web::Form<CheckItemRequestData>,
    db: web::Data<Database>,
) -> impl Responder {
    let body = body.into_inner();
    // only the exact string "true" checks an item
    let checked = body.checked == "true";
    let id = body.item_id.clone();
    match run_blocking(db, move |db| db.set_checked(&id, checked)).await {
        Ok(Some(item)) => HttpResponseBuilder::new(StatusCode::OK).json(GroceryItem::from(&item)),
        Ok(None) => HttpResponseBuilder::new(StatusCode::NOT_FOUND).json("not found"),
        Err(e) => {
            error!(
                "failed to update checked ({:?}, {}): {}",
                body.item_id, checked, e
            );
            HttpResponseBuilder::new(StatusCode::INTERNAL_SERVER_ERROR).json(e)
        }
    }
}

pub fn configure_routes(config: &mut ServiceConfig) {
    config.route("/add", web::post().to(add_item));
    config.route("/remove", web::post().to(remove_item));
    config.route("/check", web::post().to(check_item));
}
