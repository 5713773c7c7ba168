use std::io;

use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use clap::Parser;
use log::info;

use grocery_list::config::ServerArgs;
use grocery_list::routes;
use grocery_list::store::Database;

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let args = ServerArgs::parse();

    let database = Database::open(&args.data_dir, &args.list_name)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    info!(
        "serving list {:?} ({}) from {}; store holds {:?}",
        args.list_name,
        database.list_id(),
        args.data_dir.display(),
        database.list_names()
    );
    let app_data = web::Data::new(database);

    info!("Listening on {}:{}", args.bind_address, args.port);
    HttpServer::new(move || {
        App::new()
            .app_data(app_data.clone())
            .wrap(middleware::NormalizePath::new(
                middleware::TrailingSlash::Trim,
            ))
            .wrap(middleware::Logger::default())
            .wrap(Cors::permissive())
            .service(routes::api_scope())
    })
    .bind((args.bind_address.as_str(), args.port))?
    .run()
    .await
}
