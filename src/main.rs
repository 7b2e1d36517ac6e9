#[macro_use]
extern crate diesel;

mod api;
mod config;
mod database;
mod graphql;
mod handlers;
mod mailer;
mod models;
mod protocol;
mod repository;
mod schema;
mod utils;

use crate::config::Config;
use crate::mailer::Mailer;
use actix_web::{middleware, web, App, HttpServer};
use diesel::r2d2::ConnectionManager;
use diesel::SqliteConnection;
use std::sync::Arc;

pub type DbPool = r2d2::Pool<ConnectionManager<SqliteConnection>>;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env()?;
    let pool = database::build_pool(&config.database_url)?;
    database::init_schema(&pool)?;
    if std::env::var("SEED_DEMO_DATA").map_or(false, |v| v == "1") {
        database::seed::seed(&pool)?;
    }

    let mailer = Arc::new(Mailer::new(config.email.clone()));
    let schema = graphql::build_schema(pool.clone(), mailer.clone());

    log::info!("listening on {}", config.bind_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::from(mailer.clone()))
            .app_data(web::Data::new(schema.clone()))
            .service(web::scope("/api").configure(api::config))
            .service(
                web::resource("/graphql")
                    .route(web::post().to(graphql::graphql_handler))
                    .route(web::get().to(graphql::graphiql)),
            )
    })
    .bind(&config.bind_addr)?
    .run()
    .await?;

    Ok(())
}
