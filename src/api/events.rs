use crate::handlers::commands::{CreateEventCommand, UpdateEventCommand};
use crate::handlers::events as handlers;
use crate::mailer::Mailer;
use crate::protocol;
use crate::utils;
use crate::DbPool;
use actix_web::http::header;
use actix_web::{delete, get, post, put, web, HttpResponse};
use serde::Deserialize;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(get_events)
        .service(get_event)
        .service(create_event)
        .service(update_event)
        .service(delete_event);
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventsQueryParams {
    start_date: Option<String>,
    end_date: Option<String>,
    search_term: Option<String>,
}

#[get("/events")]
async fn get_events(
    pool: web::Data<DbPool>,
    params: web::Query<EventsQueryParams>,
) -> HttpResponse {
    let params = params.into_inner();
    let start_date = match utils::parse_datetime_opt(params.start_date) {
        Ok(parsed) => parsed,
        Err(err) => return protocol::bad_request(err),
    };
    let end_date = match utils::parse_datetime_opt(params.end_date) {
        Ok(parsed) => parsed,
        Err(err) => return protocol::bad_request(err),
    };

    match handlers::get_events(&pool, start_date, end_date, params.search_term).await {
        Ok(events) => HttpResponse::Ok().json(events),
        Err(err) => protocol::server_error(err),
    }
}

#[get("/events/{id}")]
async fn get_event(pool: web::Data<DbPool>, id: web::Path<String>) -> HttpResponse {
    let id = id.into_inner();
    match handlers::get_event(&pool, id.clone()).await {
        Ok(Some(event)) => HttpResponse::Ok().json(event),
        Ok(None) => protocol::not_found(format!("Event with ID {} not found.", id)),
        Err(err) => protocol::server_error(err),
    }
}

#[post("/events")]
async fn create_event(
    pool: web::Data<DbPool>,
    mailer: web::Data<Mailer>,
    cmd: web::Json<CreateEventCommand>,
) -> HttpResponse {
    let cmd = cmd.into_inner();
    if let Err(err) = cmd.validate() {
        return protocol::bad_request(err);
    }

    match handlers::create_event(&pool, &mailer, cmd).await {
        Ok(event) => HttpResponse::Created()
            .insert_header((header::LOCATION, format!("/api/events/{}", event.id)))
            .json(event),
        Err(err) => protocol::server_error(err),
    }
}

#[put("/events/{id}")]
async fn update_event(
    pool: web::Data<DbPool>,
    mailer: web::Data<Mailer>,
    id: web::Path<String>,
    cmd: web::Json<UpdateEventCommand>,
) -> HttpResponse {
    let id = id.into_inner();
    let cmd = cmd.into_inner();
    if id != cmd.id {
        return protocol::bad_request("ID in URL does not match ID in request body.");
    }
    if let Err(err) = cmd.validate() {
        return protocol::bad_request(err);
    }

    match handlers::update_event(&pool, &mailer, cmd).await {
        Ok(Some(event)) => HttpResponse::Ok().json(event),
        Ok(None) => protocol::not_found(format!("Event with ID {} not found.", id)),
        Err(err) => protocol::server_error(err),
    }
}

#[delete("/events/{id}")]
async fn delete_event(pool: web::Data<DbPool>, id: web::Path<String>) -> HttpResponse {
    let id = id.into_inner();
    match handlers::delete_event(&pool, id.clone()).await {
        Ok(true) => HttpResponse::NoContent().finish(),
        Ok(false) => protocol::not_found(format!("Event with ID {} not found.", id)),
        Err(err) => protocol::server_error(err),
    }
}
