use actix_web::HttpResponse;
use serde::Serialize;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new<S: ToString>(msg: S) -> Self {
        Self {
            error: msg.to_string(),
        }
    }
}

pub fn bad_request<S: ToString>(msg: S) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::new(msg))
}

pub fn not_found<S: ToString>(msg: S) -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(msg))
}

pub fn server_error(err: anyhow::Error) -> HttpResponse {
    log::error!("request failed: {:#}", err);
    HttpResponse::InternalServerError().json(ErrorResponse::new("internal server error"))
}
