use crate::handlers::commands::CreatePatientCommand;
use crate::handlers::patients as handlers;
use crate::protocol;
use crate::DbPool;
use actix_web::http::header;
use actix_web::{get, post, web, HttpResponse};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(get_all_patients)
        .service(get_patient)
        .service(create_patient);
}

#[get("/patients")]
async fn get_all_patients(pool: web::Data<DbPool>) -> HttpResponse {
    match handlers::get_all_patients(&pool).await {
        Ok(patients) => HttpResponse::Ok().json(patients),
        Err(err) => protocol::server_error(err),
    }
}

#[get("/patients/{id}")]
async fn get_patient(pool: web::Data<DbPool>, id: web::Path<String>) -> HttpResponse {
    match handlers::get_patient(&pool, id.into_inner()).await {
        Ok(Some(patient)) => HttpResponse::Ok().json(patient),
        Ok(None) => HttpResponse::NotFound().finish(),
        Err(err) => protocol::server_error(err),
    }
}

#[post("/patients")]
async fn create_patient(
    pool: web::Data<DbPool>,
    cmd: web::Json<CreatePatientCommand>,
) -> HttpResponse {
    let cmd = cmd.into_inner();
    if let Err(err) = cmd.validate() {
        return protocol::bad_request(err);
    }

    match handlers::create_patient(&pool, cmd).await {
        Ok(patient) => HttpResponse::Created()
            .insert_header((header::LOCATION, format!("/api/patients/{}", patient.id)))
            .json(patient),
        Err(err) => protocol::server_error(err),
    }
}
