use crate::handlers::attendees as handlers;
use crate::handlers::commands::UpdateAttendeeStatusCommand;
use crate::mailer::Mailer;
use crate::protocol;
use crate::DbPool;
use actix_web::{put, web, HttpResponse};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(update_attendee_status);
}

/// Accept or reject an event invitation.
#[put("/attendees/{id}/status")]
async fn update_attendee_status(
    pool: web::Data<DbPool>,
    mailer: web::Data<Mailer>,
    id: web::Path<String>,
    cmd: web::Json<UpdateAttendeeStatusCommand>,
) -> HttpResponse {
    let id = id.into_inner();
    let cmd = cmd.into_inner();
    if id != cmd.attendee_id {
        return protocol::bad_request("ID in URL does not match ID in request body.");
    }

    match handlers::update_attendee_status(&pool, &mailer, cmd).await {
        Ok(Some(attendee)) => HttpResponse::Ok().json(attendee),
        Ok(None) => protocol::not_found(format!("Attendee with ID {} not found.", id)),
        Err(err) => protocol::server_error(err),
    }
}
