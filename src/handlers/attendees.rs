use crate::database::get_db_conn;
use crate::handlers::commands::UpdateAttendeeStatusCommand;
use crate::handlers::dto::AttendeeDto;
use crate::mailer::Mailer;
use crate::models::attendees::Attendee;
use crate::models::events::Event;
use crate::repository::{AttendeeRepository, EventRepository};
use crate::DbPool;
use actix_web::web;

/// Mutates the RSVP status, then notifies the configured organizer address.
/// Events carry no organizer field, so the address comes from configuration;
/// without one the notification is skipped.
pub async fn update_attendee_status(
    pool: &DbPool,
    mailer: &Mailer,
    cmd: UpdateAttendeeStatusCommand,
) -> anyhow::Result<Option<AttendeeDto>> {
    let mut conn = get_db_conn(pool)?;

    let res = web::block(move || -> anyhow::Result<Option<(Attendee, Option<Event>)>> {
        let mut attendee = match AttendeeRepository::get_by_id(&mut conn, &cmd.attendee_id)? {
            Some(attendee) => attendee,
            None => return Ok(None),
        };
        attendee.status = cmd.status;
        let attendee = AttendeeRepository::update(&mut conn, attendee)?;
        let event = EventRepository::get_by_id(&mut conn, &attendee.event_id)?;
        Ok(Some((attendee, event)))
    })
    .await??;

    let (attendee, event) = match res {
        Some(parts) => parts,
        None => return Ok(None),
    };

    if let Some(event) = event {
        match mailer.organizer_email() {
            Some(organizer) => {
                mailer
                    .send_attendee_status_changed(
                        organizer,
                        &attendee.name,
                        &event.title,
                        attendee.status.as_str(),
                    )
                    .await?
            }
            None => log::debug!("no organizer address configured, skipping status notification"),
        }
    }

    Ok(Some(attendee.into()))
}
