use crate::database::get_db_conn;
use crate::handlers::commands::{CreateEventCommand, UpdateEventCommand};
use crate::handlers::dto::EventDto;
use crate::mailer::Mailer;
use crate::models::attendees::Attendee;
use crate::models::enums::AttendeeStatus;
use crate::models::events::Event;
use crate::repository::{AttendeeRepository, EventRepository};
use crate::DbPool;
use actix_web::web;
use chrono::{NaiveDateTime, Utc};
use diesel::Connection;
use uuid::Uuid;

/// Persists the event with its attendees (each defaulted to Pending) in one
/// transaction, then sends one invitation per attendee. Sends are sequential
/// and a failure propagates, aborting the remaining ones.
pub async fn create_event(
    pool: &DbPool,
    mailer: &Mailer,
    cmd: CreateEventCommand,
) -> anyhow::Result<EventDto> {
    let mut conn = get_db_conn(pool)?;

    let now = Utc::now().naive_utc();
    let event = Event {
        id: Uuid::new_v4().to_string(),
        title: cmd.title,
        description: cmd.description,
        start_time: cmd.start_time,
        end_time: cmd.end_time,
        created_at: now,
        updated_at: now,
    };
    let attendees: Vec<Attendee> = cmd
        .attendees
        .into_iter()
        .map(|a| Attendee {
            id: Uuid::new_v4().to_string(),
            name: a.name,
            email_address: a.email_address,
            status: AttendeeStatus::Pending,
            event_id: event.id.clone(),
            created_at: now,
            updated_at: now,
        })
        .collect();

    let (event, attendees) = web::block(move || -> anyhow::Result<(Event, Vec<Attendee>)> {
        conn.transaction(|conn| {
            let event = EventRepository::add(conn, event)?;
            let mut stored = Vec::with_capacity(attendees.len());
            for attendee in attendees {
                stored.push(AttendeeRepository::add(conn, attendee)?);
            }
            Ok((event, stored))
        })
    })
    .await??;

    for attendee in &attendees {
        mailer
            .send_attendee_invitation(
                &attendee.email_address,
                &attendee.name,
                &event.title,
                event.start_time,
                event.end_time,
            )
            .await?;
    }

    Ok(EventDto::from_parts(event, attendees))
}

/// Overwrites title/description/start/end and notifies every current
/// attendee. Absent event means `None`, never an error.
pub async fn update_event(
    pool: &DbPool,
    mailer: &Mailer,
    cmd: UpdateEventCommand,
) -> anyhow::Result<Option<EventDto>> {
    let mut conn = get_db_conn(pool)?;

    let res = web::block(move || -> anyhow::Result<Option<(Event, Vec<Attendee>)>> {
        let mut event = match EventRepository::get_by_id(&mut conn, &cmd.id)? {
            Some(event) => event,
            None => return Ok(None),
        };
        event.title = cmd.title;
        event.description = cmd.description;
        event.start_time = cmd.start_time;
        event.end_time = cmd.end_time;
        let event = EventRepository::update(&mut conn, event)?;
        let attendees = AttendeeRepository::by_event(&mut conn, &event.id)?;
        Ok(Some((event, attendees)))
    })
    .await??;

    let (event, attendees) = match res {
        Some(parts) => parts,
        None => return Ok(None),
    };

    for attendee in &attendees {
        mailer
            .send_event_updated(
                &attendee.email_address,
                &attendee.name,
                &event.title,
                event.start_time,
                event.end_time,
            )
            .await?;
    }

    Ok(Some(EventDto::from_parts(event, attendees)))
}

/// Attendees cascade at the storage layer; no notification is sent.
pub async fn delete_event(pool: &DbPool, id: String) -> anyhow::Result<bool> {
    let mut conn = get_db_conn(pool)?;

    let deleted = web::block(move || -> anyhow::Result<bool> {
        let event = match EventRepository::get_by_id(&mut conn, &id)? {
            Some(event) => event,
            None => return Ok(false),
        };
        EventRepository::delete(&mut conn, &event)?;
        Ok(true)
    })
    .await??;

    Ok(deleted)
}

pub async fn get_event(pool: &DbPool, id: String) -> anyhow::Result<Option<EventDto>> {
    let mut conn = get_db_conn(pool)?;

    let res = web::block(move || EventRepository::with_attendees(&mut conn, &id)).await??;
    Ok(res.map(|(event, attendees)| EventDto::from_parts(event, attendees)))
}

/// Three mutually exclusive modes: a non-empty search term wins over a fully
/// specified date range, which wins over an unfiltered scan.
pub async fn get_events(
    pool: &DbPool,
    start_date: Option<NaiveDateTime>,
    end_date: Option<NaiveDateTime>,
    search_term: Option<String>,
) -> anyhow::Result<Vec<EventDto>> {
    let mut conn = get_db_conn(pool)?;

    let rows = web::block(
        move || match search_term.as_deref().filter(|t| !t.is_empty()) {
            Some(term) => EventRepository::search(&mut conn, term),
            None => match (start_date, end_date) {
                (Some(start), Some(end)) => EventRepository::by_date_range(&mut conn, start, end),
                _ => EventRepository::all_with_attendees(&mut conn),
            },
        },
    )
    .await??;

    Ok(rows
        .into_iter()
        .map(|(event, attendees)| EventDto::from_parts(event, attendees))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_pool;
    use crate::handlers::commands::CreateAttendeeRequest;
    use crate::mailer::test_mailer;
    use crate::repository::test_fixtures::dt;

    fn checkup_day() -> CreateEventCommand {
        CreateEventCommand {
            title: "Checkup Day".to_string(),
            description: "Annual staff checkups".to_string(),
            start_time: dt("2025-01-10T09:00:00"),
            end_time: dt("2025-01-10T10:00:00"),
            attendees: vec![CreateAttendeeRequest {
                name: "Ann".to_string(),
                email_address: "ann@x.com".to_string(),
            }],
        }
    }

    #[actix_web::test]
    async fn create_event_defaults_attendees_to_pending_and_invites_them() {
        let pool = test_pool();
        let mailer = test_mailer();

        let dto = create_event(&pool, &mailer, checkup_day()).await.unwrap();

        assert!(!dto.id.is_empty());
        assert_eq!(dto.attendees.len(), 1);
        assert_eq!(dto.attendees[0].status, AttendeeStatus::Pending);
        assert_eq!(dto.created_at, dto.updated_at);

        let outbox = mailer.outbox();
        assert_eq!(outbox.len(), 1);
        assert_eq!(outbox[0].to, "ann@x.com");
        assert_eq!(outbox[0].subject, "You're Invited: Checkup Day");
    }

    #[actix_web::test]
    async fn failed_create_leaves_no_rows_behind() {
        let pool = test_pool();
        let mailer = test_mailer();

        // Two attendees sharing an email trip the per-event unique index on
        // the second insert; the event and first attendee must roll back.
        let mut cmd = checkup_day();
        cmd.attendees.push(CreateAttendeeRequest {
            name: "Ann Again".to_string(),
            email_address: "ann@x.com".to_string(),
        });

        assert!(create_event(&pool, &mailer, cmd).await.is_err());

        let events = get_events(&pool, None, None, None).await.unwrap();
        assert!(events.is_empty());
        {
            let mut conn = get_db_conn(&pool).unwrap();
            assert!(AttendeeRepository::get_all(&mut conn).unwrap().is_empty());
        }
        assert!(mailer.outbox().is_empty());
    }

    #[actix_web::test]
    async fn created_event_round_trips_through_get() {
        let pool = test_pool();
        let mailer = test_mailer();

        let created = create_event(&pool, &mailer, checkup_day()).await.unwrap();
        let fetched = get_event(&pool, created.id.clone()).await.unwrap().unwrap();
        assert_eq!(fetched, created);
    }

    #[actix_web::test]
    async fn update_event_notifies_attendees_and_keeps_created_at() {
        let pool = test_pool();
        let mailer = test_mailer();

        let created = create_event(&pool, &mailer, checkup_day()).await.unwrap();
        std::thread::sleep(std::time::Duration::from_millis(10));

        let updated = update_event(
            &pool,
            &mailer,
            UpdateEventCommand {
                id: created.id.clone(),
                title: "Checkup Day (moved)".to_string(),
                description: created.description.clone(),
                start_time: dt("2025-01-11T09:00:00"),
                end_time: dt("2025-01-11T10:00:00"),
            },
        )
        .await
        .unwrap()
        .unwrap();

        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);

        let subjects: Vec<String> = mailer.outbox().into_iter().map(|m| m.subject).collect();
        assert!(subjects.contains(&"Event Updated: Checkup Day (moved)".to_string()));
    }

    #[actix_web::test]
    async fn update_event_returns_none_for_missing_id() {
        let pool = test_pool();
        let mailer = test_mailer();

        let res = update_event(
            &pool,
            &mailer,
            UpdateEventCommand {
                id: "missing".to_string(),
                title: "x".to_string(),
                description: String::new(),
                start_time: dt("2025-01-11T09:00:00"),
                end_time: dt("2025-01-11T10:00:00"),
            },
        )
        .await
        .unwrap();
        assert!(res.is_none());
        assert!(mailer.outbox().is_empty());
    }

    #[actix_web::test]
    async fn delete_event_reports_whether_anything_was_removed() {
        let pool = test_pool();
        let mailer = test_mailer();

        let created = create_event(&pool, &mailer, checkup_day()).await.unwrap();
        assert!(delete_event(&pool, created.id.clone()).await.unwrap());
        assert!(!delete_event(&pool, created.id.clone()).await.unwrap());
        assert!(get_event(&pool, created.id).await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn search_term_takes_precedence_over_date_range() {
        let pool = test_pool();
        let mailer = test_mailer();

        create_event(&pool, &mailer, checkup_day()).await.unwrap();
        let mut flu = checkup_day();
        flu.title = "Flu Clinic".to_string();
        flu.description = String::new();
        flu.start_time = dt("2025-03-01T09:00:00");
        flu.end_time = dt("2025-03-01T10:00:00");
        flu.attendees.clear();
        create_event(&pool, &mailer, flu).await.unwrap();

        // The range would only cover March, but the term wins.
        let found = get_events(
            &pool,
            Some(dt("2025-03-01T00:00:00")),
            Some(dt("2025-03-31T00:00:00")),
            Some("Checkup".to_string()),
        )
        .await
        .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Checkup Day");

        // Empty term falls through to the range.
        let found = get_events(
            &pool,
            Some(dt("2025-03-01T00:00:00")),
            Some(dt("2025-03-31T00:00:00")),
            Some(String::new()),
        )
        .await
        .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Flu Clinic");

        // No filters at all scans everything.
        let found = get_events(&pool, None, None, None).await.unwrap();
        assert_eq!(found.len(), 2);
    }

    #[actix_web::test]
    async fn half_specified_date_range_is_ignored() {
        let pool = test_pool();
        let mailer = test_mailer();

        create_event(&pool, &mailer, checkup_day()).await.unwrap();

        let found = get_events(&pool, Some(dt("2026-01-01T00:00:00")), None, None)
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
    }
}
