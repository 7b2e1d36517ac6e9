use crate::models::attendees::Attendee;
use crate::schema::attendees;
use diesel::prelude::*;

crate::impl_repository!(
    AttendeeRepository,
    Attendee,
    crate::schema::attendees::dsl::attendees
);

impl AttendeeRepository {
    pub fn by_event(conn: &mut SqliteConnection, event_id: &str) -> QueryResult<Vec<Attendee>> {
        attendees::table
            .filter(attendees::event_id.eq(event_id))
            .order(attendees::name.asc())
            .load::<Attendee>(conn)
    }

    pub fn by_email_and_event(
        conn: &mut SqliteConnection,
        email: &str,
        event_id: &str,
    ) -> QueryResult<Option<Attendee>> {
        attendees::table
            .filter(attendees::email_address.eq(email))
            .filter(attendees::event_id.eq(event_id))
            .first::<Attendee>(conn)
            .optional()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{get_db_conn, test_pool};
    use crate::repository::test_fixtures::*;
    use crate::repository::EventRepository;

    #[test]
    fn by_event_orders_by_name() {
        let pool = test_pool();
        let mut conn = get_db_conn(&pool).unwrap();

        let ev = EventRepository::add(
            &mut conn,
            event("Checkup Day", "2025-01-10T09:00:00", "2025-01-10T10:00:00"),
        )
        .unwrap();
        AttendeeRepository::add(&mut conn, attendee(&ev.id, "Zoe", "zoe@x.com")).unwrap();
        AttendeeRepository::add(&mut conn, attendee(&ev.id, "Ann", "ann@x.com")).unwrap();

        let atts = AttendeeRepository::by_event(&mut conn, &ev.id).unwrap();
        let names: Vec<&str> = atts.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Ann", "Zoe"]);
    }

    #[test]
    fn by_email_and_event_finds_the_pair() {
        let pool = test_pool();
        let mut conn = get_db_conn(&pool).unwrap();

        let ev = EventRepository::add(
            &mut conn,
            event("Checkup Day", "2025-01-10T09:00:00", "2025-01-10T10:00:00"),
        )
        .unwrap();
        AttendeeRepository::add(&mut conn, attendee(&ev.id, "Ann", "ann@x.com")).unwrap();

        let found = AttendeeRepository::by_email_and_event(&mut conn, "ann@x.com", &ev.id)
            .unwrap()
            .unwrap();
        assert_eq!(found.name, "Ann");

        assert!(
            AttendeeRepository::by_email_and_event(&mut conn, "bob@x.com", &ev.id)
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn same_email_twice_for_one_event_is_rejected() {
        let pool = test_pool();
        let mut conn = get_db_conn(&pool).unwrap();

        let ev = EventRepository::add(
            &mut conn,
            event("Checkup Day", "2025-01-10T09:00:00", "2025-01-10T10:00:00"),
        )
        .unwrap();
        AttendeeRepository::add(&mut conn, attendee(&ev.id, "Ann", "ann@x.com")).unwrap();
        assert!(AttendeeRepository::add(&mut conn, attendee(&ev.id, "Ann B", "ann@x.com")).is_err());

        // Same email under a different event is fine.
        let other = EventRepository::add(
            &mut conn,
            event("Other", "2025-01-11T09:00:00", "2025-01-11T10:00:00"),
        )
        .unwrap();
        AttendeeRepository::add(&mut conn, attendee(&other.id, "Ann", "ann@x.com")).unwrap();
    }
}
