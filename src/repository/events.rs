use crate::models::attendees::Attendee;
use crate::models::events::Event;
use crate::schema::{attendees, events};
use chrono::NaiveDateTime;
use diesel::prelude::*;

crate::impl_repository!(EventRepository, Event, crate::schema::events::dsl::events);

impl EventRepository {
    /// Events whose start time falls within `[start, end]`, ascending by
    /// start time.
    pub fn by_date_range(
        conn: &mut SqliteConnection,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> QueryResult<Vec<(Event, Vec<Attendee>)>> {
        let rows = events::table
            .filter(events::start_time.ge(start))
            .filter(events::start_time.le(end))
            .order(events::start_time.asc())
            .load::<Event>(conn)?;
        Self::load_with_attendees(conn, rows)
    }

    /// Substring match on title or description, ascending by start time.
    pub fn search(
        conn: &mut SqliteConnection,
        term: &str,
    ) -> QueryResult<Vec<(Event, Vec<Attendee>)>> {
        let pattern = crate::utils::like_pattern(term);
        let rows = events::table
            .filter(
                events::title
                    .like(pattern.clone())
                    .or(events::description.like(pattern)),
            )
            .order(events::start_time.asc())
            .load::<Event>(conn)?;
        Self::load_with_attendees(conn, rows)
    }

    pub fn all_with_attendees(
        conn: &mut SqliteConnection,
    ) -> QueryResult<Vec<(Event, Vec<Attendee>)>> {
        let rows = Self::get_all(conn)?;
        Self::load_with_attendees(conn, rows)
    }

    pub fn with_attendees(
        conn: &mut SqliteConnection,
        id: &str,
    ) -> QueryResult<Option<(Event, Vec<Attendee>)>> {
        let event = match Self::get_by_id(conn, id)? {
            Some(event) => event,
            None => return Ok(None),
        };
        let atts = attendees::table
            .filter(attendees::event_id.eq(&event.id))
            .order(attendees::name.asc())
            .load::<Attendee>(conn)?;
        Ok(Some((event, atts)))
    }

    fn load_with_attendees(
        conn: &mut SqliteConnection,
        rows: Vec<Event>,
    ) -> QueryResult<Vec<(Event, Vec<Attendee>)>> {
        let atts = Attendee::belonging_to(&rows)
            .load::<Attendee>(conn)?
            .grouped_by(&rows);
        Ok(rows.into_iter().zip(atts).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{get_db_conn, test_pool};
    use crate::repository::test_fixtures::*;
    use crate::repository::AttendeeRepository;

    #[test]
    fn date_range_is_inclusive_and_ordered() {
        let pool = test_pool();
        let mut conn = get_db_conn(&pool).unwrap();

        EventRepository::add(
            &mut conn,
            event("Late", "2025-01-20T09:00:00", "2025-01-20T10:00:00"),
        )
        .unwrap();
        EventRepository::add(
            &mut conn,
            event("On the edge", "2025-01-10T09:00:00", "2025-01-10T10:00:00"),
        )
        .unwrap();
        EventRepository::add(
            &mut conn,
            event("Outside", "2025-02-01T09:00:00", "2025-02-01T10:00:00"),
        )
        .unwrap();

        let found = EventRepository::by_date_range(
            &mut conn,
            dt("2025-01-10T09:00:00"),
            dt("2025-01-20T09:00:00"),
        )
        .unwrap();

        let titles: Vec<&str> = found.iter().map(|(e, _)| e.title.as_str()).collect();
        assert_eq!(titles, vec!["On the edge", "Late"]);
    }

    #[test]
    fn search_matches_title_or_description() {
        let pool = test_pool();
        let mut conn = get_db_conn(&pool).unwrap();

        let mut described = event("Staff sync", "2025-01-12T09:00:00", "2025-01-12T10:00:00");
        described.description = "quarterly checkup planning".to_string();
        EventRepository::add(&mut conn, described).unwrap();
        EventRepository::add(
            &mut conn,
            event("Checkup Day", "2025-01-10T09:00:00", "2025-01-10T10:00:00"),
        )
        .unwrap();
        EventRepository::add(
            &mut conn,
            event("Unrelated", "2025-01-11T09:00:00", "2025-01-11T10:00:00"),
        )
        .unwrap();

        let found = EventRepository::search(&mut conn, "checkup").unwrap();
        let titles: Vec<&str> = found.iter().map(|(e, _)| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Checkup Day", "Staff sync"]);
    }

    #[test]
    fn with_attendees_loads_the_attendee_set() {
        let pool = test_pool();
        let mut conn = get_db_conn(&pool).unwrap();

        let ev = EventRepository::add(
            &mut conn,
            event("Checkup Day", "2025-01-10T09:00:00", "2025-01-10T10:00:00"),
        )
        .unwrap();
        AttendeeRepository::add(&mut conn, attendee(&ev.id, "Ann", "ann@x.com")).unwrap();
        AttendeeRepository::add(&mut conn, attendee(&ev.id, "Bob", "bob@x.com")).unwrap();

        let (loaded, atts) = EventRepository::with_attendees(&mut conn, &ev.id)
            .unwrap()
            .unwrap();
        assert_eq!(loaded.id, ev.id);
        assert_eq!(atts.len(), 2);

        assert!(EventRepository::with_attendees(&mut conn, "missing")
            .unwrap()
            .is_none());
    }

    #[test]
    fn deleting_an_event_cascades_to_attendees() {
        let pool = test_pool();
        let mut conn = get_db_conn(&pool).unwrap();

        let ev = EventRepository::add(
            &mut conn,
            event("Checkup Day", "2025-01-10T09:00:00", "2025-01-10T10:00:00"),
        )
        .unwrap();
        let att = AttendeeRepository::add(&mut conn, attendee(&ev.id, "Ann", "ann@x.com")).unwrap();

        EventRepository::delete(&mut conn, &ev).unwrap();
        assert!(AttendeeRepository::get_by_id(&mut conn, &att.id)
            .unwrap()
            .is_none());
    }
}
