mod attendees;
mod events;

pub use attendees::AttendeeRepository;
pub use events::EventRepository;

/// Generates a store over one entity table. Every store gets the same
/// surface: `get_by_id`, `get_all`, `find`, `add`, `update`, `delete`,
/// `exists`. Each call is a single round trip against the connection, no
/// caching; `add` and `update` run the blanket timestamp pass before
/// persisting and hand back the stamped entity.
#[macro_export]
macro_rules! impl_repository {
    ( $repo:ident, $entity:ty, $table:path ) => {
        pub struct $repo;

        impl $repo {
            pub fn get_by_id(
                conn: &mut diesel::SqliteConnection,
                id: &str,
            ) -> diesel::QueryResult<Option<$entity>> {
                use diesel::prelude::*;
                $table.find(id).first::<$entity>(conn).optional()
            }

            pub fn get_all(
                conn: &mut diesel::SqliteConnection,
            ) -> diesel::QueryResult<Vec<$entity>> {
                use diesel::prelude::*;
                $table.load::<$entity>(conn)
            }

            pub fn find<F>(
                conn: &mut diesel::SqliteConnection,
                predicate: F,
            ) -> diesel::QueryResult<Vec<$entity>>
            where
                F: Fn(&$entity) -> bool,
            {
                use diesel::prelude::*;
                let rows = $table.load::<$entity>(conn)?;
                Ok(rows.into_iter().filter(|row| predicate(row)).collect())
            }

            pub fn add(
                conn: &mut diesel::SqliteConnection,
                mut entity: $entity,
            ) -> diesel::QueryResult<$entity> {
                use diesel::prelude::*;
                use $crate::models::Timestamped;
                entity.stamp_created(chrono::Utc::now().naive_utc());
                diesel::insert_into($table).values(&entity).execute(conn)?;
                Ok(entity)
            }

            pub fn update(
                conn: &mut diesel::SqliteConnection,
                mut entity: $entity,
            ) -> diesel::QueryResult<$entity> {
                use diesel::prelude::*;
                use $crate::models::Timestamped;
                entity.stamp_updated(chrono::Utc::now().naive_utc());
                diesel::update($table.find(entity.id.clone()))
                    .set(&entity)
                    .execute(conn)?;
                Ok(entity)
            }

            pub fn delete(
                conn: &mut diesel::SqliteConnection,
                entity: &$entity,
            ) -> diesel::QueryResult<()> {
                use diesel::prelude::*;
                diesel::delete($table.find(entity.id.clone())).execute(conn)?;
                Ok(())
            }

            pub fn exists(
                conn: &mut diesel::SqliteConnection,
                id: &str,
            ) -> diesel::QueryResult<bool> {
                use diesel::prelude::*;
                diesel::select(diesel::dsl::exists($table.find(id))).get_result::<bool>(conn)
            }
        }
    };
}

crate::impl_repository!(
    PatientRepository,
    crate::models::patients::Patient,
    crate::schema::patients::dsl::patients
);

crate::impl_repository!(
    DoctorRepository,
    crate::models::doctors::Doctor,
    crate::schema::doctors::dsl::doctors
);

crate::impl_repository!(
    AppointmentRepository,
    crate::models::appointments::Appointment,
    crate::schema::appointments::dsl::appointments
);

crate::impl_repository!(
    MedicalRecordRepository,
    crate::models::medical_records::MedicalRecord,
    crate::schema::medical_records::dsl::medical_records
);


#[cfg(test)]
mod tests {
    use super::test_fixtures::*;
    use super::*;
    use crate::database::{get_db_conn, test_pool};

    #[test]
    fn add_then_get_round_trips() {
        let pool = test_pool();
        let mut conn = get_db_conn(&pool).unwrap();

        let stored = PatientRepository::add(&mut conn, patient("ann@x.com")).unwrap();
        let loaded = PatientRepository::get_by_id(&mut conn, &stored.id)
            .unwrap()
            .unwrap();
        assert_eq!(loaded, stored);
    }

    #[test]
    fn get_by_id_absent_is_none_not_error() {
        let pool = test_pool();
        let mut conn = get_db_conn(&pool).unwrap();

        let res = PatientRepository::get_by_id(&mut conn, "no-such-id").unwrap();
        assert!(res.is_none());
        assert!(!PatientRepository::exists(&mut conn, "no-such-id").unwrap());
    }

    #[test]
    fn add_stamps_created_and_updated_equally() {
        let pool = test_pool();
        let mut conn = get_db_conn(&pool).unwrap();

        let stored = DoctorRepository::add(&mut conn, doctor("sj@x.com", "MD001")).unwrap();
        assert_eq!(stored.created_at, stored.updated_at);
        assert_ne!(stored.created_at, dt("2020-01-01T00:00:00"));
    }

    #[test]
    fn update_refreshes_only_updated_at() {
        let pool = test_pool();
        let mut conn = get_db_conn(&pool).unwrap();

        let stored = PatientRepository::add(&mut conn, patient("ann@x.com")).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(10));

        let mut changed = stored.clone();
        changed.address = "99 Oak Ave".to_string();
        let updated = PatientRepository::update(&mut conn, changed).unwrap();

        assert_eq!(updated.created_at, stored.created_at);
        assert!(updated.updated_at > stored.updated_at);

        let loaded = PatientRepository::get_by_id(&mut conn, &stored.id)
            .unwrap()
            .unwrap();
        assert_eq!(loaded.address, "99 Oak Ave");
        assert_eq!(loaded.updated_at, updated.updated_at);
    }

    #[test]
    fn find_filters_a_full_scan() {
        let pool = test_pool();
        let mut conn = get_db_conn(&pool).unwrap();

        DoctorRepository::add(&mut conn, doctor("a@x.com", "MD001")).unwrap();
        let mut unavailable = doctor("b@x.com", "MD002");
        unavailable.is_available = false;
        DoctorRepository::add(&mut conn, unavailable).unwrap();

        let available = DoctorRepository::find(&mut conn, |d| d.is_available).unwrap();
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].email, "a@x.com");
    }

    #[test]
    fn delete_removes_the_row() {
        let pool = test_pool();
        let mut conn = get_db_conn(&pool).unwrap();

        let stored = PatientRepository::add(&mut conn, patient("ann@x.com")).unwrap();
        PatientRepository::delete(&mut conn, &stored).unwrap();
        assert!(PatientRepository::get_by_id(&mut conn, &stored.id)
            .unwrap()
            .is_none());
    }

    #[test]
    fn duplicate_patient_email_is_rejected() {
        let pool = test_pool();
        let mut conn = get_db_conn(&pool).unwrap();

        PatientRepository::add(&mut conn, patient("ann@x.com")).unwrap();
        assert!(PatientRepository::add(&mut conn, patient("ann@x.com")).is_err());
    }

    #[test]
    fn deleting_referenced_patient_is_restricted() {
        let pool = test_pool();
        let mut conn = get_db_conn(&pool).unwrap();

        let p = PatientRepository::add(&mut conn, patient("ann@x.com")).unwrap();
        let d = DoctorRepository::add(&mut conn, doctor("sj@x.com", "MD001")).unwrap();
        AppointmentRepository::add(&mut conn, appointment(&p.id, &d.id)).unwrap();

        assert!(PatientRepository::delete(&mut conn, &p).is_err());
        assert!(DoctorRepository::delete(&mut conn, &d).is_err());
        assert!(PatientRepository::exists(&mut conn, &p.id).unwrap());
    }
}
