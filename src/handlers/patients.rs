use crate::database::get_db_conn;
use crate::handlers::commands::CreatePatientCommand;
use crate::handlers::dto::PatientDto;
use crate::models::patients::Patient;
use crate::repository::PatientRepository;
use crate::DbPool;
use actix_web::web;
use chrono::Utc;
use uuid::Uuid;

pub async fn create_patient(
    pool: &DbPool,
    cmd: CreatePatientCommand,
) -> anyhow::Result<PatientDto> {
    let mut conn = get_db_conn(pool)?;

    let now = Utc::now().naive_utc();
    let patient = Patient {
        id: Uuid::new_v4().to_string(),
        first_name: cmd.first_name,
        last_name: cmd.last_name,
        email: cmd.email,
        phone_number: cmd.phone_number,
        date_of_birth: cmd.date_of_birth,
        gender: cmd.gender,
        address: cmd.address,
        emergency_contact: cmd.emergency_contact,
        emergency_contact_phone: cmd.emergency_contact_phone,
        created_at: now,
        updated_at: now,
    };

    let patient = web::block(move || PatientRepository::add(&mut conn, patient)).await??;
    Ok(patient.into())
}

pub async fn get_patient(pool: &DbPool, id: String) -> anyhow::Result<Option<PatientDto>> {
    let mut conn = get_db_conn(pool)?;

    let patient = web::block(move || PatientRepository::get_by_id(&mut conn, &id)).await??;
    Ok(patient.map(PatientDto::from))
}

pub async fn get_all_patients(pool: &DbPool) -> anyhow::Result<Vec<PatientDto>> {
    let mut conn = get_db_conn(pool)?;

    let patients = web::block(move || PatientRepository::get_all(&mut conn)).await??;
    Ok(patients.into_iter().map(PatientDto::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_pool;
    use crate::models::enums::Gender;
    use chrono::NaiveDate;

    fn ann(email: &str) -> CreatePatientCommand {
        CreatePatientCommand {
            first_name: "Ann".to_string(),
            last_name: "Olsen".to_string(),
            email: email.to_string(),
            phone_number: "+1-555-0100".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 5, 14).unwrap(),
            gender: Gender::Female,
            address: "12 Elm St".to_string(),
            emergency_contact: "Bob Olsen".to_string(),
            emergency_contact_phone: "+1-555-0101".to_string(),
        }
    }

    #[actix_web::test]
    async fn create_issues_distinct_nonempty_ids() {
        let pool = test_pool();

        let first = create_patient(&pool, ann("ann@x.com")).await.unwrap();
        let second = create_patient(&pool, ann("ann2@x.com")).await.unwrap();

        assert!(!first.id.is_empty());
        assert!(!second.id.is_empty());
        assert_ne!(first.id, second.id);
    }

    #[actix_web::test]
    async fn create_then_get_round_trips_field_for_field() {
        let pool = test_pool();

        let created = create_patient(&pool, ann("ann@x.com")).await.unwrap();
        let fetched = get_patient(&pool, created.id.clone())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched, created);

        let all = get_all_patients(&pool).await.unwrap();
        assert_eq!(all, vec![created]);
    }

    #[actix_web::test]
    async fn get_missing_patient_is_none() {
        let pool = test_pool();
        assert!(get_patient(&pool, "missing".to_string())
            .await
            .unwrap()
            .is_none());
    }
}
