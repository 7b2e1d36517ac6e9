use crate::database::get_db_conn;
use crate::models::doctors::Doctor;
use crate::models::enums::Gender;
use crate::models::patients::Patient;
use crate::repository::{DoctorRepository, PatientRepository};
use crate::DbPool;
use chrono::{NaiveDate, NaiveDateTime};
use uuid::Uuid;

/// Inserts a handful of demo doctors and patients on an empty database.
/// Idempotent: any existing patient or doctor row skips the whole pass.
pub fn seed(pool: &DbPool) -> anyhow::Result<()> {
    let mut conn = get_db_conn(pool)?;

    if !PatientRepository::get_all(&mut conn)?.is_empty()
        || !DoctorRepository::get_all(&mut conn)?.is_empty()
    {
        return Ok(());
    }

    for doctor in demo_doctors() {
        DoctorRepository::add(&mut conn, doctor)?;
    }
    for patient in demo_patients() {
        PatientRepository::add(&mut conn, patient)?;
    }

    log::info!("seeded demo doctors and patients");
    Ok(())
}

fn epoch() -> NaiveDateTime {
    NaiveDateTime::default()
}

fn demo_doctors() -> Vec<Doctor> {
    vec![
        Doctor {
            id: Uuid::new_v4().to_string(),
            first_name: "Sarah".to_string(),
            last_name: "Johnson".to_string(),
            email: "sarah.johnson@doctorly.example".to_string(),
            phone_number: "+1-555-0101".to_string(),
            specialization: "Cardiology".to_string(),
            license_number: "MD001234".to_string(),
            years_of_experience: 15,
            department: "Cardiology".to_string(),
            is_available: true,
            created_at: epoch(),
            updated_at: epoch(),
        },
        Doctor {
            id: Uuid::new_v4().to_string(),
            first_name: "Michael".to_string(),
            last_name: "Chen".to_string(),
            email: "michael.chen@doctorly.example".to_string(),
            phone_number: "+1-555-0102".to_string(),
            specialization: "Pediatrics".to_string(),
            license_number: "MD005678".to_string(),
            years_of_experience: 8,
            department: "Pediatrics".to_string(),
            is_available: true,
            created_at: epoch(),
            updated_at: epoch(),
        },
    ]
}

fn demo_patients() -> Vec<Patient> {
    vec![
        Patient {
            id: Uuid::new_v4().to_string(),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: "john.doe@example.com".to_string(),
            phone_number: "+1-555-0201".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1985, 3, 2).unwrap_or_default(),
            gender: Gender::Male,
            address: "42 Main St".to_string(),
            emergency_contact: "Jane Doe".to_string(),
            emergency_contact_phone: "+1-555-0202".to_string(),
            created_at: epoch(),
            updated_at: epoch(),
        },
        Patient {
            id: Uuid::new_v4().to_string(),
            first_name: "Maria".to_string(),
            last_name: "Garcia".to_string(),
            email: "maria.garcia@example.com".to_string(),
            phone_number: "+1-555-0203".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1992, 11, 18).unwrap_or_default(),
            gender: Gender::Female,
            address: "7 Birch Rd".to_string(),
            emergency_contact: "Luis Garcia".to_string(),
            emergency_contact_phone: "+1-555-0204".to_string(),
            created_at: epoch(),
            updated_at: epoch(),
        },
    ]
}
