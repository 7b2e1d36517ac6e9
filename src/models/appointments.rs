use crate::models::doctors::Doctor;
use crate::models::enums::AppointmentStatus;
use crate::models::patients::Patient;
use crate::schema::appointments;
use chrono::NaiveDateTime;
use diesel::prelude::*;

pub const DEFAULT_DURATION_MINUTES: i32 = 30;

#[derive(
    Debug, Clone, PartialEq, Queryable, Insertable, Identifiable, AsChangeset, Associations,
)]
#[diesel(table_name = appointments)]
#[diesel(belongs_to(Patient))]
#[diesel(belongs_to(Doctor))]
pub struct Appointment {
    pub id: String,
    pub patient_id: String,
    pub doctor_id: String,
    pub scheduled_at: NaiveDateTime,
    pub duration_minutes: i32,
    pub status: AppointmentStatus,
    pub reason: String,
    pub notes: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
