use crate::models::doctors::Doctor;
use crate::models::patients::Patient;
use crate::schema::medical_records;
use chrono::NaiveDateTime;
use diesel::prelude::*;

#[derive(
    Debug, Clone, PartialEq, Queryable, Insertable, Identifiable, AsChangeset, Associations,
)]
#[diesel(table_name = medical_records)]
#[diesel(belongs_to(Patient))]
#[diesel(belongs_to(Doctor))]
pub struct MedicalRecord {
    pub id: String,
    pub patient_id: String,
    pub doctor_id: String,
    pub diagnosis: String,
    pub treatment: String,
    pub medications: String,
    pub notes: String,
    pub visit_date: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
