use crate::models::appointments::Appointment;
use crate::models::attendees::Attendee;
use crate::models::doctors::Doctor;
use crate::models::enums::{AppointmentStatus, AttendeeStatus, Gender};
use crate::models::events::Event;
use crate::models::medical_records::MedicalRecord;
use crate::models::patients::Patient;
use async_graphql::SimpleObject;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct AttendeeDto {
    pub id: String,
    pub name: String,
    pub email_address: String,
    pub status: AttendeeStatus,
    pub event_id: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<Attendee> for AttendeeDto {
    fn from(a: Attendee) -> Self {
        Self {
            id: a.id,
            name: a.name,
            email_address: a.email_address,
            status: a.status,
            event_id: a.event_id,
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct EventDto {
    pub id: String,
    pub title: String,
    pub description: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub attendees: Vec<AttendeeDto>,
}

impl EventDto {
    pub fn from_parts(event: Event, attendees: Vec<Attendee>) -> Self {
        Self {
            id: event.id,
            title: event.title,
            description: event.description,
            start_time: event.start_time,
            end_time: event.end_time,
            created_at: event.created_at,
            updated_at: event.updated_at,
            attendees: attendees.into_iter().map(AttendeeDto::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct PatientDto {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub address: String,
    pub emergency_contact: String,
    pub emergency_contact_phone: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<Patient> for PatientDto {
    fn from(p: Patient) -> Self {
        Self {
            id: p.id,
            first_name: p.first_name,
            last_name: p.last_name,
            email: p.email,
            phone_number: p.phone_number,
            date_of_birth: p.date_of_birth,
            gender: p.gender,
            address: p.address,
            emergency_contact: p.emergency_contact,
            emergency_contact_phone: p.emergency_contact_phone,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct DoctorDto {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub specialization: String,
    pub license_number: String,
    pub years_of_experience: i32,
    pub department: String,
    pub is_available: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<Doctor> for DoctorDto {
    fn from(d: Doctor) -> Self {
        Self {
            id: d.id,
            first_name: d.first_name,
            last_name: d.last_name,
            email: d.email,
            phone_number: d.phone_number,
            specialization: d.specialization,
            license_number: d.license_number,
            years_of_experience: d.years_of_experience,
            department: d.department,
            is_available: d.is_available,
            created_at: d.created_at,
            updated_at: d.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentDto {
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

impl From<Appointment> for AppointmentDto {
    fn from(a: Appointment) -> Self {
        Self {
            id: a.id,
            patient_id: a.patient_id,
            doctor_id: a.doctor_id,
            scheduled_at: a.scheduled_at,
            duration_minutes: a.duration_minutes,
            status: a.status,
            reason: a.reason,
            notes: a.notes,
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct MedicalRecordDto {
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

impl From<MedicalRecord> for MedicalRecordDto {
    fn from(m: MedicalRecord) -> Self {
        Self {
            id: m.id,
            patient_id: m.patient_id,
            doctor_id: m.doctor_id,
            diagnosis: m.diagnosis,
            treatment: m.treatment,
            medications: m.medications,
            notes: m.notes,
            visit_date: m.visit_date,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
