//! Filter and sort arguments for the entity set queries. Filters delegate to
//! the stores' predicate scan; sorting happens on the loaded rows.

use crate::handlers::dto::EventDto;
use crate::models::appointments::Appointment;
use crate::models::attendees::Attendee;
use crate::models::doctors::Doctor;
use crate::models::enums::{AppointmentStatus, Gender};
use crate::models::medical_records::MedicalRecord;
use crate::models::patients::Patient;
use async_graphql::{Enum, InputObject};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Enum)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

fn finish<T>(rows: &mut [T], order: SortOrder) {
    if order == SortOrder::Desc {
        rows.reverse();
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[derive(Debug, Clone, Default, InputObject)]
pub struct PatientFilter {
    pub last_name_contains: Option<String>,
    pub email: Option<String>,
    pub gender: Option<Gender>,
}

impl PatientFilter {
    pub fn matches(&self, p: &Patient) -> bool {
        self.last_name_contains
            .as_deref()
            .map_or(true, |t| contains_ci(&p.last_name, t))
            && self
                .email
                .as_deref()
                .map_or(true, |e| p.email.eq_ignore_ascii_case(e))
            && self.gender.map_or(true, |g| p.gender == g)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
pub enum PatientSort {
    LastName,
    DateOfBirth,
    CreatedAt,
}

pub fn sort_patients(rows: &mut [Patient], key: PatientSort, order: SortOrder) {
    match key {
        PatientSort::LastName => rows.sort_by(|a, b| {
            a.last_name
                .cmp(&b.last_name)
                .then_with(|| a.first_name.cmp(&b.first_name))
        }),
        PatientSort::DateOfBirth => rows.sort_by(|a, b| a.date_of_birth.cmp(&b.date_of_birth)),
        PatientSort::CreatedAt => rows.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
    }
    finish(rows, order);
}

#[derive(Debug, Clone, Default, InputObject)]
pub struct DoctorFilter {
    pub specialization: Option<String>,
    pub department: Option<String>,
    pub is_available: Option<bool>,
}

impl DoctorFilter {
    pub fn matches(&self, d: &Doctor) -> bool {
        self.specialization
            .as_deref()
            .map_or(true, |s| d.specialization.eq_ignore_ascii_case(s))
            && self
                .department
                .as_deref()
                .map_or(true, |s| d.department.eq_ignore_ascii_case(s))
            && self.is_available.map_or(true, |a| d.is_available == a)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
pub enum DoctorSort {
    LastName,
    YearsOfExperience,
    CreatedAt,
}

pub fn sort_doctors(rows: &mut [Doctor], key: DoctorSort, order: SortOrder) {
    match key {
        DoctorSort::LastName => rows.sort_by(|a, b| {
            a.last_name
                .cmp(&b.last_name)
                .then_with(|| a.first_name.cmp(&b.first_name))
        }),
        DoctorSort::YearsOfExperience => {
            rows.sort_by(|a, b| a.years_of_experience.cmp(&b.years_of_experience))
        }
        DoctorSort::CreatedAt => rows.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
    }
    finish(rows, order);
}

#[derive(Debug, Clone, Default, InputObject)]
pub struct AppointmentFilter {
    pub patient_id: Option<String>,
    pub doctor_id: Option<String>,
    pub status: Option<AppointmentStatus>,
}

impl AppointmentFilter {
    pub fn matches(&self, a: &Appointment) -> bool {
        self.patient_id.as_deref().map_or(true, |id| a.patient_id == id)
            && self.doctor_id.as_deref().map_or(true, |id| a.doctor_id == id)
            && self.status.map_or(true, |s| a.status == s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
pub enum AppointmentSort {
    ScheduledAt,
    CreatedAt,
}

pub fn sort_appointments(rows: &mut [Appointment], key: AppointmentSort, order: SortOrder) {
    match key {
        AppointmentSort::ScheduledAt => rows.sort_by(|a, b| a.scheduled_at.cmp(&b.scheduled_at)),
        AppointmentSort::CreatedAt => rows.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
    }
    finish(rows, order);
}

#[derive(Debug, Clone, Default, InputObject)]
pub struct MedicalRecordFilter {
    pub patient_id: Option<String>,
    pub doctor_id: Option<String>,
}

impl MedicalRecordFilter {
    pub fn matches(&self, m: &MedicalRecord) -> bool {
        self.patient_id.as_deref().map_or(true, |id| m.patient_id == id)
            && self.doctor_id.as_deref().map_or(true, |id| m.doctor_id == id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
pub enum MedicalRecordSort {
    VisitDate,
    CreatedAt,
}

pub fn sort_medical_records(rows: &mut [MedicalRecord], key: MedicalRecordSort, order: SortOrder) {
    match key {
        MedicalRecordSort::VisitDate => rows.sort_by(|a, b| a.visit_date.cmp(&b.visit_date)),
        MedicalRecordSort::CreatedAt => rows.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
    }
    finish(rows, order);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
pub enum AttendeeSort {
    Name,
    CreatedAt,
}

pub fn sort_attendees(rows: &mut [Attendee], key: AttendeeSort, order: SortOrder) {
    match key {
        AttendeeSort::Name => rows.sort_by(|a, b| a.name.cmp(&b.name)),
        AttendeeSort::CreatedAt => rows.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
    }
    finish(rows, order);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
pub enum EventSort {
    StartTime,
    Title,
    CreatedAt,
}

pub fn sort_events(rows: &mut [EventDto], key: EventSort, order: SortOrder) {
    match key {
        EventSort::StartTime => rows.sort_by(|a, b| a.start_time.cmp(&b.start_time)),
        EventSort::Title => rows.sort_by(|a, b| a.title.cmp(&b.title)),
        EventSort::CreatedAt => rows.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
    }
    finish(rows, order);
}
