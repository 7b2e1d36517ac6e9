use crate::models::enums::{AttendeeStatus, Gender};
use crate::models::{attendees, events};
use crate::utils;
use anyhow::bail;
use async_graphql::InputObject;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::collections::HashSet;

#[derive(Debug, Clone, Deserialize, InputObject)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventCommand {
    pub title: String,
    #[serde(default)]
    #[graphql(default)]
    pub description: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    #[serde(default)]
    #[graphql(default)]
    pub attendees: Vec<CreateAttendeeRequest>,
}

#[derive(Debug, Clone, Deserialize, InputObject)]
#[serde(rename_all = "camelCase")]
pub struct CreateAttendeeRequest {
    pub name: String,
    pub email_address: String,
}

impl CreateAttendeeRequest {
    fn validate(&self) -> anyhow::Result<()> {
        utils::require_text("attendee name", &self.name, attendees::NAME_MAX_LEN)?;
        utils::require_text(
            "attendee email",
            &self.email_address,
            attendees::EMAIL_MAX_LEN,
        )?;
        utils::check_email("attendee email", &self.email_address)
    }
}

impl CreateEventCommand {
    pub fn validate(&self) -> anyhow::Result<()> {
        utils::require_text("title", &self.title, events::TITLE_MAX_LEN)?;
        utils::check_len("description", &self.description, events::DESCRIPTION_MAX_LEN)?;
        let mut seen = HashSet::new();
        for attendee in &self.attendees {
            attendee.validate()?;
            if !seen.insert(attendee.email_address.to_ascii_lowercase()) {
                bail!("duplicate attendee email: {}", attendee.email_address);
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, InputObject)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventCommand {
    pub id: String,
    pub title: String,
    #[serde(default)]
    #[graphql(default)]
    pub description: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
}

impl UpdateEventCommand {
    pub fn validate(&self) -> anyhow::Result<()> {
        utils::require_text("title", &self.title, events::TITLE_MAX_LEN)?;
        utils::check_len("description", &self.description, events::DESCRIPTION_MAX_LEN)
    }
}

#[derive(Debug, Clone, Deserialize, InputObject)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAttendeeStatusCommand {
    pub attendee_id: String,
    pub status: AttendeeStatus,
}

#[derive(Debug, Clone, Deserialize, InputObject)]
#[serde(rename_all = "camelCase")]
pub struct CreatePatientCommand {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    #[graphql(default)]
    pub phone_number: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    #[serde(default)]
    #[graphql(default)]
    pub address: String,
    #[serde(default)]
    #[graphql(default)]
    pub emergency_contact: String,
    #[serde(default)]
    #[graphql(default)]
    pub emergency_contact_phone: String,
}

impl CreatePatientCommand {
    pub fn validate(&self) -> anyhow::Result<()> {
        utils::require_text("firstName", &self.first_name, 100)?;
        utils::require_text("lastName", &self.last_name, 100)?;
        utils::require_text("email", &self.email, 255)?;
        utils::check_email("email", &self.email)?;
        utils::check_len("phoneNumber", &self.phone_number, 20)?;
        utils::check_len("address", &self.address, 500)?;
        utils::check_len("emergencyContact", &self.emergency_contact, 200)?;
        utils::check_len("emergencyContactPhone", &self.emergency_contact_phone, 20)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_fixtures::dt;

    fn event_cmd() -> CreateEventCommand {
        CreateEventCommand {
            title: "Checkup Day".to_string(),
            description: String::new(),
            start_time: dt("2025-01-10T09:00:00"),
            end_time: dt("2025-01-10T10:00:00"),
            attendees: vec![CreateAttendeeRequest {
                name: "Ann".to_string(),
                email_address: "ann@x.com".to_string(),
            }],
        }
    }

    #[test]
    fn create_event_requires_a_bounded_title() {
        assert!(event_cmd().validate().is_ok());

        let mut cmd = event_cmd();
        cmd.title = "  ".to_string();
        assert!(cmd.validate().is_err());

        let mut cmd = event_cmd();
        cmd.title = "x".repeat(201);
        assert!(cmd.validate().is_err());
    }

    #[test]
    fn create_event_rejects_duplicate_attendee_emails() {
        let mut cmd = event_cmd();
        cmd.attendees.push(CreateAttendeeRequest {
            name: "Ann Again".to_string(),
            email_address: "ANN@x.com".to_string(),
        });
        assert!(cmd.validate().is_err());
    }

    #[test]
    fn create_patient_checks_email_shape() {
        let cmd = CreatePatientCommand {
            first_name: "Ann".to_string(),
            last_name: "Olsen".to_string(),
            email: "not-an-email".to_string(),
            phone_number: String::new(),
            date_of_birth: chrono::NaiveDate::from_ymd_opt(1990, 5, 14).unwrap(),
            gender: Gender::Female,
            address: String::new(),
            emergency_contact: String::new(),
            emergency_contact_phone: String::new(),
        };
        assert!(cmd.validate().is_err());
    }
}
