use crate::models::enums::AttendeeStatus;
use crate::models::events::Event;
use crate::schema::attendees;
use chrono::NaiveDateTime;
use diesel::prelude::*;

pub const NAME_MAX_LEN: usize = 100;
pub const EMAIL_MAX_LEN: usize = 255;

#[derive(
    Debug, Clone, PartialEq, Queryable, Insertable, Identifiable, AsChangeset, Associations,
)]
#[diesel(table_name = attendees)]
#[diesel(belongs_to(Event))]
pub struct Attendee {
    pub id: String,
    pub name: String,
    pub email_address: String,
    pub status: AttendeeStatus,
    pub event_id: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
