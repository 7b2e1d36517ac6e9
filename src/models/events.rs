use crate::schema::events;
use chrono::NaiveDateTime;
use diesel::prelude::*;

pub const TITLE_MAX_LEN: usize = 200;
pub const DESCRIPTION_MAX_LEN: usize = 1000;

#[derive(Debug, Clone, PartialEq, Queryable, Insertable, Identifiable, AsChangeset)]
#[diesel(table_name = events)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
