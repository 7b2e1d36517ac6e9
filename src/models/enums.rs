use diesel::backend::Backend;
use diesel::deserialize::{self, FromSql, FromSqlRow};
use diesel::expression::AsExpression;
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use diesel::sqlite::Sqlite;
use serde::{Deserialize, Serialize};

macro_rules! text_enum {
    ( $name:ident { $( $variant:ident => $text:literal ),+ $(,)? } ) => {
        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $text, )+
                }
            }
        }

        impl ToSql<Text, Sqlite> for $name {
            fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Sqlite>) -> serialize::Result {
                out.set_value(self.as_str());
                Ok(IsNull::No)
            }
        }

        impl FromSql<Text, Sqlite> for $name {
            fn from_sql(bytes: <Sqlite as Backend>::RawValue<'_>) -> deserialize::Result<Self> {
                let s = <String as FromSql<Text, Sqlite>>::from_sql(bytes)?;
                match s.as_str() {
                    $( $text => Ok($name::$variant), )+
                    other => Err(format!("unrecognized {}: {}", stringify!($name), other).into()),
                }
            }
        }
    };
}

/// RSVP state of an event attendee.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    AsExpression,
    FromSqlRow,
    async_graphql::Enum,
)]
#[diesel(sql_type = Text)]
pub enum AttendeeStatus {
    #[default]
    Pending,
    Attending,
    NotAttending,
    Tentative,
}

text_enum!(AttendeeStatus {
    Pending => "Pending",
    Attending => "Attending",
    NotAttending => "NotAttending",
    Tentative => "Tentative",
});

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    AsExpression,
    FromSqlRow,
    async_graphql::Enum,
)]
#[diesel(sql_type = Text)]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
    NoShow,
}

text_enum!(AppointmentStatus {
    Scheduled => "Scheduled",
    Completed => "Completed",
    Cancelled => "Cancelled",
    NoShow => "NoShow",
});

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    AsExpression,
    FromSqlRow,
    async_graphql::Enum,
)]
#[diesel(sql_type = Text)]
pub enum Gender {
    Male,
    Female,
    Other,
}

text_enum!(Gender {
    Male => "Male",
    Female => "Female",
    Other => "Other",
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_text_round_trips_through_as_str() {
        assert_eq!(AttendeeStatus::NotAttending.as_str(), "NotAttending");
        assert_eq!(AppointmentStatus::NoShow.as_str(), "NoShow");
        assert_eq!(Gender::Female.as_str(), "Female");
    }

    #[test]
    fn defaults_match_entity_creation_rules() {
        assert_eq!(AttendeeStatus::default(), AttendeeStatus::Pending);
        assert_eq!(AppointmentStatus::default(), AppointmentStatus::Scheduled);
    }
}
