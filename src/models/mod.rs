pub mod appointments;
pub mod attendees;
pub mod doctors;
pub mod enums;
pub mod events;
pub mod medical_records;
pub mod patients;

use chrono::NaiveDateTime;

/// Blanket timestamp rule applied by the stores: `stamp_created` on insert,
/// `stamp_updated` on every persisted mutation.
pub trait Timestamped {
    fn stamp_created(&mut self, now: NaiveDateTime);
    fn stamp_updated(&mut self, now: NaiveDateTime);
}

macro_rules! impl_timestamped {
    ( $( $entity:ty ),+ $(,)? ) => {
        $(
            impl Timestamped for $entity {
                fn stamp_created(&mut self, now: NaiveDateTime) {
                    self.created_at = now;
                    self.updated_at = now;
                }

                fn stamp_updated(&mut self, now: NaiveDateTime) {
                    self.updated_at = now;
                }
            }
        )+
    };
}

impl_timestamped! {
    appointments::Appointment,
    attendees::Attendee,
    doctors::Doctor,
    events::Event,
    medical_records::MedicalRecord,
    patients::Patient,
}
