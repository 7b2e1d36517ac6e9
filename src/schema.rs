table! {
    patients (id) {
        id -> Text,
        first_name -> Text,
        last_name -> Text,
        email -> Text,
        phone_number -> Text,
        date_of_birth -> Date,
        gender -> Text,
        address -> Text,
        emergency_contact -> Text,
        emergency_contact_phone -> Text,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

table! {
    doctors (id) {
        id -> Text,
        first_name -> Text,
        last_name -> Text,
        email -> Text,
        phone_number -> Text,
        specialization -> Text,
        license_number -> Text,
        years_of_experience -> Integer,
        department -> Text,
        is_available -> Bool,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

table! {
    appointments (id) {
        id -> Text,
        patient_id -> Text,
        doctor_id -> Text,
        scheduled_at -> Timestamp,
        duration_minutes -> Integer,
        status -> Text,
        reason -> Text,
        notes -> Text,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

table! {
    medical_records (id) {
        id -> Text,
        patient_id -> Text,
        doctor_id -> Text,
        diagnosis -> Text,
        treatment -> Text,
        medications -> Text,
        notes -> Text,
        visit_date -> Timestamp,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

table! {
    events (id) {
        id -> Text,
        title -> Text,
        description -> Text,
        start_time -> Timestamp,
        end_time -> Timestamp,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

table! {
    attendees (id) {
        id -> Text,
        name -> Text,
        email_address -> Text,
        status -> Text,
        event_id -> Text,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

joinable!(appointments -> patients (patient_id));
joinable!(appointments -> doctors (doctor_id));
joinable!(medical_records -> patients (patient_id));
joinable!(medical_records -> doctors (doctor_id));
joinable!(attendees -> events (event_id));

allow_tables_to_appear_in_same_query!(
    patients,
    doctors,
    appointments,
    medical_records,
    events,
    attendees,
);
