//! Diesel table definitions for the clinic schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Front-desk staff accounts.
    users (id) {
        id -> Int4,
        name -> Varchar,
        /// Lower-cased; unique.
        email -> Varchar,
        /// Argon2 PHC string.
        password_hash -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Registered patients.
    patients (id) {
        id -> Int4,
        name -> Varchar,
        phone -> Nullable<Varchar>,
        /// Admission timestamp, used for the "admitted today" count.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Doctors and their daily availability window.
    doctors (id) {
        id -> Int4,
        name -> Varchar,
        specialization -> Varchar,
        gender -> Varchar,
        location -> Varchar,
        available_from -> Time,
        available_to -> Time,
    }
}

diesel::table! {
    /// Booked appointments.
    appointments (id) {
        id -> Int4,
        patient_id -> Int4,
        doctor_id -> Int4,
        appointment_date -> Date,
        appointment_time -> Time,
        /// One of `booked`, `completed`, `canceled`.
        status -> Varchar,
    }
}

diesel::table! {
    /// Walk-in queue.
    queue_entries (id) {
        id -> Int4,
        patient_id -> Int4,
        /// Unique, strictly increasing ticket number.
        queue_number -> Int4,
        /// One of `waiting`, `with_doctor`, `completed`.
        status -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(appointments -> patients (patient_id));
diesel::joinable!(appointments -> doctors (doctor_id));
diesel::joinable!(queue_entries -> patients (patient_id));

diesel::allow_tables_to_appear_in_same_query!(appointments, doctors, patients, queue_entries, users);
