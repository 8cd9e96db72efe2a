//! Store-assigned integer identifiers.
//!
//! Each entity gets its own newtype so a patient id can never be passed where
//! a doctor id is expected.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Wrap a raw store identifier.
            pub const fn new(value: i32) -> Self {
                Self(value)
            }

            /// Raw integer value as stored.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl From<i32> for $name {
            fn from(value: i32) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id! {
    /// Identifier of a registered front-desk user.
    UserId
}

define_id! {
    /// Identifier of a patient record.
    PatientId
}

define_id! {
    /// Identifier of a doctor record.
    DoctorId
}

define_id! {
    /// Identifier of an appointment.
    AppointmentId
}

define_id! {
    /// Identifier of a queue entry. Distinct from the visible queue number.
    QueueEntryId
}
