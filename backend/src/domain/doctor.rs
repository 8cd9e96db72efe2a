//! Doctor records and daily availability windows.

use std::fmt;

use chrono::NaiveTime;

use super::DoctorId;

/// A persisted doctor record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Doctor {
    pub id: DoctorId,
    pub name: String,
    pub specialization: String,
    pub gender: String,
    pub location: String,
    pub available_from: NaiveTime,
    pub available_to: NaiveTime,
}

impl Doctor {
    /// Whether `time` falls inside the doctor's inclusive availability window.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveTime;
    /// use frontdesk::domain::{Doctor, DoctorId};
    ///
    /// let doctor = Doctor {
    ///     id: DoctorId::new(1),
    ///     name: "Dr. X".into(),
    ///     specialization: "GP".into(),
    ///     gender: "female".into(),
    ///     location: "Room 1".into(),
    ///     available_from: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
    ///     available_to: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
    /// };
    /// assert!(doctor.is_available_at(NaiveTime::from_hms_opt(17, 0, 0).unwrap()));
    /// assert!(!doctor.is_available_at(NaiveTime::from_hms_opt(8, 59, 0).unwrap()));
    /// ```
    pub fn is_available_at(&self, time: NaiveTime) -> bool {
        self.available_from <= time && time <= self.available_to
    }

    /// Current profile values as an unvalidated draft.
    pub fn draft(&self) -> DoctorDraft {
        DoctorDraft {
            name: self.name.clone(),
            specialization: self.specialization.clone(),
            gender: self.gender.clone(),
            location: self.location.clone(),
            available_from: self.available_from,
            available_to: self.available_to,
        }
    }
}

/// Validation failures for doctor input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DoctorValidationError {
    /// Name was missing or blank once trimmed.
    EmptyName,
    /// The availability window ends before it starts.
    InvertedAvailability,
}

impl fmt::Display for DoctorValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::InvertedAvailability => {
                write!(f, "available_from must not be later than available_to")
            }
        }
    }
}

impl std::error::Error for DoctorValidationError {}

/// Raw doctor attributes prior to validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorDraft {
    pub name: String,
    pub specialization: String,
    pub gender: String,
    pub location: String,
    pub available_from: NaiveTime,
    pub available_to: NaiveTime,
}

/// Validated doctor attributes written to the store.
///
/// ## Invariants
/// - `name` is trimmed and non-empty.
/// - `available_from <= available_to`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorProfile(DoctorDraft);

impl DoctorProfile {
    /// Doctor name.
    pub fn name(&self) -> &str {
        self.0.name.as_str()
    }

    /// Specialization.
    pub fn specialization(&self) -> &str {
        self.0.specialization.as_str()
    }

    /// Gender as entered.
    pub fn gender(&self) -> &str {
        self.0.gender.as_str()
    }

    /// Room or site.
    pub fn location(&self) -> &str {
        self.0.location.as_str()
    }

    /// Start of the daily window.
    pub fn available_from(&self) -> NaiveTime {
        self.0.available_from
    }

    /// End of the daily window.
    pub fn available_to(&self) -> NaiveTime {
        self.0.available_to
    }
}

impl TryFrom<DoctorDraft> for DoctorProfile {
    type Error = DoctorValidationError;

    fn try_from(draft: DoctorDraft) -> Result<Self, Self::Error> {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(DoctorValidationError::EmptyName);
        }
        if draft.available_from > draft.available_to {
            return Err(DoctorValidationError::InvertedAvailability);
        }
        Ok(Self(DoctorDraft {
            name: name.to_owned(),
            specialization: draft.specialization.trim().to_owned(),
            gender: draft.gender.trim().to_owned(),
            location: draft.location.trim().to_owned(),
            ..draft
        }))
    }
}

/// Partial doctor update as supplied by a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DoctorChanges {
    pub name: Option<String>,
    pub specialization: Option<String>,
    pub gender: Option<String>,
    pub location: Option<String>,
    pub available_from: Option<NaiveTime>,
    pub available_to: Option<NaiveTime>,
}

impl DoctorChanges {
    /// Merge the supplied fields onto `current` and revalidate the result.
    pub fn apply_to(self, current: &Doctor) -> Result<DoctorProfile, DoctorValidationError> {
        let base = current.draft();
        DoctorProfile::try_from(DoctorDraft {
            name: self.name.unwrap_or(base.name),
            specialization: self.specialization.unwrap_or(base.specialization),
            gender: self.gender.unwrap_or(base.gender),
            location: self.location.unwrap_or(base.location),
            available_from: self.available_from.unwrap_or(base.available_from),
            available_to: self.available_to.unwrap_or(base.available_to),
        })
    }
}
