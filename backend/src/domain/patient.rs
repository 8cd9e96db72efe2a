//! Patient records.
//!
//! Patients are created at the front desk and referenced by appointments and
//! queue entries. `created_at` is stamped once on creation and never changes.

use std::fmt;

use chrono::{DateTime, Utc};

use super::PatientId;

/// A persisted patient record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patient {
    pub id: PatientId,
    pub name: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Validation failures for patient input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatientValidationError {
    /// Name was missing or blank once trimmed.
    EmptyName,
}

impl fmt::Display for PatientValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
        }
    }
}

impl std::error::Error for PatientValidationError {}

/// The mutable part of a patient record.
///
/// ## Invariants
/// - `name` is trimmed and non-empty.
/// - `phone` is trimmed; a blank phone is stored as absent.
///
/// # Examples
/// ```
/// use frontdesk::domain::PatientProfile;
///
/// let profile = PatientProfile::try_new(" Alice ", Some("  ")).expect("valid profile");
/// assert_eq!(profile.name(), "Alice");
/// assert_eq!(profile.phone(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientProfile {
    name: String,
    phone: Option<String>,
}

impl PatientProfile {
    /// Validate raw name and phone values.
    pub fn try_new(name: &str, phone: Option<&str>) -> Result<Self, PatientValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PatientValidationError::EmptyName);
        }
        let phone = phone
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_owned);
        Ok(Self {
            name: name.to_owned(),
            phone,
        })
    }

    /// Trimmed patient name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Contact number, if any.
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }
}

impl Patient {
    /// Current profile values, used as the base when merging partial updates.
    pub fn profile(&self) -> PatientProfile {
        PatientProfile {
            name: self.name.clone(),
            phone: self.phone.clone(),
        }
    }
}

/// Insert payload for a new patient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPatient {
    pub profile: PatientProfile,
    pub created_at: DateTime<Utc>,
}

/// Partial patient update as supplied by a caller.
///
/// `phone: Some("")` clears the stored phone number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientChanges {
    pub name: Option<String>,
    pub phone: Option<String>,
}

impl PatientChanges {
    /// Merge the supplied fields onto `current` and revalidate.
    pub fn apply_to(&self, current: &Patient) -> Result<PatientProfile, PatientValidationError> {
        let name = self.name.as_deref().unwrap_or(current.name.as_str());
        let phone = match &self.phone {
            Some(phone) => Some(phone.as_str()),
            None => current.phone.as_deref(),
        };
        PatientProfile::try_new(name, phone)
    }
}
