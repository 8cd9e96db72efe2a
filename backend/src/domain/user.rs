//! Front-desk user accounts.
//!
//! Users authenticate with email and password. Password hashes stay inside
//! the domain and persistence layers; [`User`] never carries one.

use std::fmt;

use zeroize::Zeroizing;

use super::UserId;

/// Validation failures for user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyName,
    EmptyEmail,
    MalformedEmail,
    EmptyPassword,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::MalformedEmail => write!(f, "email must contain '@'"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Normalised email address.
///
/// ## Invariants
/// - Trimmed and lower-cased, so lookups are case-insensitive.
/// - Contains an `@` with text on both sides.
///
/// # Examples
/// ```
/// use frontdesk::domain::EmailAddress;
///
/// let email = EmailAddress::new(" Desk@Clinic.test ").expect("valid email");
/// assert_eq!(email.as_ref(), "desk@clinic.test");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Trim and lower-case `raw`, rejecting blank or `@`-less input.
    pub fn new(raw: &str) -> Result<Self, UserValidationError> {
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        match normalized.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {
                Ok(Self(normalized))
            }
            _ => Err(UserValidationError::MalformedEmail),
        }
    }

    /// Normalised address.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validate a display name, returning the trimmed value.
pub fn normalize_user_name(raw: &str) -> Result<String, UserValidationError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(UserValidationError::EmptyName);
    }
    Ok(name.to_owned())
}

/// Plain-text password held only long enough to hash or verify it.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Reject empty passwords.
    pub fn new(raw: &str) -> Result<Self, UserValidationError> {
        if raw.is_empty() {
            return Err(UserValidationError::EmptyPassword);
        }
        Ok(Self(Zeroizing::new(raw.to_owned())))
    }

    /// Plain text, for hashing or verification only.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(**redacted**)")
    }
}

/// A persisted user without credential material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: EmailAddress,
}

/// A user together with the stored password hash, for credential checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCredentialsRecord {
    pub user: User,
    pub password_hash: String,
}

/// Insert payload for registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: EmailAddress,
    pub password_hash: String,
}

/// Validated partial update; absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<EmailAddress>,
    pub password_hash: Option<String>,
}

impl UserChanges {
    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.password_hash.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", UserValidationError::EmptyEmail)]
    #[case("   ", UserValidationError::EmptyEmail)]
    #[case("desk", UserValidationError::MalformedEmail)]
    #[case("@clinic.test", UserValidationError::MalformedEmail)]
    #[case("desk@", UserValidationError::MalformedEmail)]
    fn rejects_invalid_emails(#[case] raw: &str, #[case] expected: UserValidationError) {
        assert_eq!(EmailAddress::new(raw), Err(expected));
    }

    #[rstest]
    fn email_is_normalised() {
        let email = EmailAddress::new("  Front.Desk@Clinic.TEST").expect("valid");
        assert_eq!(email.to_string(), "front.desk@clinic.test");
    }

    #[rstest]
    fn password_debug_is_redacted() {
        let password = Password::new("hunter2").expect("valid");
        assert!(!format!("{password:?}").contains("hunter2"));
    }

    #[rstest]
    fn password_keeps_whitespace() {
        let password = Password::new(" pw ").expect("valid");
        assert_eq!(password.expose(), " pw ");
    }

    #[rstest]
    fn blank_name_is_rejected() {
        assert_eq!(normalize_user_name("  "), Err(UserValidationError::EmptyName));
    }
}
