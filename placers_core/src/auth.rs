//! Identity provider seam, credential checks and the user-facing auth messages.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::error::ValidationError;
use crate::model::{UserProfile, UserRole};

pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_RE: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.as_ref().is_some_and(|re| re.is_match(email))
}

/// Identity provider failure. `Display` is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("No account found with this email.")]
    UserNotFound,

    #[error("Incorrect password.")]
    WrongPassword,

    #[error("Email already registered. Please login.")]
    EmailAlreadyInUse,

    #[error("Password must be at least 6 characters.")]
    WeakPassword,

    #[error("Invalid email or password.")]
    InvalidCredential,

    #[error("Please enter a valid email.")]
    InvalidEmail,

    #[error("Something went wrong. Please try again.")]
    Other(String),
}

impl AuthError {
    /// Map a provider error code (`auth/...`) onto the fixed message set.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code {
            "auth/user-not-found" => Self::UserNotFound,
            "auth/wrong-password" => Self::WrongPassword,
            "auth/email-already-in-use" => Self::EmailAlreadyInUse,
            "auth/weak-password" => Self::WeakPassword,
            "auth/invalid-credential" => Self::InvalidCredential,
            "auth/invalid-email" => Self::InvalidEmail,
            other => Self::Other(other.to_string()),
        }
    }

    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::UserNotFound => "auth/user-not-found",
            Self::WrongPassword => "auth/wrong-password",
            Self::EmailAlreadyInUse => "auth/email-already-in-use",
            Self::WeakPassword => "auth/weak-password",
            Self::InvalidCredential => "auth/invalid-credential",
            Self::InvalidEmail => "auth/invalid-email",
            Self::Other(code) => code,
        }
    }
}

/// Email/password identity provider.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Create an account and return its uid.
    async fn sign_up(&self, email: &str, password: &str) -> Result<String, AuthError>;

    /// Verify credentials and return the uid.
    async fn sign_in(&self, email: &str, password: &str) -> Result<String, AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;
}

/// Login / registration form, validated before anything reaches the provider.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(ValidationError::MissingField(
                "Email and password are required.",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Registration {
    pub credentials: Credentials,
    pub name: String,
    pub role: UserRole,
}

impl Registration {
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.credentials.validate()?;
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("Name is required."));
        }
        Ok(())
    }

    /// Initial profile written for a fresh account. Students start with a
    /// placeholder academic record; other roles carry none.
    #[must_use]
    pub fn profile(&self, uid: &str, now: DateTime<Utc>) -> UserProfile {
        let student = self.role == UserRole::Student;
        UserProfile {
            uid: uid.to_string(),
            name: self.name.trim().to_string(),
            email: self.credentials.email.trim().to_string(),
            role: self.role,
            cgpa: student.then_some(7.5),
            branch: student.then(|| "MCA".to_string()),
            backlogs: student.then_some(0),
            phone: None,
            skills: if student {
                vec!["React".to_string(), "SQL".to_string()]
            } else {
                vec![]
            },
            applications: vec![],
            created_at: Some(now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_map_to_fixed_messages() {
        assert_eq!(
            AuthError::from_code("auth/user-not-found").to_string(),
            "No account found with this email."
        );
        assert_eq!(
            AuthError::from_code("auth/weak-password").to_string(),
            "Password must be at least 6 characters."
        );
        let other = AuthError::from_code("auth/network-request-failed");
        assert_eq!(other.to_string(), "Something went wrong. Please try again.");
        assert_eq!(other.code(), "auth/network-request-failed");
    }

    #[test]
    fn codes_round_trip() {
        for code in [
            "auth/user-not-found",
            "auth/wrong-password",
            "auth/email-already-in-use",
            "auth/weak-password",
            "auth/invalid-credential",
            "auth/invalid-email",
        ] {
            assert_eq!(AuthError::from_code(code).code(), code);
        }
    }

    #[test]
    fn credentials_and_name_required() {
        let creds = Credentials {
            email: String::new(),
            password: "secret1".to_string(),
        };
        assert!(creds.validate().is_err());

        let reg = Registration {
            credentials: Credentials {
                email: "a@b.edu".to_string(),
                password: "secret1".to_string(),
            },
            name: " ".to_string(),
            role: UserRole::Student,
        };
        assert_eq!(
            reg.validate(),
            Err(ValidationError::MissingField("Name is required."))
        );
    }

    #[test]
    fn student_profile_defaults() {
        let reg = Registration {
            credentials: Credentials {
                email: "a@b.edu".to_string(),
                password: "secret1".to_string(),
            },
            name: "Asha".to_string(),
            role: UserRole::Student,
        };
        let profile = reg.profile("uid-1", Utc::now());
        assert_eq!(profile.cgpa, Some(7.5));
        assert_eq!(profile.branch.as_deref(), Some("MCA"));
        assert_eq!(profile.backlogs, Some(0));
        assert_eq!(profile.skills, vec!["React", "SQL"]);

        let alumni = Registration {
            role: UserRole::Alumni,
            ..reg
        }
        .profile("uid-2", Utc::now());
        assert_eq!(alumni.cgpa, None);
        assert!(alumni.skills.is_empty());
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("student1@college.edu"));
        assert!(!is_valid_email("student1@college"));
        assert!(!is_valid_email("no at sign"));
    }
}
