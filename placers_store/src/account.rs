//! Registration and sign-in on top of the identity provider and the user
//! collection, with the profile cached locally for offline sign-in.

use placers_core::store::to_fields;
use placers_core::{
    AuthError, AuthProvider, Collection, Credentials, DocumentStore, Record, Registration,
    SnapshotCache, Student, UserProfile, UserRole, ValidationError,
};
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum AccountError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Account store error: {0}")]
    Store(#[from] anyhow::Error),
}

/// Key under which a profile is cached locally.
#[must_use]
pub fn profile_key(uid: &str) -> String {
    format!("profile_{uid}")
}

pub struct AccountService<A, R, C> {
    auth: A,
    remote: R,
    local: C,
}

impl<A, R, C> AccountService<A, R, C>
where
    A: AuthProvider,
    R: DocumentStore,
    C: SnapshotCache,
{
    pub const fn new(auth: A, remote: R, local: C) -> Self {
        Self {
            auth,
            remote,
            local,
        }
    }

    /// Create the account, write its profile and, for students, seed a
    /// matching entry in the student roster.
    pub async fn register(&self, registration: &Registration) -> Result<UserProfile, AccountError> {
        registration.validate()?;
        let uid = self
            .auth
            .sign_up(
                registration.credentials.email.trim(),
                &registration.credentials.password,
            )
            .await?;

        let profile = registration.profile(&uid, chrono::Utc::now());
        if let Err(e) = self
            .remote
            .set(Collection::Users, &uid, to_fields(&profile)?)
            .await
        {
            warn!("Failed to store profile {} remotely: {}", uid, e);
        }

        if profile.role == UserRole::Student {
            let student = Student {
                id: uid.clone(),
                name: profile.name.clone(),
                email: profile.email.clone(),
                cgpa: profile.cgpa,
                backlogs: profile.backlogs,
                branch: profile.branch.clone(),
                skills: profile.skills.clone(),
                status: None,
                marks10: None,
                marks12: None,
                projects: None,
                phone: None,
                applications: vec![],
            };
            if let Err(e) = self
                .remote
                .set(Collection::Students, &uid, to_fields(&student)?)
                .await
            {
                warn!("Failed to add {} to the student roster: {}", uid, e);
            }
        }

        self.cache_profile(&profile).await;
        info!("Registered {} as {:?}", profile.email, profile.role);
        Ok(profile)
    }

    /// Sign in and load the profile, falling back to the locally cached copy
    /// when the backend cannot be reached.
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<UserProfile, AccountError> {
        credentials.validate()?;
        let uid = self
            .auth
            .sign_in(credentials.email.trim(), &credentials.password)
            .await?;

        match self.remote.get(Collection::Users, &uid).await {
            Ok(Some(doc)) => match doc.decode::<UserProfile>() {
                Ok(mut profile) => {
                    profile.uid.clone_from(&uid);
                    self.cache_profile(&profile).await;
                    return Ok(profile);
                }
                Err(e) => warn!("Stored profile {} is invalid: {}", uid, e),
            },
            Ok(None) => warn!("No stored profile for {}", uid),
            Err(e) => warn!("Failed to load profile {}, trying local cache: {}", uid, e),
        }

        self.cached_profile(&uid)
            .await
            .ok_or_else(|| ValidationError::UnknownProfile(uid).into())
    }

    pub async fn sign_out(&self) -> Result<(), AccountError> {
        self.auth.sign_out().await?;
        Ok(())
    }

    /// Refresh the cached profile after a local change such as a new application.
    pub async fn cache_profile(&self, profile: &UserProfile) {
        let value = match serde_json::to_value(profile) {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to serialise profile {}: {}", profile.id(), e);
                return;
            }
        };
        if let Err(e) = self.local.store(&profile_key(profile.id()), &value).await {
            warn!("Failed to cache profile {}: {}", profile.id(), e);
        }
    }

    pub async fn cached_profile(&self, uid: &str) -> Option<UserProfile> {
        match self.local.load(&profile_key(uid)).await {
            Ok(Some(value)) => decode_profile(value, uid),
            Ok(None) => None,
            Err(e) => {
                warn!("Failed to read cached profile {}: {}", uid, e);
                None
            }
        }
    }
}

fn decode_profile(value: Value, uid: &str) -> Option<UserProfile> {
    match serde_json::from_value(value) {
        Ok(profile) => Some(profile),
        Err(e) => {
            warn!("Cached profile {} is invalid: {}", uid, e);
            None
        }
    }
}
