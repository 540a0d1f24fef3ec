#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Domain model and pure logic of the campus-recruitment dashboard.

pub mod actions;
pub mod auth;
pub mod eligibility;
mod error;
pub mod metrics;
pub mod model;
pub mod skills;
pub mod state;
pub mod store;

pub use actions::{DriveNotice, ProfileEdit, ProfileForm, ReferralForm, SlotBooking};
pub use auth::{AuthError, AuthProvider, Credentials, Registration};
pub use eligibility::{Candidate, EligibilityCriteria, eligible_drives, filter_eligible};
pub use error::ValidationError;
pub use model::{
    Alumnus, Application, BranchFilter, Drive, MentorshipSlot, PipelineStatus, Referral, Student,
    UserProfile, UserRole,
};
pub use skills::{SkillGap, skill_gaps};
pub use state::{Action, AppState, ResumeForm, View, reduce};
pub use store::{
    Collection, Document, DocumentStore, Record, SnapshotCache, SnapshotEvent, Subscription,
};
